//! Video-generation collaborator.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::BackendError;
use crate::job::ProcessingJob;
use crate::model::{GeneratedVideo, GenerationRequest, VideoMetadata, VideoQuality};

/// Link handed back for a requested rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub download_url: String,
}

#[async_trait]
pub trait VideoGateway: Send + Sync {
    /// Submits a generation request. The returned job is in the state the
    /// backend reports at acceptance time (normally `Queued`).
    async fn generate(&self, request: &GenerationRequest) -> Result<ProcessingJob, BackendError>;

    async fn job_status(&self, job_id: &str) -> Result<ProcessingJob, BackendError>;

    async fn list_videos(&self, user_id: &str) -> Result<Vec<GeneratedVideo>, BackendError>;

    async fn download(&self, video_id: &str, quality: &str)
        -> Result<DownloadLink, BackendError>;
}

/// In-memory video gateway mock.
pub struct MockVideoGateway {
    jobs: Mutex<HashMap<String, ProcessingJob>>,
    failure: Mutex<Option<String>>,
}

impl MockVideoGateway {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    /// Gateway that rejects every request with the given message.
    pub fn failing(message: &str) -> Self {
        let gateway = Self::new();
        gateway.set_failure(message);
        gateway
    }

    pub fn set_failure(&self, message: &str) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = Some(message.to_string());
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    /// Number of generation requests accepted so far.
    pub fn accepted_count(&self) -> usize {
        self.jobs.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        let guard = self.failure.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(message) = guard.clone() {
            return Err(BackendError::request(message));
        }
        Ok(())
    }

    fn fabricate_video(user_id: &str, index: usize) -> GeneratedVideo {
        let now = Utc::now();
        GeneratedVideo {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: uuid::Uuid::new_v4().to_string(),
            title: format!("Generated video {}", index + 1),
            description: None,
            duration_secs: 30.5,
            thumbnail: format!("https://storage.invalid/thumbnails/{}/{}.jpg", user_id, index),
            qualities: vec![VideoQuality {
                label: "HD".to_string(),
                value: "1080p".to_string(),
                resolution: "1920x1080".to_string(),
                file_size: 1_024_000,
                bitrate: 5000,
                url: Some(format!(
                    "https://storage.invalid/videos/{}/{}.mp4",
                    user_id, index
                )),
            }],
            metadata: VideoMetadata {
                original_photos: 3,
                prompt_used: "Sample prompt".to_string(),
                subtitles_count: 0,
                processing_time_secs: 180,
            },
            created_at: now,
            expires_at: now + Duration::days(7),
        }
    }
}

impl Default for MockVideoGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoGateway for MockVideoGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<ProcessingJob, BackendError> {
        self.check_failure()?;
        let job = ProcessingJob::queued(&request.id);
        log::debug!("Mock generation accepted: job {}", job.id);
        self.jobs
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn job_status(&self, job_id: &str) -> Result<ProcessingJob, BackendError> {
        self.check_failure()?;
        self.jobs
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(job_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("Unknown job: {}", job_id)))
    }

    async fn list_videos(&self, user_id: &str) -> Result<Vec<GeneratedVideo>, BackendError> {
        self.check_failure()?;
        Ok((0..3).map(|i| Self::fabricate_video(user_id, i)).collect())
    }

    async fn download(
        &self,
        video_id: &str,
        quality: &str,
    ) -> Result<DownloadLink, BackendError> {
        self.check_failure()?;
        Ok(DownloadLink {
            download_url: format!(
                "https://storage.invalid/downloads/video-{}-{}.mp4",
                video_id, quality
            ),
        })
    }
}

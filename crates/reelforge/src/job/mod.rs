//! Processing-job state machine and update events.

pub mod fallback;
pub mod steps;

pub use fallback::FallbackDriver;
pub use steps::{ProcessingStep, StepStatus, StepTracker};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a video-generation job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Processing => write!(f, "Processing"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed => write!(f, "Failed"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Status/progress event delivered by the update channel for a single job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateEvent {
    pub job_id: String,
    pub status: JobStatus,
    /// Progress percentage 0-100. Values above 100 are clamped on apply.
    pub progress: u8,
    /// Error message (set on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl JobUpdateEvent {
    /// Creates a new progress event.
    pub fn new(job_id: &str, status: JobStatus, progress: u8) -> Self {
        Self {
            job_id: job_id.to_string(),
            status,
            progress,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a completion event.
    pub fn completed(job_id: &str) -> Self {
        Self::new(job_id, JobStatus::Completed, 100)
    }

    /// Creates a failure event.
    pub fn failed(job_id: &str, error: &str) -> Self {
        let mut event = Self::new(job_id, JobStatus::Failed, 0);
        event.error = Some(error.to_string());
        event
    }
}

/// One video-generation attempt.
///
/// Owned by the store while active; once terminal it may be copied into the
/// job history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    pub id: String,
    /// Id of the originating generation request.
    pub request_id: String,
    pub status: JobStatus,
    /// Progress percentage 0-100, non-decreasing while the job is live.
    pub progress: u8,
    /// Error message (set when status is Failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    /// Set when the job reaches a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProcessingJob {
    /// Creates a freshly-accepted job in the `Queued` state.
    pub fn queued(request_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request_id: request_id.to_string(),
            status: JobStatus::Queued,
            progress: 0,
            error: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Applies a channel event to this job.
    ///
    /// Status is last-write-wins. Progress is clamped to 100 and never
    /// regresses: applying an equal or older value is a no-op for the
    /// user-visible percentage. The caller is responsible for matching the
    /// event's job id against this job.
    pub fn apply_update(&mut self, event: &JobUpdateEvent) {
        self.status = event.status;
        self.progress = self.progress.max(event.progress.min(100));

        if event.error.is_some() {
            self.error = event.error.clone();
        }

        if event.status.is_terminal() && self.completed_at.is_none() {
            self.completed_at = Some(event.timestamp);
        }
    }

    /// Returns true once the job has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(job: &ProcessingJob, status: JobStatus, progress: u8) -> JobUpdateEvent {
        JobUpdateEvent::new(&job.id, status, progress)
    }

    #[test]
    fn test_queued_job() {
        let job = ProcessingJob::queued("req-1");
        assert!(!job.id.is_empty());
        assert_eq!(job.request_id, "req-1");
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.progress, 0);
        assert!(job.error.is_none());
        assert!(job.completed_at.is_none());
        assert!(!job.is_finished());
    }

    #[test]
    fn test_status_is_last_write_wins() {
        let mut job = ProcessingJob::queued("req-1");

        job.apply_update(&event(&job, JobStatus::Processing, 20));
        assert_eq!(job.status, JobStatus::Processing);

        job.apply_update(&event(&job, JobStatus::Queued, 20));
        assert_eq!(job.status, JobStatus::Queued);

        job.apply_update(&event(&job, JobStatus::Completed, 100));
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[test]
    fn test_progress_never_regresses() {
        let mut job = ProcessingJob::queued("req-1");

        job.apply_update(&event(&job, JobStatus::Processing, 60));
        assert_eq!(job.progress, 60);

        // Duplicate and stale values are no-ops for the visible percentage
        job.apply_update(&event(&job, JobStatus::Processing, 60));
        assert_eq!(job.progress, 60);
        job.apply_update(&event(&job, JobStatus::Processing, 40));
        assert_eq!(job.progress, 60);

        job.apply_update(&event(&job, JobStatus::Processing, 75));
        assert_eq!(job.progress, 75);
    }

    #[test]
    fn test_progress_clamped_to_100() {
        let mut job = ProcessingJob::queued("req-1");
        job.apply_update(&event(&job, JobStatus::Processing, 250));
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn test_terminal_transition_stamps_completed_at() {
        let mut job = ProcessingJob::queued("req-1");
        job.apply_update(&event(&job, JobStatus::Processing, 50));
        assert!(job.completed_at.is_none());

        let completion = JobUpdateEvent::completed(&job.id);
        job.apply_update(&completion);
        assert_eq!(job.completed_at, Some(completion.timestamp));
        assert!(job.is_finished());

        // A later event does not move the completion timestamp
        job.apply_update(&JobUpdateEvent::completed(&job.id));
        assert_eq!(job.completed_at, Some(completion.timestamp));
    }

    #[test]
    fn test_failure_carries_error() {
        let mut job = ProcessingJob::queued("req-1");
        job.apply_update(&JobUpdateEvent::failed(&job.id, "render node crashed"));

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("render node crashed"));
        assert!(job.is_finished());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&JobStatus::Queued).unwrap();
        assert_eq!(json, "\"queued\"");
        let status: JobStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, JobStatus::Cancelled);
    }
}

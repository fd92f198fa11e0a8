//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use reelforge::model::{
    CurrentProject, GeneratedVideo, PhotoSource, SubtitleItem, UploadedPhoto, VideoMetadata,
    VideoQuality, VideoSettings,
};

/// Builder for `CurrentProject` instances.
pub struct ProjectBuilder {
    photos: Vec<UploadedPhoto>,
    prompt: String,
    settings: VideoSettings,
}

impl ProjectBuilder {
    /// Create a new builder with sensible defaults for testing.
    pub fn new() -> Self {
        Self {
            photos: vec![],
            prompt: "A week at the beach".to_string(),
            settings: VideoSettings::default(),
        }
    }

    /// Set the prompt text.
    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// Add `count` photos named photo-0.jpg, photo-1.jpg, ...
    pub fn photos(mut self, count: usize) -> Self {
        for i in 0..count {
            self.photos.push(photo(&format!("photo-{}.jpg", i)));
        }
        self
    }

    /// Add a specific photo.
    pub fn photo(mut self, photo: UploadedPhoto) -> Self {
        self.photos.push(photo);
        self
    }

    /// Set the generation settings.
    pub fn settings(mut self, settings: VideoSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> CurrentProject {
        let mut project = CurrentProject {
            prompt: self.prompt,
            settings: self.settings,
            ..CurrentProject::default()
        };
        for photo in self.photos {
            project.add_photo(photo);
        }
        project
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an uploaded photo with a fake storage URL.
pub fn photo(name: &str) -> UploadedPhoto {
    UploadedPhoto::new(
        &PhotoSource::new(name, 1024),
        &format!("https://storage.invalid/object/public/photos/test/{}", name),
    )
}

/// Creates a subtitle line.
pub fn subtitle(text: &str, start_secs: f64, end_secs: f64) -> SubtitleItem {
    SubtitleItem::new(text, start_secs, end_secs)
}

/// Creates a finished video record.
pub fn video(title: &str) -> GeneratedVideo {
    let now = Utc::now();
    GeneratedVideo {
        id: uuid_like(title),
        job_id: uuid_like("job"),
        title: title.to_string(),
        description: None,
        duration_secs: 30.0,
        thumbnail: "https://storage.invalid/thumbnails/test.jpg".to_string(),
        qualities: vec![VideoQuality {
            label: "HD".to_string(),
            value: "1080p".to_string(),
            resolution: "1920x1080".to_string(),
            file_size: 1_024_000,
            bitrate: 5000,
            url: None,
        }],
        metadata: VideoMetadata {
            original_photos: 2,
            prompt_used: "test".to_string(),
            subtitles_count: 0,
            processing_time_secs: 60,
        },
        created_at: now,
        expires_at: now + Duration::days(7),
    }
}

fn uuid_like(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

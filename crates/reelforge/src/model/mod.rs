//! Domain types shared across the store, gateways, and update channels.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user as reported by the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update passed to the auth collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A candidate file selected for upload. The core never holds file bytes;
/// the object store collaborator receives the descriptor and returns a
/// public URL.
#[derive(Debug, Clone)]
pub struct PhotoSource {
    pub name: String,
    pub size: u64,
    /// Explicit MIME type, if the picker reported one.
    pub mime_type: Option<String>,
}

impl PhotoSource {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type: None,
        }
    }

    pub fn with_mime_type(name: &str, size: u64, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type: Some(mime_type.to_string()),
        }
    }

    /// Resolves the effective MIME type: the explicit one when present,
    /// otherwise detected from the file name.
    pub fn effective_mime_type(&self) -> Option<String> {
        self.mime_type
            .clone()
            .or_else(|| detect_mime_type(Path::new(&self.name)))
    }
}

/// Detects MIME type from a file name using the mime_guess crate.
/// Returns `None` for unknown extensions.
fn detect_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|m| m.to_string())
}

/// A photo that has been uploaded to object storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedPhoto {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    /// Public URL served by object storage.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadedPhoto {
    pub fn new(source: &PhotoSource, url: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: source.name.clone(),
            size: source.size,
            mime_type: source
                .effective_mime_type()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            url: url.to_string(),
            thumbnail: Some(url.to_string()),
            uploaded_at: Utc::now(),
        }
    }
}

// ─── Subtitles ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitlePosition {
    /// Horizontal position, percent 0-100.
    pub x: f32,
    /// Vertical position, percent 0-100.
    pub y: f32,
}

/// A single timed subtitle line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleItem {
    pub id: String,
    pub text: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub position: SubtitlePosition,
}

impl SubtitleItem {
    pub fn new(text: &str, start_secs: f64, end_secs: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            start_secs,
            end_secs,
            position: SubtitlePosition { x: 50.0, y: 85.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleShadow {
    pub enabled: bool,
    pub color: String,
    pub blur: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub font_family: String,
    pub color: String,
    pub background_color: String,
    pub background_opacity: f32,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub padding: u32,
    pub border_radius: u32,
    pub shadow: SubtitleShadow,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 24,
            font_family: "Arial, sans-serif".to_string(),
            color: "#ffffff".to_string(),
            background_color: "#000000".to_string(),
            background_opacity: 0.7,
            text_align: TextAlign::Center,
            vertical_align: VerticalAlign::Bottom,
            padding: 8,
            border_radius: 4,
            shadow: SubtitleShadow {
                enabled: true,
                color: "#000000".to_string(),
                blur: 2,
                offset_x: 1,
                offset_y: 1,
            },
        }
    }
}

/// Subtitle configuration for the current project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleConfig {
    pub items: Vec<SubtitleItem>,
    pub style: SubtitleStyle,
    pub enabled: bool,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            items: vec![],
            style: SubtitleStyle::default(),
            enabled: true,
        }
    }
}

// ─── Generation settings ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Resolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2160p")]
    P2160,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Classic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Fade,
    Slide,
    Zoom,
    Dissolve,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundMusic {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for BackgroundMusic {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 0.5,
        }
    }
}

/// Output settings for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    pub duration_secs: u32,
    pub resolution: Resolution,
    pub frame_rate: u8,
    pub aspect_ratio: AspectRatio,
    pub transition: Transition,
    #[serde(default)]
    pub background_music: BackgroundMusic,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            resolution: Resolution::P1080,
            frame_rate: 30,
            aspect_ratio: AspectRatio::Wide,
            transition: Transition::Fade,
            background_music: BackgroundMusic::default(),
        }
    }
}

// ─── Project & request ──────────────────────────────────────────────────────

/// The in-progress wizard state prior to submission. Mutated incrementally
/// by each wizard step; cleared on logout or explicit reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentProject {
    pub photos: Vec<UploadedPhoto>,
    pub prompt: String,
    pub subtitles: SubtitleConfig,
    pub settings: VideoSettings,
}

impl CurrentProject {
    /// Appends a photo. Photos are unique by id; a duplicate id is ignored.
    pub fn add_photo(&mut self, photo: UploadedPhoto) {
        if self.photos.iter().any(|p| p.id == photo.id) {
            log::debug!("add_photo: duplicate photo id {}, ignoring", photo.id);
            return;
        }
        self.photos.push(photo);
    }

    pub fn remove_photo(&mut self, photo_id: &str) {
        self.photos.retain(|p| p.id != photo_id);
    }

    pub fn add_subtitle(&mut self, item: SubtitleItem) {
        self.subtitles.items.push(item);
    }

    /// Replaces the text and timing of an existing subtitle item.
    /// Unknown ids are ignored.
    pub fn update_subtitle(&mut self, id: &str, text: &str, start_secs: f64, end_secs: f64) {
        if let Some(item) = self.subtitles.items.iter_mut().find(|s| s.id == id) {
            item.text = text.to_string();
            item.start_secs = start_secs;
            item.end_secs = end_secs;
        }
    }

    pub fn remove_subtitle(&mut self, id: &str) {
        self.subtitles.items.retain(|s| s.id != id);
    }
}

/// Immutable snapshot of a project handed to the video-generation
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub id: String,
    pub user_id: String,
    pub photos: Vec<UploadedPhoto>,
    pub prompt: String,
    pub subtitles: SubtitleConfig,
    pub settings: VideoSettings,
    pub created_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn new(user: &User, project: &CurrentProject) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            photos: project.photos.clone(),
            prompt: project.prompt.clone(),
            subtitles: project.subtitles.clone(),
            settings: project.settings.clone(),
            created_at: Utc::now(),
        }
    }
}

// ─── Generated videos ───────────────────────────────────────────────────────

/// One downloadable rendition of a generated video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuality {
    pub label: String,
    pub value: String,
    pub resolution: String,
    pub file_size: u64,
    pub bitrate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub original_photos: usize,
    pub prompt_used: String,
    pub subtitles_count: usize,
    pub processing_time_secs: u64,
}

/// A finished video produced by a completed job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    pub id: String,
    pub job_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_secs: f64,
    pub thumbnail: String,
    pub qualities: Vec<VideoQuality>,
    pub metadata: VideoMetadata,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_source_mime_detection() {
        let source = PhotoSource::new("beach.jpg", 1024);
        assert_eq!(source.effective_mime_type().as_deref(), Some("image/jpeg"));

        let source = PhotoSource::new("beach.png", 1024);
        assert_eq!(source.effective_mime_type().as_deref(), Some("image/png"));

        // Explicit type overrides detection
        let source = PhotoSource::with_mime_type("beach.jpg", 1024, "image/webp");
        assert_eq!(source.effective_mime_type().as_deref(), Some("image/webp"));

        // Unknown extension
        let source = PhotoSource::new("beach.xyz123", 1024);
        assert!(source.effective_mime_type().is_none());
    }

    #[test]
    fn test_uploaded_photo_from_source() {
        let source = PhotoSource::new("sunset.png", 2048);
        let photo = UploadedPhoto::new(&source, "https://cdn.example.com/sunset.png");

        assert!(!photo.id.is_empty());
        assert_eq!(photo.name, "sunset.png");
        assert_eq!(photo.size, 2048);
        assert_eq!(photo.mime_type, "image/png");
        assert_eq!(photo.thumbnail.as_deref(), Some(photo.url.as_str()));
    }

    #[test]
    fn test_project_photos_unique_by_id() {
        let mut project = CurrentProject::default();
        let photo = UploadedPhoto::new(&PhotoSource::new("a.jpg", 10), "https://x/a.jpg");
        project.add_photo(photo.clone());
        project.add_photo(photo);
        assert_eq!(project.photos.len(), 1);
    }

    #[test]
    fn test_project_remove_photo() {
        let mut project = CurrentProject::default();
        let a = UploadedPhoto::new(&PhotoSource::new("a.jpg", 10), "https://x/a.jpg");
        let b = UploadedPhoto::new(&PhotoSource::new("b.jpg", 10), "https://x/b.jpg");
        let a_id = a.id.clone();
        project.add_photo(a);
        project.add_photo(b);

        project.remove_photo(&a_id);
        assert_eq!(project.photos.len(), 1);
        assert_eq!(project.photos[0].name, "b.jpg");
    }

    #[test]
    fn test_subtitle_editing() {
        let mut project = CurrentProject::default();
        let item = SubtitleItem::new("Hello", 0.0, 2.5);
        let id = item.id.clone();
        project.add_subtitle(item);

        project.update_subtitle(&id, "Hello, world", 0.5, 3.0);
        assert_eq!(project.subtitles.items[0].text, "Hello, world");
        assert_eq!(project.subtitles.items[0].start_secs, 0.5);

        project.remove_subtitle(&id);
        assert!(project.subtitles.items.is_empty());
    }

    #[test]
    fn test_default_settings() {
        let settings = VideoSettings::default();
        assert_eq!(settings.duration_secs, 30);
        assert_eq!(settings.resolution, Resolution::P1080);
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.aspect_ratio, AspectRatio::Wide);
        assert_eq!(settings.transition, Transition::Fade);
        assert!(!settings.background_music.enabled);
    }

    #[test]
    fn test_settings_serde_roundtrip_uses_wire_names() {
        let settings = VideoSettings::default();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["resolution"], "1080p");
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["transition"], "fade");
    }

    #[test]
    fn test_generation_request_snapshots_project() {
        let user = User::new("u1", "u1@example.com");
        let mut project = CurrentProject::default();
        project.prompt = "A sunny day".to_string();
        project.add_photo(UploadedPhoto::new(
            &PhotoSource::new("a.jpg", 10),
            "https://x/a.jpg",
        ));

        let request = GenerationRequest::new(&user, &project);
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.prompt, "A sunny day");
        assert_eq!(request.photos.len(), 1);
        assert!(!request.id.is_empty());
    }
}

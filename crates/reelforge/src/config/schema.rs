use serde::{Deserialize, Serialize};

use crate::model::VideoSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    /// Named processing steps shown while a job runs, in order. Nominal
    /// durations feed the remaining-time estimate.
    #[serde(default = "default_steps")]
    pub steps: Vec<StepConfig>,
    /// Default generation settings applied to a fresh project.
    #[serde(default)]
    pub defaults: VideoSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            upload: UploadConfig::default(),
            prompt: PromptConfig::default(),
            channel: ChannelConfig::default(),
            steps: default_steps(),
            defaults: VideoSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
        "image/gif".to_string(),
    ]
}

fn default_max_files() -> usize {
    20
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            allowed_types: default_allowed_types(),
            max_files: default_max_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_max_prompt_chars")]
    pub max_chars: usize,
}

fn default_max_prompt_chars() -> usize {
    500
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_prompt_chars(),
        }
    }
}

/// Cadence of the mocked update channels and the fallback step driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "default_job_interval_ms")]
    pub job_interval_ms: u64,
    #[serde(default = "default_project_interval_ms")]
    pub project_interval_ms: u64,
    #[serde(default = "default_fallback_tick_ms")]
    pub fallback_tick_ms: u64,
}

fn default_job_interval_ms() -> u64 {
    2000
}

fn default_project_interval_ms() -> u64 {
    5000
}

fn default_fallback_tick_ms() -> u64 {
    1000
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            job_interval_ms: default_job_interval_ms(),
            project_interval_ms: default_project_interval_ms(),
            fallback_tick_ms: default_fallback_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Nominal duration in seconds. Steps without one (e.g. upload) do not
    /// contribute to the remaining-time estimate.
    #[serde(default)]
    pub estimated_secs: Option<u64>,
}

impl StepConfig {
    pub fn new(id: &str, name: &str, description: &str, estimated_secs: Option<u64>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            estimated_secs,
        }
    }
}

pub(crate) fn default_steps() -> Vec<StepConfig> {
    vec![
        StepConfig::new(
            "upload",
            "Upload photos",
            "Uploading your photos to the cloud",
            None,
        ),
        StepConfig::new(
            "analysis",
            "Analyze content",
            "Analyzing photo content and composition",
            Some(30),
        ),
        StepConfig::new(
            "generation",
            "Generate video",
            "Generating video content from your prompt",
            Some(120),
        ),
        StepConfig::new(
            "subtitle",
            "Add subtitles",
            "Embedding subtitles into the video",
            Some(15),
        ),
        StepConfig::new(
            "finalize",
            "Finalize",
            "Optimizing video quality for download",
            Some(20),
        ),
    ]
}

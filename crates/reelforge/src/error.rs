use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelforgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Realtime error: {0}")]
    Realtime(#[from] RealtimeError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Local pre-flight checks. These are detected before any collaborator call
/// and abort the operation with no side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No photos selected")]
    NoPhotos,

    #[error("Too many photos: {count} exceeds the limit of {max}")]
    TooManyPhotos { count: usize, max: usize },

    #[error("File '{name}' is too large ({size} bytes, limit {max})")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("Unsupported file type for '{name}': {mime_type}")]
    UnsupportedFileType { name: String, mime_type: String },

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Prompt exceeds the {max} character limit")]
    PromptTooLong { max: usize },

    #[error("No project set")]
    MissingProject,

    #[error("Not signed in")]
    NotAuthenticated,
}

/// Failure reported by a backend collaborator. The message is human-readable
/// and is surfaced to the user verbatim.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct BackendError {
    pub code: BackendErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorCode {
    Auth,
    Storage,
    Request,
    NotFound,
}

impl BackendError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            code: BackendErrorCode::Auth,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self {
            code: BackendErrorCode::Storage,
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self {
            code: BackendErrorCode::Request,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: BackendErrorCode::NotFound,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RealtimeError {
    #[error("A live subscription already exists for '{0}'")]
    AlreadySubscribed(String),

    #[error("Update channel closed unexpectedly")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ReelforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_message_is_verbatim() {
        let err = BackendError::request("network down");
        assert_eq!(err.to_string(), "network down");
        assert_eq!(err.code, BackendErrorCode::Request);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::PromptTooLong { max: 500 };
        assert_eq!(err.to_string(), "Prompt exceeds the 500 character limit");
    }
}

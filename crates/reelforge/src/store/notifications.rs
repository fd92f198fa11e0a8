//! Transient user-facing notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

/// Ephemeral toast-style message. Removed by explicit dismissal or, when a
/// duration is set, by an external timer. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Auto-dismiss delay in milliseconds; `None` means sticky.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, message: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            duration_ms: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_gets_id_and_timestamp() {
        let a = Notification::new(NotificationKind::Success, "Done", "All good");
        let b = Notification::new(NotificationKind::Success, "Done", "All good");

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.duration_ms.is_none());
    }

    #[test]
    fn test_with_duration() {
        let n = Notification::new(NotificationKind::Info, "Hi", "there").with_duration(5000);
        assert_eq!(n.duration_ms, Some(5000));
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&NotificationKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}

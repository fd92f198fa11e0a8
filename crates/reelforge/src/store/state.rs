//! Application state snapshot types.

use serde::{Deserialize, Serialize};

use crate::job::ProcessingJob;
use crate::model::{CurrentProject, GeneratedVideo, User};
use crate::store::notifications::Notification;

/// Processing slice: the active job plus an additive-only history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingState {
    pub current_job: Option<ProcessingJob>,
    pub history: Vec<ProcessingJob>,
}

/// Transient UI state. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
    pub notifications: Vec<Notification>,
}

/// Full application state owned by the store. Consumers only ever see
/// cloned snapshots of (parts of) this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: Option<User>,
    pub current_project: Option<CurrentProject>,
    pub processing: ProcessingState,
    pub videos: Vec<GeneratedVideo>,
    pub ui: UiState,
}

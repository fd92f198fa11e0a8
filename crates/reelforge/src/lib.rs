pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod job;
pub mod logging;
pub mod model;
pub mod realtime;
pub mod store;

pub use backend::{AuthGateway, MockAuth, MockObjectStore, MockVideoGateway, ObjectStore, VideoGateway};
pub use config::{load_config, Config};
pub use error::{
    BackendError, ConfigError, RealtimeError, ReelforgeError, Result, ValidationError,
};
pub use job::{JobStatus, JobUpdateEvent, ProcessingJob, StepTracker};
pub use model::{CurrentProject, GeneratedVideo, GenerationRequest, UploadedPhoto, User};
pub use realtime::{JobSubscription, JobUpdates, MockRealtime, ProjectUpdates};
pub use store::{AppStore, Notification, NotificationKind};

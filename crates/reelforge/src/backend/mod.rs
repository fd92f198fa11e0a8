//! Backend collaborators: auth, object storage, and video generation.
//!
//! Each collaborator is a trait seam with a mocked implementation that
//! fabricates records in memory, matching the snapshot's mock mode. A real
//! backend substitutes behind the same traits.

pub mod auth;
pub mod object_store;
pub mod video;

pub use auth::{AuthGateway, MockAuth};
pub use object_store::{MockObjectStore, ObjectStore, StoredObject, BUCKET_PHOTOS, BUCKET_VIDEOS};
pub use video::{DownloadLink, MockVideoGateway, VideoGateway};

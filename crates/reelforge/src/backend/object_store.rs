//! Object storage collaborator.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::BackendError;
use crate::model::PhotoSource;

pub const BUCKET_PHOTOS: &str = "photos";
pub const BUCKET_VIDEOS: &str = "videos";

/// Result of an upload: the storage path and its public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub public_url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload_photo(
        &self,
        user_id: &str,
        source: &PhotoSource,
    ) -> Result<StoredObject, BackendError>;

    async fn upload_video(
        &self,
        user_id: &str,
        file_name: &str,
    ) -> Result<StoredObject, BackendError>;

    async fn delete_photo(&self, path: &str) -> Result<(), BackendError>;

    async fn delete_video(&self, path: &str) -> Result<(), BackendError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// In-memory object store mock producing deterministic fake URLs.
pub struct MockObjectStore {
    base_url: String,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::with_base_url("https://storage.invalid/object/public")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_path(user_id: &str, file_name: &str) -> String {
        format!("{}/{}-{}", user_id, Utc::now().timestamp_millis(), file_name)
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload_photo(
        &self,
        user_id: &str,
        source: &PhotoSource,
    ) -> Result<StoredObject, BackendError> {
        log::debug!("Mock photo upload: {}", source.name);
        let path = Self::object_path(user_id, &source.name);
        let public_url = self.public_url(BUCKET_PHOTOS, &path);
        Ok(StoredObject { path, public_url })
    }

    async fn upload_video(
        &self,
        user_id: &str,
        file_name: &str,
    ) -> Result<StoredObject, BackendError> {
        log::debug!("Mock video upload: {}", file_name);
        let path = Self::object_path(user_id, file_name);
        let public_url = self.public_url(BUCKET_VIDEOS, &path);
        Ok(StoredObject { path, public_url })
    }

    async fn delete_photo(&self, path: &str) -> Result<(), BackendError> {
        log::debug!("Mock photo delete: {}", path);
        Ok(())
    }

    async fn delete_video(&self, path: &str) -> Result<(), BackendError> {
        log::debug!("Mock video delete: {}", path);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket, path)
    }
}

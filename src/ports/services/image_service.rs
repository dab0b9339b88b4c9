use crate::domain::{
    errors::ImageResult,
    models::{Cleanup, ImageData, Replaced, StoredImage},
    value_objects::{ObjectKey, OwnerId},
};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

/// Photo lifecycle workflows composed from the object store primitives.
///
/// Creation failures are returned to the caller. Removal of a previous photo
/// during an update is best-effort and reported through [`Cleanup`].
#[async_trait]
pub trait ImageService: Send + Sync + 'static {
    /// Store a new photo. Empty `data` is a no-op returning `None`.
    async fn create_image(
        &self,
        data: Bytes,
        content_type: &str,
        owner: Option<&OwnerId>,
    ) -> ImageResult<Option<StoredImage>>;

    /// Delete the photo behind `old_url` (best-effort), then store the new one
    async fn update_image(
        &self,
        old_url: Option<&str>,
        data: Bytes,
        content_type: &str,
        owner: &OwnerId,
    ) -> ImageResult<Replaced>;

    /// Delete the photo behind `url`. Unresolvable URLs are skipped, not errors.
    async fn remove_image(&self, url: Option<&str>) -> ImageResult<Cleanup>;

    /// Every photo stored for `owner`, including ones left behind by failed cleanups
    async fn list_images(&self, owner: &OwnerId) -> ImageResult<Vec<StoredImage>>;

    /// Read a photo back
    async fn get_image(&self, key: &ObjectKey) -> ImageResult<ImageData>;

    /// Check if a photo exists
    async fn image_exists(&self, key: &ObjectKey) -> ImageResult<bool>;

    /// Connectivity check against the configured bucket
    async fn probe(&self) -> ImageResult<StoreProbe>;
}

/// Result of a successful connectivity check
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProbe {
    pub bucket: String,
    pub region: String,
    pub objects_count: usize,
}

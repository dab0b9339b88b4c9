use crate::domain::{
    errors::ImageResult,
    models::ImageData,
    value_objects::{BucketName, ObjectKey},
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Page size used when listing an owner's photos
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Port for the photo bucket.
///
/// The bucket is resolved from configuration on every call, so settings that
/// arrive after startup are honored. Every method fails with a configuration
/// error, before touching the network, while the bucket is unset.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Bucket and region the next call would use
    fn location(&self) -> ImageResult<StoreLocation>;

    /// Canonical URL of `key`, as stored in a record's `photo_url`
    fn object_url(&self, key: &ObjectKey) -> ImageResult<String>;

    /// Store object data and return its canonical URL
    async fn put_object(&self, key: &ObjectKey, data: Bytes, content_type: &str)
        -> ImageResult<String>;

    /// Retrieve object data; a missing key fails with a `NotFound` error
    async fn get_object(&self, key: &ObjectKey) -> ImageResult<ImageData>;

    /// Delete object data. Deleting a missing key succeeds.
    async fn delete_object(&self, key: &ObjectKey) -> ImageResult<()>;

    /// List up to `max_results` objects whose key starts with `prefix`, in store order
    async fn list_by_prefix(&self, prefix: &str, max_results: usize)
        -> ImageResult<Vec<ObjectInfo>>;

    /// Check if object exists
    async fn object_exists(&self, key: &ObjectKey) -> ImageResult<bool>;
}

/// Where photos are stored
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreLocation {
    pub bucket: BucketName,
    pub region: String,
}

/// Information about an object in storage
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: ObjectKey,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

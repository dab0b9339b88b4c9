use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::ImageResult,
        keys::{extension_for, KeyDeriver},
        models::{Cleanup, ImageData, Replaced, StoredImage},
        value_objects::{ObjectKey, OwnerId},
    },
    ports::{
        services::{ImageService, StoreProbe},
        storage::{ObjectStore, DEFAULT_LIST_LIMIT},
    },
};

/// Image lifecycle built on the ObjectStore port
#[derive(Clone)]
pub struct ImageServiceImpl {
    store: Arc<dyn ObjectStore>,
    keys: KeyDeriver,
}

impl ImageServiceImpl {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_key_deriver(store, KeyDeriver::default())
    }

    pub fn with_key_deriver(store: Arc<dyn ObjectStore>, keys: KeyDeriver) -> Self {
        Self { store, keys }
    }

    /// Delete the object behind `old_url`, reporting rather than returning failures
    async fn discard_previous(&self, old_url: Option<&str>) -> Cleanup {
        let Some(url) = old_url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Cleanup::NotNeeded;
        };

        let Some(key) = self.keys.extract_key(url) else {
            debug!(url, "previous photo URL does not resolve to a key");
            return Cleanup::Skipped {
                url: url.to_string(),
            };
        };

        match self.store.delete_object(&key).await {
            Ok(()) => {
                info!(key = %key, "deleted previous photo");
                Cleanup::Deleted { key }
            }
            Err(error) => {
                warn!(key = %key, error = %error, "failed to delete previous photo");
                Cleanup::Failed { key, error }
            }
        }
    }
}

#[async_trait]
impl ImageService for ImageServiceImpl {
    async fn create_image(
        &self,
        data: Bytes,
        content_type: &str,
        owner: Option<&OwnerId>,
    ) -> ImageResult<Option<StoredImage>> {
        if data.is_empty() {
            return Ok(None);
        }

        let key = self.keys.derive_key(owner, Some(extension_for(content_type)));
        let size = data.len() as u64;

        debug!(key = %key, size, content_type, owner_id = owner.map(OwnerId::as_str), "uploading photo");
        let url = self
            .store
            .put_object(&key, data, content_type)
            .await
            .inspect_err(|e| warn!(key = %key, error = %e, "photo upload failed"))?;
        info!(key = %key, url = %url, "photo uploaded");

        Ok(Some(StoredImage {
            key,
            url,
            content_type: Some(content_type.to_string()),
            size,
            last_modified: Utc::now(),
        }))
    }

    async fn update_image(
        &self,
        old_url: Option<&str>,
        data: Bytes,
        content_type: &str,
        owner: &OwnerId,
    ) -> ImageResult<Replaced> {
        self.store.location()?;

        let cleanup = self.discard_previous(old_url).await;
        let image = self.create_image(data, content_type, Some(owner)).await?;

        Ok(Replaced { image, cleanup })
    }

    async fn remove_image(&self, url: Option<&str>) -> ImageResult<Cleanup> {
        self.store.location()?;

        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Ok(Cleanup::NotNeeded);
        };
        let Some(key) = self.keys.extract_key(url) else {
            debug!(url, "photo URL does not resolve to a key, nothing to delete");
            return Ok(Cleanup::Skipped {
                url: url.to_string(),
            });
        };

        self.store.delete_object(&key).await?;
        info!(key = %key, "photo deleted");
        Ok(Cleanup::Deleted { key })
    }

    async fn list_images(&self, owner: &OwnerId) -> ImageResult<Vec<StoredImage>> {
        self.store.location()?;

        let prefix = self.keys.owner_prefix(owner);
        let objects = self.store.list_by_prefix(&prefix, DEFAULT_LIST_LIMIT).await?;
        debug!(owner_id = %owner, count = objects.len(), "listed photos");

        objects
            .into_iter()
            .map(|object| {
                Ok(StoredImage {
                    url: self.store.object_url(&object.key)?,
                    key: object.key,
                    content_type: None,
                    size: object.size,
                    last_modified: object.last_modified,
                })
            })
            .collect()
    }

    async fn get_image(&self, key: &ObjectKey) -> ImageResult<ImageData> {
        self.store.get_object(key).await
    }

    async fn image_exists(&self, key: &ObjectKey) -> ImageResult<bool> {
        self.store.object_exists(key).await
    }

    async fn probe(&self) -> ImageResult<StoreProbe> {
        let location = self.store.location()?;
        let objects = self.store.list_by_prefix("", 1).await?;

        Ok(StoreProbe {
            bucket: location.bucket.to_string(),
            region: location.region,
            objects_count: objects.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::storage::ApacheObjectStoreAdapter,
        config::RuntimeConfig,
        domain::errors::ImageError,
        ports::{
            config::ConfigKey,
            storage::{ObjectInfo, StoreLocation},
        },
    };

    /// Delegates to an in-memory store but fails every delete
    struct BrokenDeletes(ApacheObjectStoreAdapter);

    #[async_trait]
    impl ObjectStore for BrokenDeletes {
        fn location(&self) -> ImageResult<StoreLocation> {
            self.0.location()
        }
        fn object_url(&self, key: &ObjectKey) -> ImageResult<String> {
            self.0.object_url(key)
        }
        async fn put_object(&self, key: &ObjectKey, data: Bytes, ct: &str) -> ImageResult<String> {
            self.0.put_object(key, data, ct).await
        }
        async fn get_object(&self, key: &ObjectKey) -> ImageResult<ImageData> {
            self.0.get_object(key).await
        }
        async fn delete_object(&self, _key: &ObjectKey) -> ImageResult<()> {
            Err(ImageError::store("AccessDenied", "Access Denied", Some(403), Some("req-1".to_string())))
        }
        async fn list_by_prefix(&self, prefix: &str, max: usize) -> ImageResult<Vec<ObjectInfo>> {
            self.0.list_by_prefix(prefix, max).await
        }
        async fn object_exists(&self, key: &ObjectKey) -> ImageResult<bool> {
            self.0.object_exists(key).await
        }
    }

    fn in_memory_store(bucket: Option<&str>) -> ApacheObjectStoreAdapter {
        let mut config = RuntimeConfig::new();
        if let Some(bucket) = bucket {
            config = config.with_value(ConfigKey::S3Bucket, bucket);
        }
        ApacheObjectStoreAdapter::in_memory(Arc::new(config))
    }

    fn service() -> ImageServiceImpl {
        ImageServiceImpl::new(Arc::new(in_memory_store(Some("student-photos"))))
    }

    fn jpeg() -> Bytes {
        Bytes::from(vec![0xFF; 500])
    }

    #[tokio::test]
    async fn test_create_with_owner() {
        let service = service();
        let owner = OwnerId::new("42").unwrap();

        let image = service
            .create_image(jpeg(), "image/jpeg", Some(&owner))
            .await
            .unwrap()
            .unwrap();

        let key = image.key.as_str();
        let millis = key
            .strip_prefix("suppliers/42-")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert!(image.url.ends_with(key));
        assert_eq!(image.size, 500);
        assert!(service.image_exists(&image.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_empty_is_noop() {
        let service = ImageServiceImpl::new(Arc::new(in_memory_store(None)));
        let created = service.create_image(Bytes::new(), "image/jpeg", None).await.unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_previous() {
        let service = service();
        let owner = OwnerId::new("42").unwrap();

        let old = service
            .create_image(jpeg(), "image/jpeg", Some(&owner))
            .await
            .unwrap()
            .unwrap();
        let replaced = service
            .update_image(Some(&old.url), Bytes::from_static(b"png"), "image/png", &owner)
            .await
            .unwrap();

        assert_eq!(replaced.cleanup, Cleanup::Deleted { key: old.key.clone() });
        let new = replaced.image.unwrap();
        assert!(new.key.as_str().starts_with("suppliers/42-"));
        assert!(new.key.as_str().ends_with(".png"));
        assert!(!service.image_exists(&old.key).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_swallows_delete_failure() {
        let service = ImageServiceImpl::new(Arc::new(BrokenDeletes(in_memory_store(Some("student-photos")))));
        let owner = OwnerId::new("42").unwrap();

        let replaced = service
            .update_image(
                Some("https://student-photos.s3.us-east-1.amazonaws.com/suppliers/42-1000.jpg"),
                jpeg(),
                "image/jpeg",
                &owner,
            )
            .await
            .unwrap();

        assert!(replaced.cleanup.is_failed());
        assert!(replaced.image.is_some());
    }

    #[tokio::test]
    async fn test_update_with_unparsable_url() {
        let service = service();
        let owner = OwnerId::new("7").unwrap();

        let replaced = service
            .update_image(Some("not-a-valid-url"), jpeg(), "image/gif", &owner)
            .await
            .unwrap();

        assert_eq!(
            replaced.cleanup,
            Cleanup::Skipped {
                url: "not-a-valid-url".to_string()
            }
        );
        assert!(replaced.image.unwrap().key.as_str().ends_with(".gif"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let service = service();
        let image = service.create_image(jpeg(), "image/jpeg", None).await.unwrap().unwrap();

        let first = service.remove_image(Some(&image.url)).await.unwrap();
        let second = service.remove_image(Some(&image.url)).await.unwrap();
        assert_eq!(first, Cleanup::Deleted { key: image.key.clone() });
        assert_eq!(second, first);
        assert_eq!(service.remove_image(None).await.unwrap(), Cleanup::NotNeeded);
    }

    #[tokio::test]
    async fn test_remove_propagates_delete_failure() {
        let service = ImageServiceImpl::new(Arc::new(BrokenDeletes(in_memory_store(Some("student-photos")))));
        let err = service
            .remove_image(Some("https://student-photos.s3.us-east-1.amazonaws.com/suppliers/1-2.jpg"))
            .await
            .unwrap_err();
        assert_eq!(err.code, "AccessDenied");
        assert_eq!(err.request_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn test_list_images_by_owner() {
        let service = service();
        let seven = OwnerId::new("7").unwrap();
        let seventy = OwnerId::new("70").unwrap();

        service.create_image(jpeg(), "image/jpeg", Some(&seven)).await.unwrap();
        service.create_image(jpeg(), "image/png", Some(&seven)).await.unwrap();
        service.create_image(jpeg(), "image/jpeg", Some(&seventy)).await.unwrap();
        service.create_image(jpeg(), "image/jpeg", None).await.unwrap();

        let images = service.list_images(&seven).await.unwrap();
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|i| i.key.as_str().starts_with("suppliers/7-")));
    }

    #[tokio::test]
    async fn test_unset_bucket() {
        let service = ImageServiceImpl::new(Arc::new(in_memory_store(None)));
        let owner = OwnerId::new("1").unwrap();

        let err = service.create_image(jpeg(), "image/jpeg", None).await.unwrap_err();
        assert!(err.is_configuration());
        assert!(service.remove_image(Some("https://x/suppliers/1-1.jpg")).await.unwrap_err().is_configuration());
        assert!(service.list_images(&owner).await.unwrap_err().is_configuration());
        assert!(service.probe().await.unwrap_err().is_configuration());
    }

    #[tokio::test]
    async fn test_probe() {
        let service = service();
        let probe = service.probe().await.unwrap();
        assert_eq!(probe.bucket, "student-photos");
        assert_eq!(probe.region, "us-east-1");
        assert_eq!(probe.objects_count, 0);

        service.create_image(jpeg(), "image/jpeg", None).await.unwrap();
        service.create_image(jpeg(), "image/jpeg", None).await.unwrap();
        assert_eq!(service.probe().await.unwrap().objects_count, 1);
    }
}

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, PutMode, PutOptions, PutPayload,
};
use std::sync::Arc;
use tracing::debug;

use super::{
    connector::{InMemoryConnector, StoreConnector},
    error::map_store_error,
};
use crate::{
    domain::{
        errors::{ImageError, ImageResult},
        models::ImageData,
        value_objects::{BucketName, ObjectKey},
    },
    ports::{
        config::{ConfigKey, ConfigProvider},
        storage::{ObjectInfo, ObjectStore, StoreLocation},
    },
};

/// Implements our ObjectStore port on top of Apache object_store.
///
/// The bucket and region are read from configuration on every call; the
/// connector decides which client serves that location.
pub struct ApacheObjectStoreAdapter {
    config: Arc<dyn ConfigProvider>,
    connector: Arc<dyn StoreConnector>,
    public_base_url: Option<String>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(config: Arc<dyn ConfigProvider>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            config,
            connector,
            public_base_url: None,
        }
    }

    /// Adapter backed by in-memory buckets
    pub fn in_memory(config: Arc<dyn ConfigProvider>) -> Self {
        Self::new(config, Arc::new(InMemoryConnector::new()))
    }

    /// Serve object URLs from `base` instead of the virtual-hosted S3 host
    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base.map(|b| b.trim_end_matches('/').to_string());
        self
    }

    fn backend(&self) -> ImageResult<(StoreLocation, Arc<dyn object_store::ObjectStore>)> {
        let location = self.location()?;
        let store = self.connector.connect(&location)?;
        Ok((location, store))
    }
}

/// Canonical URL for `key`: `<base>/<key>` with a public base, otherwise the
/// virtual-hosted S3 form `https://<bucket>.s3.<region>.amazonaws.com/<key>`
pub fn build_object_url(
    location: &StoreLocation,
    public_base_url: Option<&str>,
    key: &ObjectKey,
) -> String {
    match public_base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            location.bucket, location.region, key
        ),
    }
}

/// Check that a public base URL is a bare origin (`scheme://host[:port]`).
///
/// A path would end up in front of the key and break key extraction.
pub fn validate_public_base_url(base: &str) -> ImageResult<String> {
    let invalid = |reason: &str| {
        ImageError::configuration(format!("Invalid public base URL '{}': {}", base, reason))
    };

    let uri: http::Uri = base.parse().map_err(|_| invalid("not a URL"))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(invalid("scheme and host are required"));
    }
    if !matches!(uri.path(), "" | "/") || uri.query().is_some() || base.contains('#') {
        return Err(invalid("only an origin is allowed, without path, query or fragment"));
    }

    Ok(base.trim_end_matches('/').to_string())
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    fn location(&self) -> ImageResult<StoreLocation> {
        let bucket = BucketName::from_setting(self.config.get(ConfigKey::S3Bucket))
            .map_err(|e| ImageError::configuration(format!("Invalid S3_BUCKET: {}", e)))?
            .ok_or_else(|| {
                ImageError::configuration(
                    "S3_BUCKET is not set. Check that the secret store was loaded",
                )
            })?;

        let region = self
            .config
            .get(ConfigKey::AwsRegion)
            .or_else(|| ConfigKey::AwsRegion.default_value().map(str::to_string))
            .ok_or_else(|| ImageError::configuration("AWS_REGION is not set"))?;

        Ok(StoreLocation { bucket, region })
    }

    fn object_url(&self, key: &ObjectKey) -> ImageResult<String> {
        let location = self.location()?;
        Ok(build_object_url(&location, self.public_base_url.as_deref(), key))
    }

    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
    ) -> ImageResult<String> {
        let (location, store) = self.backend()?;
        let path = ObjectPath::from(key.as_str());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        // Keys are never reused; a same-millisecond collision fails with
        // AlreadyExists instead of replacing the first photo.
        let options = PutOptions {
            mode: PutMode::Create,
            attributes,
            ..Default::default()
        };

        debug!(bucket = %location.bucket, key = %key, size = data.len(), content_type, "putting object");
        store
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| map_store_error(e, key))?;

        Ok(build_object_url(&location, self.public_base_url.as_deref(), key))
    }

    async fn get_object(&self, key: &ObjectKey) -> ImageResult<ImageData> {
        let (_, store) = self.backend()?;
        let path = ObjectPath::from(key.as_str());

        let result = store.get(&path).await.map_err(|e| map_store_error(e, key))?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.to_string());
        let last_modified = result.meta.last_modified;
        let data = result.bytes().await.map_err(|e| map_store_error(e, key))?;

        Ok(ImageData {
            data,
            content_type,
            last_modified,
        })
    }

    async fn delete_object(&self, key: &ObjectKey) -> ImageResult<()> {
        let (location, store) = self.backend()?;
        let path = ObjectPath::from(key.as_str());

        match store.delete(&path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                debug!(bucket = %location.bucket, key = %key, "object already absent");
                Ok(())
            }
            Err(e) => Err(map_store_error(e, key)),
        }
    }

    async fn list_by_prefix(
        &self,
        prefix: &str,
        max_results: usize,
    ) -> ImageResult<Vec<ObjectInfo>> {
        let (_, store) = self.backend()?;

        // object_store prefixes match whole path segments, so list the
        // enclosing directory and filter on the raw string prefix.
        let directory = prefix
            .rfind('/')
            .map(|i| &prefix[..i])
            .filter(|dir| !dir.is_empty())
            .map(ObjectPath::from);

        let mut stream = store.list(directory.as_ref());
        let mut objects = Vec::new();

        while objects.len() < max_results {
            let Some(result) = stream.next().await else {
                break;
            };
            let meta = result.map_err(ImageError::from)?;

            let location = meta.location.to_string();
            if !location.starts_with(prefix) {
                continue;
            }

            let key = ObjectKey::new(location).map_err(|e| {
                ImageError::store("InvalidKey", format!("Invalid object key from store: {}", e), None, None)
            })?;

            objects.push(ObjectInfo {
                key,
                size: meta.size,
                last_modified: meta.last_modified,
            });
        }

        Ok(objects)
    }

    async fn object_exists(&self, key: &ObjectKey) -> ImageResult<bool> {
        let (_, store) = self.backend()?;
        let path = ObjectPath::from(key.as_str());

        match store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(map_store_error(e, key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;

    fn adapter(bucket: Option<&str>) -> (Arc<RuntimeConfig>, ApacheObjectStoreAdapter) {
        let mut config = RuntimeConfig::new();
        if let Some(bucket) = bucket {
            config = config.with_value(ConfigKey::S3Bucket, bucket);
        }
        let config = Arc::new(config);
        let adapter = ApacheObjectStoreAdapter::in_memory(config.clone());
        (config, adapter)
    }

    fn key(value: &str) -> ObjectKey {
        ObjectKey::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let (_, store) = adapter(Some("student-photos"));
        let k = key("suppliers/7-1700000000000-00ff00ff00ff00ff.png");

        let url = store
            .put_object(&k, Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://student-photos.s3.us-east-1.amazonaws.com/suppliers/7-1700000000000-00ff00ff00ff00ff.png"
        );

        let data = store.get_object(&k).await.unwrap();
        assert_eq!(data.data, Bytes::from_static(b"png-bytes"));
        assert_eq!(data.content_type.as_deref(), Some("image/png"));

        assert!(store.object_exists(&k).await.unwrap());
        store.delete_object(&k).await.unwrap();
        assert!(!store.object_exists(&k).await.unwrap());

        // Deleting again is not an error
        store.delete_object(&k).await.unwrap();

        let err = store.get_object(&k).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_put_never_replaces_existing_object() {
        let (_, store) = adapter(Some("student-photos"));
        let k = key("suppliers/7-1700000000000.jpg");

        store
            .put_object(&k, Bytes::from_static(b"first"), "image/jpeg")
            .await
            .unwrap();
        let err = store
            .put_object(&k, Bytes::from_static(b"second"), "image/jpeg")
            .await
            .unwrap_err();

        assert_eq!(err.code, "AlreadyExists");
        assert_eq!(err.status_code, Some(409));
        assert_eq!(
            store.get_object(&k).await.unwrap().data,
            Bytes::from_static(b"first")
        );
        assert_eq!(store.list_by_prefix("suppliers/7-", 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unset_bucket_is_configuration_error() {
        let (_, store) = adapter(None);
        let err = store
            .put_object(&key("suppliers/a.jpg"), Bytes::from_static(b"x"), "image/jpeg")
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(store.list_by_prefix("suppliers/", 10).await.unwrap_err().is_configuration());
    }

    #[test]
    fn test_invalid_bucket_setting_is_configuration_error() {
        let (_, store) = adapter(Some("Student_Photos"));
        let err = store.location().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.message.starts_with("Invalid S3_BUCKET: photo bucket name contains 'S'"));
    }

    #[tokio::test]
    async fn test_bucket_is_read_on_every_call() {
        let (config, store) = adapter(None);
        assert!(store.location().is_err());

        config.set_override(ConfigKey::S3Bucket, Some("late-bucket".to_string()));
        assert_eq!(store.location().unwrap().bucket.as_str(), "late-bucket");
    }

    #[tokio::test]
    async fn test_list_by_prefix_matches_partial_segment() {
        let (_, store) = adapter(Some("student-photos"));
        for name in [
            "suppliers/42-1-aa.jpg",
            "suppliers/42-2-bb.jpg",
            "suppliers/420-3-cc.jpg",
            "suppliers/7-4-dd.jpg",
            "other/42-5-ee.jpg",
        ] {
            store
                .put_object(&key(name), Bytes::from_static(b"x"), "image/jpeg")
                .await
                .unwrap();
        }

        let listed = store.list_by_prefix("suppliers/42-", 100).await.unwrap();
        let keys: Vec<_> = listed.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["suppliers/42-1-aa.jpg", "suppliers/42-2-bb.jpg"]);

        let capped = store.list_by_prefix("suppliers/", 2).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn test_public_base_url() {
        let location = StoreLocation {
            bucket: BucketName::new("photos".to_string()).unwrap(),
            region: "eu-west-1".to_string(),
        };
        let k = key("suppliers/1-2-ab.jpg");

        assert_eq!(
            build_object_url(&location, Some("http://localhost:9000/"), &k),
            "http://localhost:9000/suppliers/1-2-ab.jpg"
        );
        assert_eq!(
            build_object_url(&location, None, &k),
            "https://photos.s3.eu-west-1.amazonaws.com/suppliers/1-2-ab.jpg"
        );

        assert_eq!(
            validate_public_base_url("https://cdn.example.com/").unwrap(),
            "https://cdn.example.com"
        );
        assert!(validate_public_base_url("http://localhost:9000/photos").is_err());
        assert!(validate_public_base_url("/photos").is_err());
        assert!(validate_public_base_url("http://cdn.example.com/?x=1").is_err());
    }

    #[tokio::test]
    async fn test_urls_round_trip_through_key_extraction() {
        use crate::domain::KeyDeriver;

        let (_, store) = adapter(Some("student-photos"));
        let deriver = KeyDeriver::default();
        let k = deriver.derive_key(Some(&crate::domain::OwnerId::from(42)), Some("png"));

        let url = store.object_url(&k).unwrap();
        assert_eq!(deriver.extract_key(&url), Some(k));
    }

    #[test]
    fn test_both_url_forms_round_trip_for_every_key_shape() {
        use crate::domain::{KeyDeriver, OwnerId};

        let deriver = KeyDeriver::default();
        let location = StoreLocation {
            bucket: BucketName::new("student-photos".to_string()).unwrap(),
            region: "us-west-2".to_string(),
        };
        let owner = OwnerId::from(42);
        let keys = [
            deriver.derive_key_at(Some(&owner), Some("jpg"), 1_700_000_000_000, [0; 8]),
            deriver.derive_key_at(
                None,
                Some("webp"),
                1_700_000_000_001,
                [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef],
            ),
            deriver.derive_key(None, None),
        ];

        for base in [Some("http://localhost:9000"), None] {
            for k in &keys {
                let url = build_object_url(&location, base, k);
                assert_eq!(deriver.extract_key(&url).as_ref(), Some(k), "url {url}");
            }
        }
    }
}

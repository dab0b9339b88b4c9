use object_store::{aws::AmazonS3Builder, memory::InMemory, ObjectStore as ApacheObjectStore};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, RwLock},
};
use tracing::info;

use crate::{domain::errors::{ImageError, ImageResult}, ports::storage::StoreLocation};

/// Hands out an object_store client for a bucket/region pair
pub trait StoreConnector: Send + Sync + 'static {
    fn connect(&self, location: &StoreLocation) -> ImageResult<Arc<dyn ApacheObjectStore>>;
}

/// S3 (or S3-compatible) clients, built lazily and cached per location.
///
/// Credentials come from the standard AWS environment variables.
pub struct S3Connector {
    endpoint: Option<String>,
    clients: RwLock<HashMap<StoreLocation, Arc<dyn ApacheObjectStore>>>,
}

impl S3Connector {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            clients: RwLock::new(HashMap::new()),
        }
    }

    fn build(&self, location: &StoreLocation) -> ImageResult<Arc<dyn ApacheObjectStore>> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(location.bucket.as_str())
            .with_region(location.region.as_str());

        if let Some(endpoint) = &self.endpoint {
            builder = builder
                .with_endpoint(endpoint.as_str())
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder.build().map_err(|e| {
            ImageError::configuration(format!(
                "Failed to create S3 client for bucket {}: {}",
                location.bucket, e
            ))
        })?;

        info!(
            bucket = %location.bucket,
            region = %location.region,
            endpoint = self.endpoint.as_deref().unwrap_or("aws"),
            "created S3 client"
        );
        Ok(Arc::new(store))
    }
}

impl StoreConnector for S3Connector {
    fn connect(&self, location: &StoreLocation) -> ImageResult<Arc<dyn ApacheObjectStore>> {
        if let Some(client) = self
            .clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
        {
            return Ok(client.clone());
        }

        let client = self.build(location)?;
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        Ok(clients.entry(location.clone()).or_insert(client).clone())
    }
}

/// One in-memory store per bucket name, for tests and local development
#[derive(Default)]
pub struct InMemoryConnector {
    buckets: Mutex<HashMap<String, Arc<InMemory>>>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreConnector for InMemoryConnector {
    fn connect(&self, location: &StoreLocation) -> ImageResult<Arc<dyn ApacheObjectStore>> {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let store = buckets
            .entry(location.bucket.as_str().to_string())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone();
        Ok(store)
    }
}

// Infrastructure error mapping
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod connector;

// Re-export key types
pub use apache_object_store_adapter::{
    build_object_url, validate_public_base_url, ApacheObjectStoreAdapter,
};
pub use connector::{InMemoryConnector, S3Connector, StoreConnector};

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    Cleanup,
    // Errors
    ImageError,
    ImageErrorKind,
    KeyDeriver,
    // Value objects
    ObjectKey,
    OwnerId,
    RepositoryError,
    Replaced,
    StoredImage,
    // Models
    Supplier,
    SupplierForm,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    ConfigKey, ConfigProvider, ImageService, ObjectStore, SecretsProvider, SupplierError,
    SupplierRepository, SupplierService,
};

// Service implementations - business logic
pub use services::{ImageServiceImpl, SupplierServiceImpl};

// Runtime configuration
pub use config::{bootstrap_secrets, BootstrapOutcome, RuntimeConfig};

// Application factory and configuration
pub use app::{
    create_in_memory_app, AppBuilder, AppConfig, AppDependencies, AppError, AppServices,
    RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{InMemorySupplierRepository, SqlSupplierRepository},
    secrets::{AwsSecretsManagerProvider, StaticSecretsProvider},
    storage::ApacheObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, ApacheObjectStoreAdapter, AppBuilder, AppServices, ConfigKey,
        ImageService, ImageServiceImpl, KeyDeriver, ObjectKey, ObjectStore, OwnerId,
        RuntimeConfig, SupplierService, SupplierServiceImpl,
    };
}

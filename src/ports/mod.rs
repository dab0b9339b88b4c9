pub mod config;
pub mod repositories;
pub mod secrets;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use config::{ConfigKey, ConfigProvider};
pub use repositories::SupplierRepository;
pub use secrets::{SecretsError, SecretsProvider};
pub use services::{ImageService, StoreProbe, SupplierError, SupplierService};
pub use storage::{ObjectInfo, ObjectStore, StoreLocation};

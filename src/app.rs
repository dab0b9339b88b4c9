use axum::Router;
use std::sync::Arc;

use crate::{
    adapters::{
        inbound::http::{create_router, AppState, Views},
        outbound::{
            persistence::{DatabaseSettings, InMemorySupplierRepository, SqlSupplierRepository},
            storage::{validate_public_base_url, ApacheObjectStoreAdapter, InMemoryConnector, S3Connector},
        },
    },
    config::RuntimeConfig,
    ports::{repositories::SupplierRepository, storage::ObjectStore},
    services::{ImageServiceImpl, SupplierServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    /// Origin used for photo URLs instead of the S3 virtual-hosted form
    pub public_base_url: Option<String>,
}

/// Storage backend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    InMemory,
    /// S3 or an S3-compatible store reachable at `endpoint`
    S3 { endpoint: Option<String> },
}

/// Repository backend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    /// MySQL using the DB settings from runtime configuration
    Database,
}

/// Application dependencies container
pub struct AppDependencies {
    pub object_store: Arc<dyn ObjectStore>,
    pub supplier_repository: Arc<dyn SupplierRepository>,
}

/// Application services container
pub struct AppServices {
    pub config: Arc<RuntimeConfig>,
    pub image_service: Arc<ImageServiceImpl>,
    pub supplier_service: Arc<SupplierServiceImpl>,
}

impl AppServices {
    /// HTTP router serving these services
    pub fn router(&self) -> Result<Router, AppError> {
        let views = Views::new().map_err(|e| AppError::ServiceInit {
            message: format!("Failed to load templates: {}", e),
        })?;

        Ok(create_router(AppState {
            supplier_service: self.supplier_service.clone(),
            image_service: self.image_service.clone(),
            views,
        }))
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    runtime: Arc<RuntimeConfig>,
}

impl AppBuilder {
    /// Create a new application builder reading settings from `runtime`
    pub fn new(runtime: Arc<RuntimeConfig>) -> Self {
        Self {
            config: AppConfig::default(),
            runtime,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.config.public_base_url = base;
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        Ok(AppDependencies {
            object_store: self.create_object_store()?,
            supplier_repository: self.create_repository()?,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let image_service = Arc::new(ImageServiceImpl::new(deps.object_store));
        let supplier_service = Arc::new(SupplierServiceImpl::new(
            image_service.clone(),
            deps.supplier_repository,
        ));

        Ok(AppServices {
            config: self.runtime,
            image_service,
            supplier_service,
        })
    }

    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        let public_base_url = self
            .config
            .public_base_url
            .as_deref()
            .filter(|base| !base.trim().is_empty())
            .map(validate_public_base_url)
            .transpose()
            .map_err(|e| AppError::Configuration { message: e.message })?;

        let adapter = match &self.config.storage_backend {
            StorageBackend::InMemory => ApacheObjectStoreAdapter::new(
                self.runtime.clone(),
                Arc::new(InMemoryConnector::new()),
            ),
            StorageBackend::S3 { endpoint } => ApacheObjectStoreAdapter::new(
                self.runtime.clone(),
                Arc::new(S3Connector::new(endpoint.clone())),
            ),
        };

        Ok(Arc::new(adapter.with_public_base_url(public_base_url)))
    }

    fn create_repository(&self) -> Result<Arc<dyn SupplierRepository>, AppError> {
        match self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemorySupplierRepository::new())),
            RepositoryBackend::Database => {
                let settings = DatabaseSettings::from_config(self.runtime.as_ref()).map_err(|e| {
                    AppError::RepositoryInit {
                        message: e.to_string(),
                    }
                })?;
                Ok(Arc::new(SqlSupplierRepository::connect_lazy(&settings)))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app(runtime: Arc<RuntimeConfig>) -> Result<AppServices, AppError> {
    AppBuilder::new(runtime)
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

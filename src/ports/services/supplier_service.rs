use crate::domain::{
    errors::{ImageError, RepositoryError},
    models::{FieldError, ImageData, ImageUpload, StoredImage, Supplier, SupplierForm},
    value_objects::ObjectKey,
};
use async_trait::async_trait;

/// Errors surfaced by the supplier workflows
#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    /// The submitted form is invalid; nothing was stored
    #[error("Validation failed: {} error(s)", errors.len())]
    Validation {
        form: SupplierForm,
        errors: Vec<FieldError>,
    },

    #[error("Student with id {id} not found")]
    NotFound { id: i64 },

    /// Uploading or reading a photo failed
    #[error("Image operation failed: {0}")]
    Image(#[from] ImageError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for SupplierError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id } => SupplierError::NotFound { id },
            other => SupplierError::Repository(other),
        }
    }
}

/// Request workflows for supplier records and their photos.
///
/// Photo uploads happen before the database write, so a failed upload never
/// leaves a record pointing at a missing object.
#[async_trait]
pub trait SupplierService: Send + Sync + 'static {
    /// Validate, upload the photo if any, then insert the record
    async fn create(
        &self,
        form: SupplierForm,
        photo: Option<ImageUpload>,
    ) -> Result<Supplier, SupplierError>;

    /// Validate, replace the photo if one was uploaded, then update the record
    async fn update(
        &self,
        id: i64,
        form: SupplierForm,
        photo: Option<ImageUpload>,
    ) -> Result<Supplier, SupplierError>;

    /// Remove the record's photo (best-effort), then delete the record
    async fn remove(&self, id: i64) -> Result<(), SupplierError>;

    async fn find_all(&self) -> Result<Vec<Supplier>, SupplierError>;

    async fn find_one(&self, id: i64) -> Result<Supplier, SupplierError>;

    /// All stored photos for a record
    async fn photos(&self, id: i64) -> Result<Vec<StoredImage>, SupplierError>;

    /// Read a stored photo
    async fn photo(&self, key: &ObjectKey) -> Result<ImageData, SupplierError>;
}

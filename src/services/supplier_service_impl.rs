use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        models::{ImageData, ImageUpload, StoredImage, Supplier, SupplierDraft, SupplierForm},
        value_objects::{ObjectKey, OwnerId},
    },
    ports::{
        repositories::SupplierRepository,
        services::{ImageService, SupplierError, SupplierService},
    },
};

/// Supplier workflows: image operations first, then the database write
#[derive(Clone)]
pub struct SupplierServiceImpl {
    images: Arc<dyn ImageService>,
    repository: Arc<dyn SupplierRepository>,
}

impl SupplierServiceImpl {
    pub fn new(images: Arc<dyn ImageService>, repository: Arc<dyn SupplierRepository>) -> Self {
        Self { images, repository }
    }

    fn validate(form: &SupplierForm) -> Result<SupplierDraft, SupplierError> {
        form.validate().map_err(|errors| SupplierError::Validation {
            form: form.trimmed(),
            errors,
        })
    }
}

#[async_trait]
impl SupplierService for SupplierServiceImpl {
    async fn create(
        &self,
        form: SupplierForm,
        photo: Option<ImageUpload>,
    ) -> Result<Supplier, SupplierError> {
        let mut draft = Self::validate(&form)?;

        // The row id does not exist yet, so the key is random
        if let Some(photo) = photo {
            if let Some(image) = self
                .images
                .create_image(photo.data, &photo.content_type, None)
                .await?
            {
                draft.photo_url = Some(image.url);
            }
        }

        let supplier = self.repository.create(draft).await?;
        info!(id = supplier.id, "student created");
        Ok(supplier)
    }

    async fn update(
        &self,
        id: i64,
        form: SupplierForm,
        photo: Option<ImageUpload>,
    ) -> Result<Supplier, SupplierError> {
        let mut draft = Self::validate(&form)?;
        let existing = self.repository.find_by_id(id).await?;

        if let Some(photo) = photo {
            let old_url = existing
                .photo_url
                .as_deref()
                .or(draft.photo_url.as_deref());
            let replaced = self
                .images
                .update_image(old_url, photo.data, &photo.content_type, &OwnerId::from(id))
                .await?;

            debug!(id, cleanup = ?replaced.cleanup, "replaced student photo");
            if let Some(image) = replaced.image {
                draft.photo_url = Some(image.url);
            }
        }

        let supplier = self.repository.update_by_id(id, draft).await?;
        info!(id, "student updated");
        Ok(supplier)
    }

    async fn remove(&self, id: i64) -> Result<(), SupplierError> {
        let supplier = self.repository.find_by_id(id).await?;

        match self.images.remove_image(supplier.photo_url.as_deref()).await {
            Ok(cleanup) => debug!(id, cleanup = ?cleanup, "removed student photo"),
            Err(e) => warn!(id, error = %e, "failed to remove student photo, deleting record anyway"),
        }

        self.repository.delete(id).await?;
        info!(id, "student removed");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Supplier>, SupplierError> {
        Ok(self.repository.get_all().await?)
    }

    async fn find_one(&self, id: i64) -> Result<Supplier, SupplierError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn photos(&self, id: i64) -> Result<Vec<StoredImage>, SupplierError> {
        self.repository.find_by_id(id).await?;
        Ok(self.images.list_images(&OwnerId::from(id)).await?)
    }

    async fn photo(&self, key: &ObjectKey) -> Result<ImageData, SupplierError> {
        Ok(self.images.get_image(key).await?)
    }
}

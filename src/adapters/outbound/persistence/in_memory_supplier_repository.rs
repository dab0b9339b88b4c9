use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{Supplier, SupplierDraft},
    },
    ports::repositories::SupplierRepository,
};

/// In-memory implementation of SupplierRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemorySupplierRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    rows: BTreeMap<i64, Supplier>,
    last_id: i64,
}

impl InMemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn create(&self, draft: SupplierDraft) -> RepositoryResult<Supplier> {
        let mut data = self.data.write().await;
        data.last_id += 1;
        let supplier = Supplier::from_draft(data.last_id, draft);
        data.rows.insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        let data = self.data.read().await;
        Ok(data.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Supplier> {
        let data = self.data.read().await;
        data.rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn update_by_id(&self, id: i64, draft: SupplierDraft) -> RepositoryResult<Supplier> {
        let mut data = self.data.write().await;
        let row = data.rows.get_mut(&id).ok_or(RepositoryError::NotFound { id })?;
        *row = Supplier::from_draft(id, draft);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut data = self.data.write().await;
        data.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound { id })
    }
}

use crate::domain::{
    errors::RepositoryResult,
    models::{Supplier, SupplierDraft},
};
use async_trait::async_trait;

/// Repository for supplier records.
///
/// Writes are last-writer-wins; no optimistic locking is applied.
#[async_trait]
pub trait SupplierRepository: Send + Sync + 'static {
    /// Insert a new record and return it with its assigned id
    async fn create(&self, draft: SupplierDraft) -> RepositoryResult<Supplier>;

    /// All records ordered by id
    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>>;

    /// Fetch one record, failing with `NotFound` if absent
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Supplier>;

    /// Replace the fields of an existing record
    async fn update_by_id(&self, id: i64, draft: SupplierDraft) -> RepositoryResult<Supplier>;

    /// Delete one record, failing with `NotFound` if absent
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

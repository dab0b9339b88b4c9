pub mod in_memory_supplier_repository;
pub mod sql_supplier_repository;

pub use in_memory_supplier_repository::InMemorySupplierRepository;
pub use sql_supplier_repository::{DatabaseSettings, SqlSupplierRepository};

mod image_service;
mod supplier_service;

pub use image_service::{ImageService, StoreProbe};
pub use supplier_service::{SupplierError, SupplierService};

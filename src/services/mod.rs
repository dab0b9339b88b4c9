mod image_service_impl;
mod supplier_service_impl;

pub use image_service_impl::ImageServiceImpl;
pub use supplier_service_impl::SupplierServiceImpl;

pub mod photo_handlers;
pub mod supplier_handlers;

pub use photo_handlers::*;
pub use supplier_handlers::*;

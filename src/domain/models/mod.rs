pub mod image;
pub mod supplier;

pub use image::{
    Cleanup, ImageData, ImageUpload, Replaced, StoredImage, ALLOWED_PHOTO_TYPES, MAX_PHOTO_BYTES,
};
pub use supplier::{FieldError, Supplier, SupplierDraft, SupplierForm};

pub mod errors;
pub mod keys;
pub mod models;
pub mod value_objects;

// Re-export commonly used types
pub use errors::{
    ImageError, ImageErrorKind, ImageResult, RepositoryError, RepositoryResult, ValidationError,
};
pub use keys::KeyDeriver;
pub use models::*;
pub use value_objects::*;

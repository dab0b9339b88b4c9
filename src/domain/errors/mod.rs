mod image_errors;
mod repository_errors;
mod validation_errors;

pub use image_errors::*;
pub use repository_errors::*;
pub use validation_errors::*;

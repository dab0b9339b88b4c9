use crate::domain::{errors::ImageError, value_objects::ObjectKey};

/// Convert object_store errors into the image error shape
impl From<object_store::Error> for ImageError {
    fn from(err: object_store::Error) -> Self {
        let message = err.to_string();
        match err {
            object_store::Error::NotFound { path, .. } => ImageError::not_found(path),
            object_store::Error::AlreadyExists { .. } => {
                ImageError::store("AlreadyExists", message, Some(409), None)
            }
            object_store::Error::Precondition { .. } => {
                ImageError::store("PreconditionFailed", message, Some(412), None)
            }
            object_store::Error::NotModified { .. } => {
                ImageError::store("NotModified", message, Some(304), None)
            }
            object_store::Error::PermissionDenied { .. } => {
                ImageError::store("AccessDenied", message, Some(403), None)
            }
            object_store::Error::Unauthenticated { .. } => {
                ImageError::store("Unauthenticated", message, Some(401), None)
            }
            object_store::Error::NotImplemented { .. } => {
                ImageError::store("NotImplemented", message, Some(501), None)
            }
            _ => ImageError::store("UnknownError", message, None, None),
        }
    }
}

/// Same as the `From` conversion, but reports `NotFound` against our key
pub(crate) fn map_store_error(err: object_store::Error, key: &ObjectKey) -> ImageError {
    match err {
        object_store::Error::NotFound { .. } => ImageError::not_found(key),
        other => other.into(),
    }
}

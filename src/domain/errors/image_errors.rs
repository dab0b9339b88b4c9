use serde::Serialize;

/// Category of an image operation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageErrorKind {
    /// A required runtime setting (the bucket name) is missing or invalid
    Configuration,
    /// The object does not exist in the bucket
    NotFound,
    /// Any other failure reported by the object store
    Store,
}

/// The single error shape returned by every image operation.
///
/// Serializes to `{kind, code, message, statusCode, requestId}` so that it can
/// be shown verbatim on failure pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct ImageError {
    pub kind: ImageErrorKind,
    pub code: String,
    pub message: String,
    pub status_code: Option<u16>,
    pub request_id: Option<String>,
}

impl ImageError {
    /// Missing or unusable runtime configuration
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ImageErrorKind::Configuration,
            code: "ConfigurationError".to_string(),
            message: message.into(),
            status_code: None,
            request_id: None,
        }
    }

    /// The bucket has no object under `key`
    pub fn not_found(key: impl std::fmt::Display) -> Self {
        Self {
            kind: ImageErrorKind::NotFound,
            code: "NotFound".to_string(),
            message: format!("Object not found: {}", key),
            status_code: Some(404),
            request_id: None,
        }
    }

    /// Remote object store failure
    pub fn store(
        code: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            kind: ImageErrorKind::Store,
            code: code.into(),
            message: message.into(),
            status_code,
            request_id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ImageErrorKind::NotFound
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == ImageErrorKind::Configuration
    }
}

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;

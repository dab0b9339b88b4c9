use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    errors::{ImageError, ValidationError},
    value_objects::ObjectKey,
};

/// Largest photo accepted from a form upload (5 MiB)
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for photo uploads
pub const ALLOWED_PHOTO_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// One object in the photo bucket.
///
/// Never mutated in place: replacing a photo produces a new key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub key: ObjectKey,
    pub url: String,
    pub content_type: Option<String>,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Bytes and metadata read back from the bucket
#[derive(Debug, Clone)]
pub struct ImageData {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub last_modified: DateTime<Utc>,
}

/// A photo submitted with a supplier form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Bytes,
    pub content_type: String,
}

impl ImageUpload {
    /// Validate an uploaded file part. An empty part means "no photo".
    pub fn from_part(data: Bytes, content_type: &str) -> Result<Option<Self>, ValidationError> {
        if data.is_empty() {
            return Ok(None);
        }

        if data.len() > MAX_PHOTO_BYTES {
            return Err(ValidationError::PhotoTooLarge {
                actual: data.len(),
                max: MAX_PHOTO_BYTES,
            });
        }

        let content_type = content_type.trim().to_ascii_lowercase();
        if !ALLOWED_PHOTO_TYPES.contains(&content_type.as_str()) {
            return Err(ValidationError::UnsupportedPhotoType(content_type));
        }

        Ok(Some(Self { data, content_type }))
    }
}

/// What happened to the previous object during a cleanup step.
///
/// Cleanup never decides the outcome of the surrounding operation, it is
/// reported next to it so callers can log or assert on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cleanup {
    /// There was no previous URL
    NotNeeded,
    /// The URL could not be resolved to a key, nothing was deleted
    Skipped { url: String },
    /// The previous object was deleted
    Deleted { key: ObjectKey },
    /// Deleting the previous object failed
    Failed { key: ObjectKey, error: ImageError },
}

impl Cleanup {
    pub fn is_failed(&self) -> bool {
        matches!(self, Cleanup::Failed { .. })
    }
}

/// Outcome of replacing an owner's photo
#[derive(Debug, Clone, PartialEq)]
pub struct Replaced {
    /// The newly stored image, `None` when no bytes were supplied
    pub image: Option<StoredImage>,
    /// Result of removing the previous image
    pub cleanup: Cleanup,
}

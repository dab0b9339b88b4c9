//! Object key derivation for supplier photos.
//!
//! Keys live under a fixed collection prefix and take one of two forms:
//!
//! - `suppliers/<owner>-<millis>.<ext>` when the owning record is known
//! - `suppliers/<millis>-<16 hex chars>.<ext>` otherwise
//!
//! [`KeyDeriver::extract_key`] maps a stored photo URL back to its key.

use chrono::Utc;
use http::Uri;

use crate::domain::value_objects::{ObjectKey, OwnerId};

/// Key prefix namespace for supplier photos
pub const SUPPLIER_COLLECTION: &str = "suppliers";

/// Extension used when none (or an unusable one) is supplied
pub const DEFAULT_EXTENSION: &str = "jpg";

/// File extension for an image content type, `jpg` for anything unknown
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => DEFAULT_EXTENSION,
    }
}

#[derive(Debug, Clone)]
pub struct KeyDeriver {
    collection: String,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new(SUPPLIER_COLLECTION)
    }
}

impl KeyDeriver {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into().trim_matches('/').to_string(),
        }
    }

    /// Derive a fresh key from the current time and, without an owner, 64 random bits
    pub fn derive_key(&self, owner: Option<&OwnerId>, extension: Option<&str>) -> ObjectKey {
        let millis = Utc::now().timestamp_millis();
        self.derive_key_at(owner, extension, millis, rand::random())
    }

    /// Deterministic form of [`derive_key`](Self::derive_key)
    pub fn derive_key_at(
        &self,
        owner: Option<&OwnerId>,
        extension: Option<&str>,
        timestamp_millis: i64,
        random: [u8; 8],
    ) -> ObjectKey {
        let ext = sanitize_extension(extension);
        let key = match owner {
            Some(owner) => format!("{}/{}-{}.{}", self.collection, owner, timestamp_millis, ext),
            None => format!(
                "{}/{}-{}.{}",
                self.collection,
                timestamp_millis,
                hex::encode(random),
                ext
            ),
        };
        ObjectKey::from_derived(key)
    }

    /// Prefix shared by every key derived for `owner`
    pub fn owner_prefix(&self, owner: &OwnerId) -> String {
        format!("{}/{}-", self.collection, owner)
    }

    /// Resolve a stored photo URL back to its object key.
    ///
    /// Absolute URLs yield their path without the leading `/`. Anything that
    /// does not parse falls back to the text after `/<collection>/`.
    pub fn extract_key(&self, url: &str) -> Option<ObjectKey> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let raw = match absolute_path(url) {
            Some(path) => {
                let path = path.strip_prefix('/').unwrap_or(&path);
                urlencoding::decode(path).ok()?.into_owned()
            }
            None => {
                let marker = format!("/{}/", self.collection);
                let start = url.find(&marker)? + marker.len();
                url[start..].to_string()
            }
        };

        ObjectKey::new(raw).ok()
    }
}

/// Path of `url` when it is an absolute URL with a scheme and host
fn absolute_path(url: &str) -> Option<String> {
    let uri: Uri = url.parse().ok()?;
    uri.scheme()?;
    uri.authority()?;
    Some(uri.path().to_string())
}

fn sanitize_extension(extension: Option<&str>) -> String {
    let ext = extension
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .unwrap_or_default();

    if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        ext
    } else {
        DEFAULT_EXTENSION.to_string()
    }
}

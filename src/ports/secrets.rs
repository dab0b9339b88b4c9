use async_trait::async_trait;
use std::collections::HashMap;

/// Errors raised while reading a secret
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SecretsError {
    #[error("Secret fetch failed: {0}")]
    Fetch(String),

    #[error("Secret '{name}' is not a JSON object of strings: {reason}")]
    Malformed { name: String, reason: String },
}

/// Port for the secret store consulted once at startup
#[async_trait]
pub trait SecretsProvider: Send + Sync + 'static {
    /// Fetch a secret as flat key/value pairs; `None` if it has no string payload
    async fn fetch_secret(&self, name: &str) -> Result<Option<HashMap<String, String>>, SecretsError>;
}

/// Parse a JSON secret payload into flat string pairs.
///
/// Scalar values are stringified; nested values are rejected.
pub fn parse_secret_string(
    name: &str,
    payload: &str,
) -> Result<HashMap<String, String>, SecretsError> {
    let malformed = |reason: String| SecretsError::Malformed {
        name: name.to_string(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| malformed("top-level value is not an object".to_string()))?;

    object
        .iter()
        .map(|(field, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => return Err(malformed(format!("field '{}' is not a scalar", field))),
            };
            Ok((field.clone(), value))
        })
        .collect()
}

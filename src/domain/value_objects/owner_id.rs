use crate::domain::errors::ValidationError;

/// Identifier of the supplier record an image belongs to.
///
/// Only used to derive predictable object keys, so it must not contain the
/// key separator or the `-` that splits the owner from the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(ValidationError::EmptyOwnerId);
        }

        if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
            return Err(ValidationError::InvalidOwnerIdCharacter(c));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for OwnerId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

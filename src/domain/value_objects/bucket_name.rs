use crate::domain::errors::ValidationError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 63;

/// Name of the bucket holding supplier photos, as read from `S3_BUCKET`.
///
/// Checked against the S3 naming rules before any request goes out, so a
/// mistyped secret surfaces as a configuration error rather than a remote one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.len();
        if len < MIN_LEN {
            return Err(ValidationError::BucketNameTooShort {
                actual: len,
                min: MIN_LEN,
            });
        }
        if len > MAX_LEN {
            return Err(ValidationError::BucketNameTooLong {
                actual: len,
                max: MAX_LEN,
            });
        }

        if let Some(c) = value.chars().find(|&c| !is_label_char(c) && c != '.') {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }
        if !value.starts_with(is_label_char) {
            return Err(ValidationError::BucketNameInvalidStart);
        }
        if !value.ends_with(is_label_char) {
            return Err(ValidationError::BucketNameInvalidEnd);
        }
        if value.contains("--") {
            return Err(ValidationError::BucketNameConsecutiveHyphens);
        }
        if value.parse::<std::net::Ipv4Addr>().is_ok() {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// Parse the configured setting; a missing or blank value is `None`
    pub fn from_setting(value: Option<String>) -> Result<Option<Self>, ValidationError> {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Self::new(v.to_string()).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_photo_bucket_names() {
        for name in ["student-photos", "photos123", "123photos", "photos.example.com"] {
            assert_eq!(BucketName::new(name.to_string()).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rejects_invalid_names() {
        let check = |name: &str| BucketName::new(name.to_string()).unwrap_err();

        assert_eq!(
            check("ab"),
            ValidationError::BucketNameTooShort { actual: 2, min: 3 }
        );
        assert!(matches!(
            check(&"p".repeat(64)),
            ValidationError::BucketNameTooLong { actual: 64, .. }
        ));
        assert_eq!(check("-photos"), ValidationError::BucketNameInvalidStart);
        assert_eq!(check("photos."), ValidationError::BucketNameInvalidEnd);
        assert_eq!(
            check("Student-Photos"),
            ValidationError::BucketNameInvalidCharacter('S')
        );
        assert_eq!(
            check("student_photos"),
            ValidationError::BucketNameInvalidCharacter('_')
        );
        assert_eq!(check("student--photos"), ValidationError::BucketNameConsecutiveHyphens);
        assert_eq!(check("192.168.1.1"), ValidationError::BucketNameLooksLikeIpAddress);
    }

    #[test]
    fn test_from_setting() {
        assert_eq!(BucketName::from_setting(None).unwrap(), None);
        assert_eq!(BucketName::from_setting(Some("  ".to_string())).unwrap(), None);
        assert_eq!(
            BucketName::from_setting(Some(" student-photos ".to_string()))
                .unwrap()
                .unwrap()
                .as_str(),
            "student-photos"
        );
        assert!(BucketName::from_setting(Some("Bad_Bucket".to_string())).is_err());
    }
}

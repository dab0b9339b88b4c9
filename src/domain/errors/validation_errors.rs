/// Rejected keys, bucket settings and photo uploads
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Object key cannot be empty")]
    EmptyObjectKey,
    #[error("Object key too long: {actual} bytes (max: {max})")]
    ObjectKeyTooLong { actual: usize, max: usize },
    #[error("Invalid character in object key: '{}'", .0.escape_default())]
    InvalidObjectKeyCharacter(char),
    #[error("Object key cannot start with '/'")]
    ObjectKeyStartsWithSlash,
    #[error("Object key cannot contain '//'")]
    ObjectKeyContainsDoubleSlash,

    #[error("photo bucket name has {actual} chars, S3 requires at least {min}")]
    BucketNameTooShort { actual: usize, min: usize },
    #[error("photo bucket name has {actual} chars, S3 allows at most {max}")]
    BucketNameTooLong { actual: usize, max: usize },
    #[error("photo bucket name must begin with a lowercase letter or digit")]
    BucketNameInvalidStart,
    #[error("photo bucket name must end with a lowercase letter or digit")]
    BucketNameInvalidEnd,
    #[error("photo bucket name contains '{0}'; use lowercase letters, digits, '.' and '-'")]
    BucketNameInvalidCharacter(char),
    #[error("photo bucket name cannot contain '--'")]
    BucketNameConsecutiveHyphens,
    #[error("photo bucket name cannot be an IPv4 address")]
    BucketNameLooksLikeIpAddress,

    #[error("Owner id cannot be empty")]
    EmptyOwnerId,
    #[error("Invalid character in owner id: '{}'", .0.escape_default())]
    InvalidOwnerIdCharacter(char),

    #[error("Photo is too large: {actual} bytes (max: {max} bytes)")]
    PhotoTooLarge { actual: usize, max: usize },
    #[error("Only image files are allowed (got '{0}')")]
    UnsupportedPhotoType(String),
}

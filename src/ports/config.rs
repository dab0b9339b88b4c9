/// Runtime settings that may be supplied by the environment or the secret store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    DbHost,
    DbUser,
    DbPassword,
    DbName,
    AwsRegion,
    S3Bucket,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::DbHost,
        ConfigKey::DbUser,
        ConfigKey::DbPassword,
        ConfigKey::DbName,
        ConfigKey::AwsRegion,
        ConfigKey::S3Bucket,
    ];

    /// Environment variable that supplies the startup value
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigKey::DbHost => "APP_DB_HOST",
            ConfigKey::DbUser => "APP_DB_USER",
            ConfigKey::DbPassword => "APP_DB_PASSWORD",
            ConfigKey::DbName => "APP_DB_NAME",
            ConfigKey::AwsRegion => "AWS_REGION",
            ConfigKey::S3Bucket => "S3_BUCKET",
        }
    }

    /// Field name inside the JSON secret
    pub fn secret_field(self) -> &'static str {
        match self {
            ConfigKey::DbHost => "host",
            ConfigKey::DbUser => "user",
            ConfigKey::DbPassword => "password",
            ConfigKey::DbName => "db",
            ConfigKey::AwsRegion => "AWS_REGION",
            ConfigKey::S3Bucket => "S3_BUCKET",
        }
    }

    pub fn from_secret_field(field: &str) -> Option<ConfigKey> {
        Self::ALL.into_iter().find(|key| key.secret_field() == field)
    }

    /// Hardcoded default used when nothing else supplies a value
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            ConfigKey::AwsRegion => Some("us-east-1"),
            _ => None,
        }
    }

    /// Value installed when the secret store cannot be reached
    pub fn fallback_value(self) -> Option<&'static str> {
        match self {
            ConfigKey::DbHost => Some("localhost"),
            ConfigKey::DbUser => Some("nodeapp"),
            ConfigKey::DbPassword => Some("student12"),
            ConfigKey::DbName => Some("STUDENTS"),
            ConfigKey::AwsRegion | ConfigKey::S3Bucket => None,
        }
    }

    /// Whether values for this key must be kept out of logs
    pub fn is_sensitive(self) -> bool {
        matches!(self, ConfigKey::DbPassword)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.env_var())
    }
}

/// Read access to runtime settings.
///
/// Components read through this on every use instead of capturing values at
/// construction time.
pub trait ConfigProvider: Send + Sync + 'static {
    /// Current value for `key`; blank values count as unset
    fn get(&self, key: ConfigKey) -> Option<String>;
}

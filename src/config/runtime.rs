use std::{
    collections::HashMap,
    sync::{OnceLock, PoisonError, RwLock},
};

use tracing::info;

use crate::ports::config::{ConfigKey, ConfigProvider};

/// Process-wide settings shared by every component.
///
/// Lookup order is override, secret overlay, startup value, default. Each
/// overlay field can be set once; later writes are ignored.
pub struct RuntimeConfig {
    startup: HashMap<ConfigKey, String>,
    overlay: [OnceLock<String>; ConfigKey::ALL.len()],
    overrides: RwLock<HashMap<ConfigKey, String>>,
}

impl RuntimeConfig {
    /// Empty configuration that only knows the defaults table
    pub fn new() -> Self {
        Self {
            startup: HashMap::new(),
            overlay: std::array::from_fn(|_| OnceLock::new()),
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Startup values taken from the process environment
    pub fn from_env() -> Self {
        ConfigKey::ALL
            .into_iter()
            .fold(Self::new(), |config, key| match std::env::var(key.env_var()) {
                Ok(value) => config.with_value(key, value),
                Err(_) => config,
            })
    }

    /// Set a startup value; blank values are ignored
    pub fn with_value(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.startup.insert(key, value);
        }
        self
    }

    /// Install a value from the secret store. Returns false if one was already set.
    pub fn apply_secret(&self, key: ConfigKey, value: impl Into<String>) -> bool {
        self.overlay[key.index()].set(value.into()).is_ok()
    }

    /// Force a value regardless of the other layers; `None` clears the override.
    /// A blank override makes the key read as unset.
    pub fn set_override(&self, key: ConfigKey, value: Option<String>) {
        let mut overrides = self.overrides.write().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(value) => overrides.insert(key, value),
            None => overrides.remove(&key),
        };
    }

    /// Keys the environment did not supply
    pub fn missing_from_startup(&self) -> Vec<ConfigKey> {
        ConfigKey::ALL
            .into_iter()
            .filter(|key| !self.startup.contains_key(key))
            .collect()
    }

    /// Log a notice for every key that falls back to its default
    pub fn log_missing(&self) {
        for key in self.missing_from_startup() {
            info!(
                "[NOTICE] Value for key '{}' not found in ENV, using default value",
                key
            );
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for RuntimeConfig {
    fn get(&self, key: ConfigKey) -> Option<String> {
        let value = {
            let overrides = self.overrides.read().unwrap_or_else(PoisonError::into_inner);
            overrides.get(&key).cloned()
        };

        let value = value
            .or_else(|| self.overlay[key.index()].get().cloned())
            .or_else(|| self.startup.get(&key).cloned())
            .or_else(|| key.default_value().map(str::to_string));

        value.filter(|v| !v.trim().is_empty())
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for key in ConfigKey::ALL {
            let value = match self.get(key) {
                Some(_) if key.is_sensitive() => Some("[REDACTED]".to_string()),
                other => other,
            };
            map.entry(&key.env_var(), &value);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::new();
        assert_eq!(config.get(ConfigKey::AwsRegion).as_deref(), Some("us-east-1"));
        assert_eq!(config.get(ConfigKey::S3Bucket), None);
    }

    #[test]
    fn test_precedence() {
        let config = RuntimeConfig::new().with_value(ConfigKey::S3Bucket, "from-env");
        assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("from-env"));

        assert!(config.apply_secret(ConfigKey::S3Bucket, "from-secret"));
        assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("from-secret"));

        config.set_override(ConfigKey::S3Bucket, Some("from-test".to_string()));
        assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("from-test"));

        config.set_override(ConfigKey::S3Bucket, None);
        assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("from-secret"));
    }

    #[test]
    fn test_secret_is_write_once() {
        let config = RuntimeConfig::new();
        assert!(config.apply_secret(ConfigKey::DbUser, "first"));
        assert!(!config.apply_secret(ConfigKey::DbUser, "second"));
        assert_eq!(config.get(ConfigKey::DbUser).as_deref(), Some("first"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = RuntimeConfig::new().with_value(ConfigKey::S3Bucket, "   ");
        assert_eq!(config.get(ConfigKey::S3Bucket), None);
        assert!(config.missing_from_startup().contains(&ConfigKey::S3Bucket));

        config.set_override(ConfigKey::AwsRegion, Some(String::new()));
        assert_eq!(config.get(ConfigKey::AwsRegion), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RuntimeConfig::new().with_value(ConfigKey::DbPassword, "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}

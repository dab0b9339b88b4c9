use tracing::{debug, info, warn};

use super::RuntimeConfig;
use crate::ports::{
    config::{ConfigKey, ConfigProvider},
    secrets::SecretsProvider,
};

/// What the one-time secret fetch did to the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The secret was read; `applied` lists the keys it supplied
    Loaded { applied: Vec<ConfigKey> },
    /// The secret was unavailable and fallback values were installed
    Fallback { reason: String },
}

/// Populate the configuration overlay from the secret store.
///
/// Never fails: an unreachable or empty secret installs the fallback database
/// settings for any key the environment did not provide, and leaves the
/// bucket unset.
pub async fn bootstrap_secrets(
    config: &RuntimeConfig,
    provider: &dyn SecretsProvider,
    secret_name: &str,
) -> BootstrapOutcome {
    let reason = match provider.fetch_secret(secret_name).await {
        Ok(Some(secret)) => {
            let mut applied = Vec::new();
            for (field, value) in secret {
                let Some(key) = ConfigKey::from_secret_field(&field) else {
                    debug!(field = %field, "ignoring unrecognized secret field");
                    continue;
                };
                if config.apply_secret(key, value) {
                    applied.push(key);
                }
            }
            applied.sort_by_key(|key| key.index());
            info!(secret = %secret_name, applied = applied.len(), "loaded settings from secret store");
            return BootstrapOutcome::Loaded { applied };
        }
        Ok(None) => format!("secret '{}' has no string payload", secret_name),
        Err(e) => e.to_string(),
    };

    for key in ConfigKey::ALL {
        if let Some(fallback) = key.fallback_value() {
            if config.get(key).is_none() {
                config.apply_secret(key, fallback);
            }
        }
    }

    warn!(reason = %reason, "Secrets not found. Proceeding with default values..");
    BootstrapOutcome::Fallback { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::secrets::StaticSecretsProvider;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_loaded_secret_overrides_env() {
        let config = RuntimeConfig::new().with_value(ConfigKey::DbHost, "env-host");
        let provider = StaticSecretsProvider::with_secret(
            "Mydbsecret",
            HashMap::from([
                ("host".to_string(), "secret-host".to_string()),
                ("S3_BUCKET".to_string(), "student-photos".to_string()),
                ("engine".to_string(), "mysql".to_string()),
            ]),
        );

        let outcome = bootstrap_secrets(&config, &provider, "Mydbsecret").await;

        assert_eq!(
            outcome,
            BootstrapOutcome::Loaded {
                applied: vec![ConfigKey::DbHost, ConfigKey::S3Bucket]
            }
        );
        assert_eq!(config.get(ConfigKey::DbHost).as_deref(), Some("secret-host"));
        assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("student-photos"));
    }

    #[tokio::test]
    async fn test_unreachable_store_installs_fallbacks() {
        let config = RuntimeConfig::new().with_value(ConfigKey::DbUser, "env-user");
        let provider = StaticSecretsProvider::unreachable("connection refused");

        let outcome = bootstrap_secrets(&config, &provider, "Mydbsecret").await;

        assert!(matches!(outcome, BootstrapOutcome::Fallback { .. }));
        assert_eq!(config.get(ConfigKey::DbHost).as_deref(), Some("localhost"));
        assert_eq!(config.get(ConfigKey::DbName).as_deref(), Some("STUDENTS"));
        assert_eq!(config.get(ConfigKey::DbPassword).as_deref(), Some("student12"));
        assert_eq!(config.get(ConfigKey::DbUser).as_deref(), Some("env-user"));
        assert_eq!(config.get(ConfigKey::S3Bucket), None);
    }

    #[tokio::test]
    async fn test_missing_secret_installs_fallbacks() {
        let config = RuntimeConfig::new();
        let provider = StaticSecretsProvider::default();

        let outcome = bootstrap_secrets(&config, &provider, "Mydbsecret").await;

        assert!(matches!(outcome, BootstrapOutcome::Fallback { .. }));
        assert_eq!(config.get(ConfigKey::DbUser).as_deref(), Some("nodeapp"));
    }
}

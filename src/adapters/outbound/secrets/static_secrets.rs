use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::secrets::{SecretsError, SecretsProvider};

/// Secret store held in memory, for development and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSecretsProvider {
    secrets: HashMap<String, HashMap<String, String>>,
    failure: Option<String>,
}

impl StaticSecretsProvider {
    pub fn with_secret(name: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            secrets: HashMap::from([(name.into(), values)]),
            failure: None,
        }
    }

    /// A store whose every fetch fails with `reason`
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            secrets: HashMap::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl SecretsProvider for StaticSecretsProvider {
    async fn fetch_secret(
        &self,
        name: &str,
    ) -> Result<Option<HashMap<String, String>>, SecretsError> {
        if let Some(reason) = &self.failure {
            return Err(SecretsError::Fetch(reason.clone()));
        }
        Ok(self.secrets.get(name).cloned())
    }
}

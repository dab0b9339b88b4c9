use async_trait::async_trait;
use aws_sdk_secretsmanager::{error::DisplayErrorContext, Client};
use std::collections::HashMap;
use tracing::debug;

use crate::ports::secrets::{parse_secret_string, SecretsError, SecretsProvider};

/// Secret store backed by AWS Secrets Manager.
///
/// Credentials come from the standard AWS environment chain.
pub struct AwsSecretsManagerProvider {
    client: Client,
}

impl AwsSecretsManagerProvider {
    pub async fn new(region: &str, endpoint_url: Option<&str>) -> Self {
        let mut loader =
            aws_config::from_env().region(aws_config::Region::new(region.to_string()));

        if let Some(endpoint) = endpoint_url {
            debug!(endpoint = %endpoint, "using custom Secrets Manager endpoint");
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretsProvider for AwsSecretsManagerProvider {
    async fn fetch_secret(
        &self,
        name: &str,
    ) -> Result<Option<HashMap<String, String>>, SecretsError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| SecretsError::Fetch(DisplayErrorContext(&e).to_string()))?;

        output
            .secret_string()
            .map(|payload| parse_secret_string(name, payload))
            .transpose()
    }
}

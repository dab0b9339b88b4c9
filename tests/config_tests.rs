use bytes::Bytes;
use std::{collections::HashMap, sync::Arc};
use supplier_directory::{
    bootstrap_secrets, create_in_memory_app, BootstrapOutcome, ConfigKey,
    ConfigProvider, ImageService, RuntimeConfig, StaticSecretsProvider,
};

fn secret() -> StaticSecretsProvider {
    StaticSecretsProvider::with_secret(
        "Mydbsecret",
        HashMap::from([
            ("host".to_string(), "db.internal".to_string()),
            ("user".to_string(), "admin".to_string()),
            ("password".to_string(), "from-secret".to_string()),
            ("db".to_string(), "STUDENTS".to_string()),
            ("S3_BUCKET".to_string(), "secret-bucket".to_string()),
            ("AWS_REGION".to_string(), "eu-west-1".to_string()),
        ]),
    )
}

#[tokio::test]
async fn secret_values_win_over_environment() {
    let config = RuntimeConfig::new()
        .with_value(ConfigKey::S3Bucket, "env-bucket")
        .with_value(ConfigKey::DbHost, "env-host");

    let outcome = bootstrap_secrets(&config, &secret(), "Mydbsecret").await;
    assert!(matches!(outcome, BootstrapOutcome::Loaded { ref applied } if applied.len() == 6));

    assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("secret-bucket"));
    assert_eq!(config.get(ConfigKey::DbHost).as_deref(), Some("db.internal"));
    assert_eq!(config.get(ConfigKey::AwsRegion).as_deref(), Some("eu-west-1"));
}

#[tokio::test]
async fn second_bootstrap_does_not_overwrite() {
    let config = RuntimeConfig::new();
    bootstrap_secrets(&config, &secret(), "Mydbsecret").await;

    let other = StaticSecretsProvider::with_secret(
        "Mydbsecret",
        HashMap::from([("S3_BUCKET".to_string(), "other-bucket".to_string())]),
    );
    let outcome = bootstrap_secrets(&config, &other, "Mydbsecret").await;

    assert_eq!(outcome, BootstrapOutcome::Loaded { applied: vec![] });
    assert_eq!(config.get(ConfigKey::S3Bucket).as_deref(), Some("secret-bucket"));
}

#[tokio::test]
async fn failed_fetch_keeps_bucket_unset() {
    let config = RuntimeConfig::new();
    let outcome = bootstrap_secrets(
        &config,
        &StaticSecretsProvider::unreachable("timed out"),
        "Mydbsecret",
    )
    .await;

    assert_eq!(
        outcome,
        BootstrapOutcome::Fallback {
            reason: "Secret fetch failed: timed out".to_string()
        }
    );
    assert_eq!(config.get(ConfigKey::DbHost).as_deref(), Some("localhost"));
    assert_eq!(config.get(ConfigKey::DbUser).as_deref(), Some("nodeapp"));
    assert_eq!(config.get(ConfigKey::AwsRegion).as_deref(), Some("us-east-1"));
    assert_eq!(config.get(ConfigKey::S3Bucket), None);
}

#[tokio::test]
async fn app_reads_settings_loaded_after_construction() {
    let config = Arc::new(RuntimeConfig::new());
    let app = create_in_memory_app(config.clone()).await.unwrap();

    let before = app
        .image_service
        .create_image(Bytes::from_static(b"jpeg"), "image/jpeg", None)
        .await;
    assert!(before.unwrap_err().is_configuration());

    bootstrap_secrets(&config, &secret(), "Mydbsecret").await;

    let image = app
        .image_service
        .create_image(Bytes::from_static(b"jpeg"), "image/jpeg", None)
        .await
        .unwrap()
        .unwrap();
    assert!(image
        .url
        .starts_with("https://secret-bucket.s3.eu-west-1.amazonaws.com/suppliers/"));

    let probe = app.image_service.probe().await.unwrap();
    assert_eq!(probe.bucket, "secret-bucket");
    assert_eq!(probe.region, "eu-west-1");
}

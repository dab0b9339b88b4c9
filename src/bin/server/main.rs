use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use supplier_directory::{
    adapters::outbound::secrets::{AwsSecretsManagerProvider, StaticSecretsProvider},
    app::{AppBuilder, AppConfig, RepositoryBackend, StorageBackend},
    config::{bootstrap_secrets, BootstrapOutcome, RuntimeConfig},
    ports::{
        config::{ConfigKey, ConfigProvider},
        secrets::SecretsProvider,
    },
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "supplier-server")]
#[command(about = "Student directory with photos stored in S3", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "APP_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (s3 or memory)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "s3")]
    storage_backend: String,

    /// Repository backend type (database or memory)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "database")]
    repository_backend: String,

    /// Endpoint of an S3-compatible store
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Origin used to build photo URLs
    #[arg(long, env = "S3_PUBLIC_BASE_URL")]
    s3_public_base_url: Option<String>,

    /// Secret holding DB credentials and the bucket name
    #[arg(long, env = "APP_SECRET_NAME", default_value = "Mydbsecret")]
    secret_name: String,

    /// Do not contact the secret store; fallback DB settings are used
    #[arg(long, env = "SKIP_SECRETS")]
    skip_secrets: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3 {
                endpoint: self.s3_endpoint.clone(),
            },
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => RepositoryBackend::Database,
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            public_base_url: self.s3_public_base_url.clone(),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", level)));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

/// Fill the configuration overlay from the secret store before anything reads it
async fn load_secrets(cli: &Cli, runtime: &RuntimeConfig) -> BootstrapOutcome {
    let provider: Box<dyn SecretsProvider> = if cli.skip_secrets {
        Box::new(StaticSecretsProvider::unreachable("secret store disabled"))
    } else {
        let region = runtime
            .get(ConfigKey::AwsRegion)
            .unwrap_or_else(|| "us-east-1".to_string());
        Box::new(AwsSecretsManagerProvider::new(&region, None).await)
    };

    bootstrap_secrets(runtime, provider.as_ref(), &cli.secret_name).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting supplier server");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Repository backend: {}", cli.repository_backend);

    let config = cli.to_app_config()?;

    let runtime = RuntimeConfig::from_env();
    runtime.log_missing();

    match load_secrets(&cli, &runtime).await {
        BootstrapOutcome::Loaded { applied } => {
            info!(secret = %cli.secret_name, keys = ?applied, "secrets loaded")
        }
        BootstrapOutcome::Fallback { reason } => warn!(reason = %reason, "using fallback settings"),
    }
    if runtime.get(ConfigKey::S3Bucket).is_none() {
        warn!("S3_BUCKET is not set; photo operations will fail until it is");
    }

    let app = AppBuilder::new(Arc::new(runtime))
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;
    let router = app.router().context("Failed to build router")?;

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}.", cli.port);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}

mod aws_secrets_manager;
mod static_secrets;

pub use aws_secrets_manager::AwsSecretsManagerProvider;
pub use static_secrets::StaticSecretsProvider;

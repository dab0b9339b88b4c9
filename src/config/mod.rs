//! Runtime configuration: defaults, startup values from the environment, and
//! a write-once overlay filled from the secret store.

mod bootstrap;
mod runtime;

pub use bootstrap::{bootstrap_secrets, BootstrapOutcome};
pub use runtime::RuntimeConfig;

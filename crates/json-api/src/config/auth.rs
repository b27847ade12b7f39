//! Auth Config

use clap::Args;

/// Session verification settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify session token verifiers
    #[arg(long, env = "SESSION_SIGNING_KEY", hide_env_values = true)]
    pub session_signing_key: String,
}

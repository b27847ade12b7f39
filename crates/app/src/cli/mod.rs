use clap::{Args, Parser, Subcommand};
use shopform_app::{
    auth::{PgAuthService, SessionKey},
    database,
};

mod db;
mod session;

#[derive(Debug, Parser)]
#[command(name = "shopform-app", about = "Shopform CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Session(session::SessionCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Session(command) => session::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection settings shared by every session command.
#[derive(Debug, Args)]
pub(crate) struct AuthArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Secret used to sign session token verifiers
    #[arg(long, env = "SESSION_SIGNING_KEY", hide_env_values = true)]
    session_signing_key: String,
}

impl AuthArgs {
    pub(crate) async fn connect(self) -> Result<PgAuthService, String> {
        let key = SessionKey::new(self.session_signing_key)
            .map_err(|error| format!("invalid session signing key: {error}"))?;

        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(PgAuthService::new(pool, key))
    }
}

//! Database Config

use clap::Args;

/// Postgres database holding sessions and submissions.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

impl DatabaseConfig {
    /// The connection string with any password masked, for logs.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let url = self.database_url.as_str();

        let Some((scheme, rest)) = url.split_once("://") else {
            return url.to_string();
        };

        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return url.to_string();
        };

        match userinfo.split_once(':') {
            Some((user, _password)) => format!("{scheme}://{user}:***@{host}"),
            None => url.to_string(),
        }
    }
}

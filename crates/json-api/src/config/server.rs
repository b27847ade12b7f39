//! Server Config

use clap::Args;

/// Listener settings for the shop form server.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the storefront proxy and admin clients connect to
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the storefront app proxy forwards to
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding. IPv6 hosts are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

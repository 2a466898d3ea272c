//! HTTP server section: bind address, environment, logging, timeouts.

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for the webhook HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address. An IP address, not a hostname; name resolution is
    /// not attempted at bind time.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,

    /// Log filter directive used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-request timeout in seconds. Must be longer than the AI
    /// timeout: a hanging provider call has to degrade inside the
    /// handler, not be cut off at the transport with a non-2xx that
    /// Telegram would redeliver.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Deployment environment the bot believes it runs in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl ServerConfig {
    /// Returns the validated bind address.
    ///
    /// Call after `validate`; an unparseable host is a config error,
    /// not a runtime one.
    pub fn socket_addr(&self) -> SocketAddr {
        self.parse_addr().expect("socket address was not validated")
    }

    /// Returns the per-request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether the bot runs against real users.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Checks the section for values that would only fail later.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.parse_addr().is_err() {
            return Err(ValidationError::InvalidBindAddress);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    fn parse_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info,jurconsult_bot=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

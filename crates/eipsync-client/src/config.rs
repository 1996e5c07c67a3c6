//! Connection configuration for the IPAM and NAC APIs.
//!
//! Both remote systems are reached over HTTPS with a host, port, username
//! and password. Configuration is built explicitly (from a settings file by
//! the CLI, or directly in tests) or loaded from environment variables.

use url::Url;
use zeroize::Zeroizing;

/// Default HTTPS port of the IPAM appliance.
pub const DEFAULT_IPAM_PORT: u16 = 443;

/// Default HTTPS port of the NAC management server.
pub const DEFAULT_NAC_PORT: u16 = 8443;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to one remote system.
///
/// Custom `Debug` implementation redacts the `password` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Base URL, e.g. `https://ipam.example.net:443/`.
    pub base_url: Url,
    /// API username.
    pub username: String,
    /// API password, wiped from memory on drop.
    pub password: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Skip TLS certificate verification (self-signed appliances).
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl ConnectionConfig {
    /// Build an HTTPS configuration from host and port, with default timeout
    /// and certificate verification enabled.
    pub fn https(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let raw = format!("https://{host}:{port}/");
        let base_url =
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw.clone(), e.to_string()))?;
        Ok(Self {
            base_url,
            username: username.into(),
            password: Zeroizing::new(password.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
        })
    }

    /// Load configuration from environment variables under `prefix`.
    ///
    /// Variables:
    /// - `{prefix}_HOST` (required)
    /// - `{prefix}_PORT` (default: `default_port`)
    /// - `{prefix}_USERNAME` (required)
    /// - `{prefix}_PASSWORD` (required)
    /// - `EIPSYNC_TIMEOUT_SECS` (default: 30)
    /// - `EIPSYNC_INSECURE_TLS` (`true`/`1` to skip certificate checks)
    pub fn from_env(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        let host = required_var(&format!("{prefix}_HOST"))?;
        let port_var = format!("{prefix}_PORT");
        let port = match std::env::var(&port_var) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port_var, raw))?,
            Err(_) => default_port,
        };
        let username = required_var(&format!("{prefix}_USERNAME"))?;
        let password = required_var(&format!("{prefix}_PASSWORD"))?;

        let mut config = Self::https(&host, port, username, password)?;
        config.timeout_secs = std::env::var("EIPSYNC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.accept_invalid_certs = std::env::var("EIPSYNC_INSECURE_TLS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        Ok(config)
    }

    /// IPAM configuration from `EIP_*` variables.
    pub fn ipam_from_env() -> Result<Self, ConfigError> {
        Self::from_env("EIP", DEFAULT_IPAM_PORT)
    }

    /// NAC configuration from `XMC_*` variables.
    pub fn nac_from_env() -> Result<Self, ConfigError> {
        Self::from_env("XMC", DEFAULT_NAC_PORT)
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(String),
    #[error("invalid port in {0}: {1}")]
    InvalidPort(String, String),
    #[error("invalid URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("credentials for {0} contain characters not allowed in an HTTP header")]
    InvalidCredential(String),
}

//! # Settings
//!
//! Connection parameters for both remote systems plus the logging switches.
//! Loaded from a YAML file when `--config` is given, otherwise from the
//! environment (`EIP_*`, `XMC_*`, `EIPSYNC_*`). Command-line flags are
//! applied on top by `main`.
//!
//! ```yaml
//! ipam:
//!   host: ipam.example.net
//!   username: ipmadmin
//!   password: secret
//! nac:
//!   host: xmc.example.net
//!   port: 8443
//!   username: root
//!   password: secret
//! timeout_secs: 30
//! accept_invalid_certs: false
//! debug: false
//! log_file: /var/log/eipsync.log
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use eipsync_client::config::{DEFAULT_IPAM_PORT, DEFAULT_NAC_PORT, DEFAULT_TIMEOUT_SECS};
use eipsync_client::{ConfigError, ConnectionConfig};

/// Errors while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        /// The file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The settings file is not valid YAML for this schema.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        /// The file path.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
    /// A connection block is invalid.
    #[error(transparent)]
    Connection(#[from] ConfigError),
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// IPAM connection.
    pub ipam: ConnectionConfig,
    /// NAC connection.
    pub nac: ConnectionConfig,
    /// Force debug-level logging.
    pub debug: bool,
    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    ipam: EndpointFile,
    nac: EndpointFile,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
    #[serde(default)]
    accept_invalid_certs: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointFile {
    host: String,
    #[serde(default)]
    port: Option<u16>,
    username: String,
    password: String,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|e| match e {
            SettingsError::Parse { source, .. } => SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    fn from_yaml(raw: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile =
            serde_yaml::from_str(raw).map_err(|source| SettingsError::Parse {
                path: PathBuf::new(),
                source,
            })?;

        let connection = |endpoint: EndpointFile, default_port: u16| {
            let mut config = ConnectionConfig::https(
                &endpoint.host,
                endpoint.port.unwrap_or(default_port),
                endpoint.username,
                endpoint.password,
            )?;
            config.timeout_secs = file.timeout_secs;
            config.accept_invalid_certs = file.accept_invalid_certs;
            Ok::<_, ConfigError>(config)
        };

        Ok(Self {
            ipam: connection(file.ipam, DEFAULT_IPAM_PORT)?,
            nac: connection(file.nac, DEFAULT_NAC_PORT)?,
            debug: file.debug,
            log_file: file.log_file,
        })
    }

    /// Load settings from environment variables.
    ///
    /// Besides the connection variables read by [`ConnectionConfig::from_env`]:
    /// - `EIPSYNC_DEBUG` (`true`/`1` to force debug logging)
    /// - `EIPSYNC_LOG_FILE` (path of the log sink)
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            ipam: ConnectionConfig::ipam_from_env()?,
            nac: ConnectionConfig::nac_from_env()?,
            debug: std::env::var("EIPSYNC_DEBUG")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
            log_file: std::env::var_os("EIPSYNC_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Load from `path` when given, otherwise from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Override the request timeout on both connections.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.ipam.timeout_secs = timeout_secs;
        self.nac.timeout_secs = timeout_secs;
        self
    }

    /// Skip certificate verification on both connections.
    pub fn with_insecure_tls(mut self) -> Self {
        self.ipam.accept_invalid_certs = true;
        self.nac.accept_invalid_certs = true;
        self
    }
}

//! Remote API client error types.

use crate::config::ConfigError;

/// The remote system a call was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteSystem {
    /// EfficientIP SOLIDserver (IPAM).
    Ipam,
    /// ExtremeCloud IQ Site Engine (NAC).
    Nac,
}

impl std::fmt::Display for RemoteSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipam => write!(f, "EIP"),
            Self::Nac => write!(f, "XMC"),
        }
    }
}

/// Errors from IPAM and NAC API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connect, TLS, timeout, body read).
    #[error("HTTP error calling {system} {endpoint}: {source}")]
    Http {
        system: RemoteSystem,
        endpoint: String,
        source: reqwest::Error,
    },
    /// The remote system returned a non-2xx status.
    #[error("{system} {endpoint} returned {status}: {body}")]
    ApiError {
        system: RemoteSystem,
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The remote system involved, if the error came from a call.
    pub fn system(&self) -> Option<RemoteSystem> {
        match self {
            Self::Http { system, .. } | Self::ApiError { system, .. } => Some(*system),
            Self::Config(_) => None,
        }
    }
}

//! # eipsync-client -- Typed Rust clients for the IPAM and NAC APIs
//!
//! Provides the three remote calls a sync invocation makes:
//! - **Reservation lookup** via SOLIDserver `GET /rest/ip_address_list`
//! - **Reservation update** via SOLIDserver `PUT /rest/ip_add`
//! - **Group assignment** via Site Engine `NACWebService/addMACToEndSystemGroup`
//!
//! ## Architecture
//!
//! Each client wraps a `reqwest::Client` built from a [`ConnectionConfig`]
//! with the system-specific authentication baked into the request builder.
//! The workflow is written against the [`ReservationService`] and
//! [`GroupService`] traits, which these clients implement.
//!
//! Retries are NOT performed: every transport or status failure is returned
//! to the caller on the first attempt.

pub mod config;
pub mod error;
pub mod ipam;
pub mod nac;
pub mod service;

pub use config::{ConfigError, ConnectionConfig};
pub use error::{ClientError, RemoteSystem};
pub use ipam::IpamClient;
pub use nac::NacClient;
pub use service::{GroupService, ReservationService};

use std::time::Duration;

/// Build the shared `reqwest::Client` for one remote system.
fn build_http(
    config: &ConnectionConfig,
    system: RemoteSystem,
    headers: reqwest::header::HeaderMap,
) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .default_headers(headers)
        .build()
        .map_err(|e| ClientError::Http {
            system,
            endpoint: "client_init".into(),
            source: e,
        })
}

/// Map a sent request to a body, failing on transport errors and non-2xx.
async fn read_success(
    result: Result<reqwest::Response, reqwest::Error>,
    system: RemoteSystem,
    endpoint: &str,
) -> Result<String, ClientError> {
    let resp = result.map_err(|e| ClientError::Http {
        system,
        endpoint: endpoint.into(),
        source: e,
    })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| ClientError::Http {
        system,
        endpoint: endpoint.into(),
        source: e,
    })?;
    tracing::debug!(%system, endpoint, status = status.as_u16(), %body, "response");

    if !status.is_success() {
        return Err(ClientError::ApiError {
            system,
            endpoint: endpoint.into(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

//! Typed client for the EfficientIP SOLIDserver REST API.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/rest/ip_address_list?WHERE=mac_addr like '<mac>'` | Find address records by hardware address |
//! | PUT    | `/rest/ip_add?ip_id=..&site_id=..&mac_addr=..&ip_class_parameters=..` | Update an address record |
//!
//! ## Authentication
//!
//! SOLIDserver takes the credentials as base64-encoded `X-IPM-Username` and
//! `X-IPM-Password` headers on every request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL};

use eipsync_core::{AllocationMode, MacAddress, Reservation};

use crate::config::{ConfigError, ConnectionConfig};
use crate::error::{ClientError, RemoteSystem};
use crate::service::ReservationService;

const LOOKUP_PATH: &str = "rest/ip_address_list";
const UPDATE_PATH: &str = "rest/ip_add";

const USERNAME_HEADER: &str = "x-ipm-username";
const PASSWORD_HEADER: &str = "x-ipm-password";

/// Client for the SOLIDserver address-record API.
#[derive(Debug, Clone)]
pub struct IpamClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl IpamClient {
    /// Create a new IPAM client from configuration.
    pub fn new(config: &ConnectionConfig) -> Result<Self, ClientError> {
        let http = crate::build_http(config, RemoteSystem::Ipam, auth_headers(config)?)?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Find the address records registered for `mac`.
    ///
    /// Calls `GET {base_url}/rest/ip_address_list` and returns the raw body;
    /// record fields are extracted by the caller.
    pub async fn find_by_mac(&self, mac: &MacAddress) -> Result<String, ClientError> {
        let endpoint = "GET /rest/ip_address_list";
        let url = format!("{}{}", self.base_url, LOOKUP_PATH);
        let filter = format!("mac_addr like '{mac}'");
        tracing::debug!(%url, %filter, "requesting reservation lookup");

        let result = self
            .http
            .get(&url)
            .query(&[("WHERE", filter.as_str())])
            .send()
            .await;
        crate::read_success(result, RemoteSystem::Ipam, endpoint).await
    }

    /// Write class parameters onto a located record.
    ///
    /// Calls `PUT {base_url}/rest/ip_add`. The hardware address is sent only
    /// for static records.
    pub async fn update_record(
        &self,
        reservation: &Reservation,
        mac: &MacAddress,
        class_parameters: &str,
    ) -> Result<(), ClientError> {
        let endpoint = "PUT /rest/ip_add";
        let url = format!("{}{}", self.base_url, UPDATE_PATH);
        let query = update_query(reservation, mac, class_parameters);
        tracing::debug!(%url, ?query, "requesting reservation update");

        let result = self.http.put(&url).query(&query).send().await;
        crate::read_success(result, RemoteSystem::Ipam, endpoint).await?;
        Ok(())
    }
}

impl ReservationService for IpamClient {
    async fn lookup(&self, mac: &MacAddress) -> Result<String, ClientError> {
        self.find_by_mac(mac).await
    }

    async fn update(
        &self,
        reservation: &Reservation,
        mac: &MacAddress,
        class_parameters: &str,
    ) -> Result<(), ClientError> {
        self.update_record(reservation, mac, class_parameters).await
    }
}

fn auth_headers(config: &ConnectionConfig) -> Result<HeaderMap, ClientError> {
    let encode = |raw: &str| {
        HeaderValue::from_str(&STANDARD.encode(raw))
            .map_err(|_| ConfigError::InvalidCredential(config.base_url.to_string()))
    };

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(USERNAME_HEADER), encode(&config.username)?);
    let mut password = encode(config.password.as_str())?;
    password.set_sensitive(true);
    headers.insert(HeaderName::from_static(PASSWORD_HEADER), password);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no cache"));
    Ok(headers)
}

fn update_query<'a>(
    reservation: &'a Reservation,
    mac: &'a MacAddress,
    class_parameters: &'a str,
) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![
        ("ip_id", reservation.record.as_str()),
        ("site_id", reservation.site.as_str()),
    ];
    // Dynamic records are rejected during lookup, so this arm only matters
    // for callers that build a Reservation by hand.
    if reservation.allocation == AllocationMode::Static {
        query.push(("mac_addr", mac.as_str()));
    }
    query.push(("ip_class_parameters", class_parameters));
    query
}

//! Typed client for the ExtremeCloud IQ Site Engine NAC web service.
//!
//! Base path: `/axis/services/NACWebService`, HTTP basic authentication.

use eipsync_core::{GroupTag, MacAddress};

use crate::config::ConnectionConfig;
use crate::error::{ClientError, RemoteSystem};
use crate::service::GroupService;

const ADD_TO_GROUP_PATH: &str = "axis/services/NACWebService/addMACToEndSystemGroup";

/// Description recorded on the end-system group entry.
pub const ENTRY_DESCRIPTION: &str = "EIPautoadded";

/// Client for the Site Engine end-system group API.
#[derive(Clone)]
pub struct NacClient {
    http: reqwest::Client,
    base_url: url::Url,
    username: String,
    password: zeroize::Zeroizing<String>,
}

impl std::fmt::Debug for NacClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NacClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl NacClient {
    /// Create a new NAC client from configuration.
    pub fn new(config: &ConnectionConfig) -> Result<Self, ClientError> {
        let http = crate::build_http(config, RemoteSystem::Nac, Default::default())?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Add `mac` to end-system group `group`.
    ///
    /// Calls `GET {base_url}/axis/services/NACWebService/addMACToEndSystemGroup`
    /// with `reauthenticate=true` and `removeFromOtherGroups=true`, so the
    /// device ends up in exactly this group and is re-evaluated immediately.
    pub async fn add_mac_to_group(
        &self,
        mac: &MacAddress,
        group: &GroupTag,
    ) -> Result<(), ClientError> {
        let endpoint = "GET /NACWebService/addMACToEndSystemGroup";
        let url = format!("{}{}", self.base_url, ADD_TO_GROUP_PATH);
        tracing::debug!(%url, %group, %mac, "requesting group assignment");

        let result = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(self.password.as_str()))
            .query(&[
                ("endSystemGroup", group.as_str()),
                ("macAddress", mac.as_str()),
                ("description", ENTRY_DESCRIPTION),
                ("reauthenticate", "true"),
                ("removeFromOtherGroups", "true"),
            ])
            .send()
            .await;
        crate::read_success(result, RemoteSystem::Nac, endpoint).await?;
        tracing::debug!(%group, %mac, "added to group");
        Ok(())
    }
}

impl GroupService for NacClient {
    async fn assign(&self, mac: &MacAddress, group: &GroupTag) -> Result<(), ClientError> {
        self.add_mac_to_group(mac, group).await
    }
}

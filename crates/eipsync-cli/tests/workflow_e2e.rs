//! End-to-end workflow tests against mocked IPAM and NAC servers.
//!
//! Uses the real HTTP clients so the request shapes and the call ordering
//! are checked together. `.expect(0)` pins calls that must not happen.

use std::time::Duration;

use eipsync_cli::{run, Outcome, SyncError};
use eipsync_client::{ConnectionConfig, IpamClient, NacClient, RemoteSystem};
use eipsync_core::{GroupTag, PatternExtractor};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAC: &str = "00:11:22:33:44:55";
const LOOKUP_PATH: &str = "/rest/ip_address_list";
const UPDATE_PATH: &str = "/rest/ip_add";
const GROUP_PATH: &str = "/axis/services/NACWebService/addMACToEndSystemGroup";

fn config(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig {
        base_url: format!("{}/", server.uri()).parse().unwrap(),
        username: "admin".into(),
        password: zeroize::Zeroizing::new("secret".into()),
        timeout_secs: 5,
        accept_invalid_certs: false,
    }
}

/// Single-record lookup body in the SOLIDserver layout.
fn record(class_parameters: &str) -> String {
    format!(
        r#"[{{"ip_id":"42","site_id":"7","mac_addr":"{MAC}","ip_class_parameters":"{class_parameters}"}}]"#
    )
}

async fn mount_lookup(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_update(server: &MockServer, class_parameters: &str, times: u64) {
    Mock::given(method("PUT"))
        .and(path(UPDATE_PATH))
        .and(query_param("ip_id", "42"))
        .and(query_param("site_id", "7"))
        .and(query_param("mac_addr", MAC))
        .and(query_param("ip_class_parameters", class_parameters))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"ret_oid":"42"}]"#))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_assign(server: &MockServer, group: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(GROUP_PATH))
        .and(query_param("endSystemGroup", group))
        .and(query_param("macAddress", MAC))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(server)
        .await;
}

/// A connection nothing listens on.
fn unreachable_config() -> ConnectionConfig {
    ConnectionConfig {
        base_url: "http://127.0.0.1:1/".parse().unwrap(),
        username: "admin".into(),
        password: zeroize::Zeroizing::new("secret".into()),
        timeout_secs: 5,
        accept_invalid_certs: false,
    }
}

async fn invoke(
    tokens: &[&str],
    ipam_server: &MockServer,
    nac_server: &MockServer,
) -> (Result<Outcome, SyncError>, String) {
    invoke_with(tokens, &config(ipam_server), &config(nac_server)).await
}

async fn invoke_with(
    tokens: &[&str],
    ipam_config: &ConnectionConfig,
    nac_config: &ConnectionConfig,
) -> (Result<Outcome, SyncError>, String) {
    let ipam = IpamClient::new(ipam_config).unwrap();
    let nac = NacClient::new(nac_config).unwrap();
    let mut out = Vec::new();
    let result = run(tokens.iter().copied(), &ipam, &nac, &PatternExtractor, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn static_record_with_different_group_is_synced_and_reassigned() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=SalesVLAN&dhcpstatic=1")).await;
    mount_update(&ipam, "xmcstatus=Accept&xmcswitchport=ge.1.1&dhcpstatic=1", 1).await;
    mount_assign(&nac, "SalesVLAN", 1).await;

    let (result, out) = invoke(
        &["Mac", MAC, "Group", "Guest", "Status", "Accept", "SwitchPort", "ge.1.1"],
        &ipam,
        &nac,
    )
    .await;

    assert_eq!(
        result.unwrap(),
        Outcome::Reconciled {
            group: GroupTag::new("SalesVLAN")
        }
    );
    assert!(out.contains("IP_ID: 42"));
    assert!(out.contains("Site_ID: 7"));
}

#[tokio::test]
async fn matching_group_skips_nac() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=SalesVLAN&dhcpstatic=1")).await;
    mount_update(&ipam, "xmcstatus=Accept&dhcpstatic=1", 1).await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let (result, _) = invoke(
        &["Mac", MAC, "Group", "SalesVLAN,Guest", "Status", "Accept"],
        &ipam,
        &nac,
    )
    .await;

    assert!(matches!(result, Ok(Outcome::AlreadyCorrect { .. })));
}

#[tokio::test]
async fn dynamic_record_is_never_written() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=SalesVLAN&dhcpstatic=0&xmcstatus=x")).await;
    mount_update(&ipam, "xmcstatus=Accept&dhcpstatic=1", 0).await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let (result, out) = invoke(&["Mac", MAC, "Status", "Accept"], &ipam, &nac).await;

    let err = result.unwrap_err();
    assert_eq!(err.signal(), "DynamicAddress");
    assert_eq!(err.exit_code(), 7);
    assert!(out.is_empty());
}

#[tokio::test]
async fn unknown_mac_stops_after_lookup() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, "[]".to_string()).await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let (result, _) = invoke(&["Mac", MAC, "Status", "Accept"], &ipam, &nac).await;

    assert_eq!(result.unwrap_err().exit_code(), 6);
}

#[tokio::test]
async fn missing_mac_contacts_nothing() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ipam)
        .await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let (result, _) = invoke(&["Status", "Accept"], &ipam, &nac).await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.signal(), "Missing mandatory argument Mac followed by value.");
}

#[tokio::test]
async fn ipam_lookup_failure_names_eip() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&ipam)
        .await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let (result, _) = invoke(&["Mac", MAC, "Status", "Accept"], &ipam, &nac).await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 5);
    assert_eq!(err.signal(), "ERROR communicating to EIP");
}

#[tokio::test]
async fn nac_rejection_names_xmc() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=Printers&dhcpstatic=1")).await;
    mount_update(&ipam, "xmcauthtype=MAC&dhcpstatic=1", 1).await;
    Mock::given(method("GET"))
        .and(path(GROUP_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&nac)
        .await;

    let (result, _) = invoke(&["Mac", MAC, "Auth", "MAC"], &ipam, &nac).await;

    assert_eq!(result.unwrap_err().signal(), "ERROR communicating to XMC");
}

#[tokio::test]
async fn record_without_group_is_updated_then_reported() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("dhcpstatic=1")).await;
    mount_update(&ipam, "xmcstatus=Accept&dhcpstatic=1", 1).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&nac)
        .await;

    let (result, out) = invoke(&["Mac", MAC, "Status", "Accept"], &ipam, &nac).await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 9);
    assert_eq!(err.signal(), "No Group found in EIP to set");
    assert!(!out.contains("Device-type"));
}

#[tokio::test]
async fn unreachable_nac_is_transport_error_after_update() {
    let ipam = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=SalesVLAN&dhcpstatic=1")).await;
    mount_update(&ipam, "xmcstatus=Accept&dhcpstatic=1", 1).await;

    let (result, _) = invoke_with(
        &["Mac", MAC, "Status", "Accept"],
        &config(&ipam),
        &unreachable_config(),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert_eq!(err.signal(), "RequestException");
    assert_eq!(err.remote_system(), Some(RemoteSystem::Nac));

    let updates = ipam
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .count();
    assert_eq!(updates, 1);
}

#[tokio::test]
async fn timed_out_update_is_transport_error_and_skips_nac() {
    let ipam = MockServer::start().await;
    let nac = MockServer::start().await;
    mount_lookup(&ipam, record("xmcnacgroup=SalesVLAN&dhcpstatic=1")).await;
    Mock::given(method("PUT"))
        .and(path(UPDATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&ipam)
        .await;
    mount_assign(&nac, "SalesVLAN", 0).await;

    let mut ipam_config = config(&ipam);
    ipam_config.timeout_secs = 1;
    let (result, _) =
        invoke_with(&["Mac", MAC, "Status", "Accept"], &ipam_config, &config(&nac)).await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert_eq!(err.signal(), "RequestException");
    assert_eq!(err.remote_system(), Some(RemoteSystem::Ipam));
}

//! # Reservation Extraction
//!
//! Reads the IPAM address record for a device out of the raw body of an
//! `ip_address_list` lookup.
//!
//! The lookup body is not decoded structurally: its schema varies between
//! IPAM releases and the class parameters arrive as one URL-encoded string
//! inside it. [`PatternExtractor`] matches the few fields it needs as text.
//! Callers depend only on [`ReservationExtractor`], so a structured decoder
//! can be dropped in once the response contract is pinned down.
//!
//! ## Extraction order
//!
//! 1. record id (`ip_id`), otherwise [`LocateError::UnknownHardwareAddress`]
//! 2. dynamic DHCP marker, which yields [`LocateError::DynamicAddressNotSupported`]
//! 3. site id (`site_id`), otherwise [`LocateError::MissingSiteId`]
//! 4. group tag (`xmcnacgroup`), optional

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LocateError;
use crate::identity::{GroupTag, MacAddress, RecordId, SiteId};

static RECORD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"ip_id":"(\d+)"#).expect("Invalid regex pattern"));

static SITE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"site_id":"(\d+)"#).expect("Invalid regex pattern"));

static GROUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"xmcnacgroup=([A-Za-z0-9_]+)").expect("Invalid regex pattern"));

/// Class-parameter fragment IPAM emits for DHCP-managed (non-static) records.
pub const DYNAMIC_MARKER: &str = "&dhcpstatic=0&";

/// How the address on a record is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMode {
    /// Statically reserved for the hardware address.
    Static,
    /// Leased dynamically by DHCP.
    Dynamic,
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// One IPAM address record, as far as the sync needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Record identifier (`ip_id`).
    pub record: RecordId,
    /// Owning site (`site_id`).
    pub site: SiteId,
    /// Allocation mode of the address.
    pub allocation: AllocationMode,
    /// NAC group recorded in IPAM, if one was ever set.
    pub group: Option<GroupTag>,
}

/// Turns an IPAM lookup body into a [`Reservation`].
pub trait ReservationExtractor {
    /// Extract the reservation for `mac` from a lookup response body.
    fn extract(&self, mac: &MacAddress, body: &str) -> Result<Reservation, LocateError>;
}

/// Text-pattern implementation of [`ReservationExtractor`].
///
/// The first occurrence of each pattern wins, so a body listing several
/// records resolves to the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl ReservationExtractor for PatternExtractor {
    fn extract(&self, mac: &MacAddress, body: &str) -> Result<Reservation, LocateError> {
        let record = first_capture(&RECORD_ID_RE, body)
            .map(RecordId::new)
            .ok_or_else(|| LocateError::UnknownHardwareAddress {
                mac: mac.to_string(),
            })?;

        if body.contains(DYNAMIC_MARKER) {
            return Err(LocateError::DynamicAddressNotSupported {
                record: record.to_string(),
            });
        }

        let site = first_capture(&SITE_ID_RE, body)
            .map(SiteId::new)
            .ok_or_else(|| LocateError::MissingSiteId {
                record: record.to_string(),
            })?;

        let group = first_capture(&GROUP_TAG_RE, body).map(GroupTag::new);

        Ok(Reservation {
            record,
            site,
            allocation: AllocationMode::Static,
            group,
        })
    }
}

fn first_capture<'a>(re: &Regex, body: &'a str) -> Option<&'a str> {
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

//! # Attribute Vocabulary
//!
//! The fixed set of NAC session attributes mirrored onto an IPAM
//! reservation as class parameters, and the [`AttributeSet`] that carries
//! their values for one invocation.
//!
//! ## Ordering
//!
//! [`AttributeKey`] derives `Ord` in vocabulary order and [`AttributeSet`]
//! is backed by a `BTreeMap`, so the serialized class-parameter string is
//! deterministic and independent of the order the caller passed the keys.

use std::collections::BTreeMap;

use crate::reservation::AllocationMode;

/// Class parameter appended for statically reserved records.
pub const STATIC_MARKER: &str = "dhcpstatic=1";

/// One updatable attribute. Variant order is serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    /// Authentication status (`Status`).
    Status,
    /// Authentication type (`Auth`).
    Auth,
    /// IP address of the access switch (`SwitchIP`).
    SwitchIp,
    /// Switch port the device is attached to (`SwitchPort`).
    SwitchPort,
    /// Location string of the access switch (`SwitchLocation`).
    SwitchLocation,
    /// Assigned NAC profile (`Profile`).
    Profile,
    /// Authenticated user (`User`).
    User,
    /// Reason for the last NAC decision (`Reason`).
    Reason,
    /// Time of the last NAC update (`Time`).
    Time,
}

impl AttributeKey {
    /// Every key, in vocabulary order.
    pub const ALL: [AttributeKey; 9] = [
        Self::Status,
        Self::Auth,
        Self::SwitchIp,
        Self::SwitchPort,
        Self::SwitchLocation,
        Self::Profile,
        Self::User,
        Self::Reason,
        Self::Time,
    ];

    /// Resolve an invocation key (case-sensitive).
    pub fn from_invocation_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.invocation_key() == key)
    }

    /// The key as it appears on the command line.
    pub fn invocation_key(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Auth => "Auth",
            Self::SwitchIp => "SwitchIP",
            Self::SwitchPort => "SwitchPort",
            Self::SwitchLocation => "SwitchLocation",
            Self::Profile => "Profile",
            Self::User => "User",
            Self::Reason => "Reason",
            Self::Time => "Time",
        }
    }

    /// The class-parameter name configured in IPAM.
    pub fn parameter_name(self) -> &'static str {
        match self {
            Self::Status => "xmcstatus",
            Self::Auth => "xmcauthtype",
            Self::SwitchIp => "xmcswitchip",
            Self::SwitchPort => "xmcswitchport",
            Self::SwitchLocation => "xmcswitchlocation",
            Self::Profile => "xmcprofile",
            Self::User => "xmcuser",
            Self::Reason => "xmcreason",
            Self::Time => "xmcupdate",
        }
    }

    /// Whether quote characters are stripped from this key's value.
    pub fn strips_quotes(self) -> bool {
        matches!(
            self,
            Self::SwitchPort | Self::SwitchLocation | Self::Profile | Self::User | Self::Reason
        )
    }

    /// Comma-separated list of the invocation keys, for user-facing messages.
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|k| k.invocation_key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.parameter_name())
    }
}

/// Normalized attribute values for one invocation.
///
/// Only the normalizer can populate a set; once handed out it is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: BTreeMap<AttributeKey, String>,
}

impl AttributeSet {
    pub(crate) fn insert(&mut self, key: AttributeKey, value: String) {
        self.values.insert(key, value);
    }

    /// Look up one attribute value.
    pub fn get(&self, key: AttributeKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attribute is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Serialize to the `ip_class_parameters` string sent to IPAM.
    ///
    /// Values are written as-is; the HTTP layer URL-encodes the whole string
    /// as one query parameter.
    pub fn class_parameters(&self, mode: AllocationMode) -> String {
        let mut params = self
            .iter()
            .map(|(key, value)| format!("{}={value}", key.parameter_name()))
            .collect::<Vec<_>>()
            .join("&");
        if mode == AllocationMode::Static {
            params.push('&');
            params.push_str(STATIC_MARKER);
        }
        params
    }
}

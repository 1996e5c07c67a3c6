//! # Identity Newtypes
//!
//! Identifiers that flow between the NAC platform and IPAM. Each one is a
//! distinct type so that a site identifier cannot be sent where a record
//! identifier is expected.
//!
//! ## Validation
//!
//! [`MacAddress`] is deliberately not normalized: IPAM matches the stored
//! hardware address textually, so the value is forwarded exactly as the NAC
//! platform supplied it (delimiter style and letter case included). Only an
//! empty value is rejected. [`RecordId`] and [`SiteId`] are digit strings
//! taken from IPAM responses and are kept as text because IPAM echoes them
//! back verbatim.

use crate::error::ArgumentError;

/// A device hardware address, carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress(String);

impl MacAddress {
    /// Wrap a caller-supplied hardware address.
    ///
    /// Returns [`ArgumentError::MissingIdentity`] for an empty value.
    pub fn new(value: impl Into<String>) -> Result<Self, ArgumentError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ArgumentError::MissingIdentity);
        }
        Ok(Self(value))
    }

    /// Access the address exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an IPAM address record (`ip_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a record identifier extracted from an IPAM response.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the IPAM site that owns a record (`site_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteId(String);

impl SiteId {
    /// Wrap a site identifier extracted from an IPAM response.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The NAC group name recorded on an IPAM reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupTag(String);

impl GroupTag {
    /// Wrap a group tag.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this tag already appears in the caller's current group value.
    ///
    /// The NAC platform may report several groups in one string
    /// (`"SalesVLAN,Guest"`), so this is a substring test rather than
    /// equality.
    pub fn is_within(&self, current_group: &str) -> bool {
        current_group.contains(self.0.as_str())
    }
}

impl std::fmt::Display for GroupTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! # Error Hierarchy
//!
//! Structured error types for the pure stages of a sync invocation, built
//! with `thiserror`. Transport and remote-status failures live in
//! `eipsync-client`; this crate only knows about bad input and about IPAM
//! responses that do not describe a usable reservation.

use thiserror::Error;

/// Errors raised while normalizing invocation tokens.
///
/// Both variants are raised before any remote system is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// No `Mac` key (or an empty `Mac` value) was supplied.
    #[error("missing mandatory argument Mac followed by value")]
    MissingIdentity,

    /// `Mac` was supplied but none of the updatable attribute keys were.
    #[error("at least one argument followed by value is needed: {expected}")]
    NoAttributesToSync {
        /// Comma-separated list of the accepted attribute keys.
        expected: String,
    },
}

/// Errors raised while extracting a reservation from an IPAM lookup body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The lookup body carries no record identifier for this address.
    #[error("no IPAM address record found for hardware address {mac}")]
    UnknownHardwareAddress {
        /// The hardware address as supplied by the caller.
        mac: String,
    },

    /// The matched record is allocated dynamically by DHCP.
    #[error("IPAM record {record} is a dynamic DHCP allocation; only static reservations are synced")]
    DynamicAddressNotSupported {
        /// The record identifier that was matched.
        record: String,
    },

    /// The matched record carries no site identifier.
    #[error("IPAM record {record} has no site identifier")]
    MissingSiteId {
        /// The record identifier that was matched.
        record: String,
    },
}

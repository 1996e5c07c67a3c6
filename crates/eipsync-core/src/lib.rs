#![deny(missing_docs)]

//! # eipsync-core -- Domain Types for NAC-to-IPAM Endpoint Sync
//!
//! This crate holds everything about a sync invocation that does not touch
//! the network: the identifiers that travel between the two remote systems,
//! the attribute vocabulary mirrored into IPAM, the normalizer that turns
//! invocation tokens into a [`SyncRequest`], and the extractor that pulls a
//! [`Reservation`] out of an IPAM lookup response.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** A [`RecordId`] cannot be passed
//!    where a [`SiteId`] is expected, and a [`MacAddress`] is carried exactly
//!    as the caller supplied it.
//!
//! 2. **Validation before I/O.** [`normalize`] rejects invocations without an
//!    identity or without anything to sync, so a rejected invocation can never
//!    reach a remote system.
//!
//! 3. **Swappable response parsing.** IPAM responses are read through the
//!    [`ReservationExtractor`] trait. [`PatternExtractor`] is the text-pattern
//!    implementation; a structured decoder can replace it without touching
//!    callers.

pub mod attributes;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod reservation;

pub use attributes::{AttributeKey, AttributeSet};
pub use error::{ArgumentError, LocateError};
pub use identity::{GroupTag, MacAddress, RecordId, SiteId};
pub use normalize::{normalize, SyncRequest, DEFAULT_GROUP};
pub use reservation::{AllocationMode, PatternExtractor, Reservation, ReservationExtractor};

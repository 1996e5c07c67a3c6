//! # Sync Invocation Typestate
//!
//! One invocation moves a single device through three stages:
//!
//! ```text
//! Normalized ─locate()──▶ Located ─sync()──▶ Synced ─reconcile()──▶ Outcome
//!     │                      │                  │
//!     └──────────────────────┴──────────────────┴──▶ SyncError (terminal)
//! ```
//!
//! Each state is a distinct type and every transition consumes the previous
//! state, so a stage cannot be re-run or skipped. Remote calls are awaited
//! strictly in order because each depends on data extracted by the one
//! before it. Nothing is retried.

use std::io::Write;

use eipsync_client::{GroupService, ReservationService};
use eipsync_core::{normalize, GroupTag, Reservation, ReservationExtractor, SyncRequest};

use crate::error::SyncError;

// ── State Types ──────────────────────────────────────────────────────

/// Tokens validated; no remote system contacted yet.
#[derive(Debug)]
pub struct Normalized;

/// Reservation found in IPAM; nothing written yet.
#[derive(Debug)]
pub struct Located {
    reservation: Reservation,
}

/// Attributes written onto the reservation.
#[derive(Debug)]
pub struct Synced {
    reservation: Reservation,
}

/// How a successful invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The NAC platform was asked to move the device into `group`.
    Reconciled {
        /// Group the device was moved into.
        group: GroupTag,
    },
    /// The caller's current group already contains the IPAM tag.
    AlreadyCorrect {
        /// The tag found in IPAM.
        group: GroupTag,
    },
}

/// A sync invocation in state `S`.
#[derive(Debug)]
pub struct Invocation<S> {
    request: SyncRequest,
    state: S,
}

impl<S> Invocation<S> {
    /// The normalized request driving this invocation.
    pub fn request(&self) -> &SyncRequest {
        &self.request
    }
}

impl Invocation<Normalized> {
    /// Normalize invocation tokens. Fails before any remote call.
    pub fn new<I, T>(tokens: I) -> Result<Self, SyncError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let request = normalize(tokens)?;
        tracing::debug!(mac = %request.mac, "collected attributes from NAC");
        Ok(Self {
            request,
            state: Normalized,
        })
    }

    /// Look the device up in IPAM and extract its reservation.
    pub async fn locate<R, E>(self, ipam: &R, extractor: &E) -> Result<Invocation<Located>, SyncError>
    where
        R: ReservationService,
        E: ReservationExtractor,
    {
        tracing::debug!(mac = %self.request.mac, "checking if MAC exists in IPAM");
        let body = ipam.lookup(&self.request.mac).await?;
        let reservation = extractor.extract(&self.request.mac, &body)?;

        tracing::info!(
            record = %reservation.record,
            site = %reservation.site,
            allocation = %reservation.allocation,
            group = ?reservation.group.as_ref().map(GroupTag::as_str),
            "located reservation"
        );
        Ok(Invocation {
            request: self.request,
            state: Located { reservation },
        })
    }
}

impl Invocation<Located> {
    /// The located reservation.
    pub fn reservation(&self) -> &Reservation {
        &self.state.reservation
    }

    /// Print the located identifiers for the calling orchestration system.
    ///
    /// Emits `IP_ID: <id>`, `Site_ID: <id>` and, when IPAM carries a group,
    /// `Device-type: <tag>`, one per line.
    pub fn report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let reservation = &self.state.reservation;
        writeln!(out, "IP_ID: {}", reservation.record)?;
        writeln!(out, "Site_ID: {}", reservation.site)?;
        if let Some(group) = &reservation.group {
            writeln!(out, "Device-type: {group}")?;
        }
        out.flush()
    }

    /// Write the normalized attributes onto the reservation.
    pub async fn sync<R>(self, ipam: &R) -> Result<Invocation<Synced>, SyncError>
    where
        R: ReservationService,
    {
        let reservation = self.state.reservation;
        let class_parameters = self
            .request
            .attributes
            .class_parameters(reservation.allocation);
        tracing::debug!(%class_parameters, "pushing attributes to IPAM");

        ipam.update(&reservation, &self.request.mac, &class_parameters)
            .await?;
        tracing::info!(record = %reservation.record, "attributes written to IPAM");

        Ok(Invocation {
            request: self.request,
            state: Synced { reservation },
        })
    }
}

impl Invocation<Synced> {
    /// Push the IPAM group to the NAC platform unless it is already current.
    pub async fn reconcile<G>(self, nac: &G) -> Result<Outcome, SyncError>
    where
        G: GroupService,
    {
        let reservation = self.state.reservation;
        let Some(group) = reservation.group else {
            return Err(SyncError::NoGroupConfigured {
                record: reservation.record.to_string(),
            });
        };

        if group.is_within(&self.request.current_group) {
            tracing::debug!(
                %group,
                current = %self.request.current_group,
                "already correct group"
            );
            return Ok(Outcome::AlreadyCorrect { group });
        }

        nac.assign(&self.request.mac, &group).await?;
        tracing::info!(mac = %self.request.mac, %group, "added to group");
        Ok(Outcome::Reconciled { group })
    }
}

/// Drive a normalized invocation through every remaining stage.
///
/// The identifier report is written to `out` after the reservation is
/// located and before anything is modified.
pub async fn drive<R, G, E, W>(
    invocation: Invocation<Normalized>,
    ipam: &R,
    nac: &G,
    extractor: &E,
    out: &mut W,
) -> Result<Outcome, SyncError>
where
    R: ReservationService,
    G: GroupService,
    E: ReservationExtractor,
    W: Write,
{
    let located = invocation.locate(ipam, extractor).await?;
    located.report(out)?;
    let synced = located.sync(ipam).await?;
    synced.reconcile(nac).await
}

/// Normalize `tokens` and drive the invocation to completion.
pub async fn run<I, T, R, G, E, W>(
    tokens: I,
    ipam: &R,
    nac: &G,
    extractor: &E,
    out: &mut W,
) -> Result<Outcome, SyncError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
    R: ReservationService,
    G: GroupService,
    E: ReservationExtractor,
    W: Write,
{
    drive(Invocation::new(tokens)?, ipam, nac, extractor, out).await
}

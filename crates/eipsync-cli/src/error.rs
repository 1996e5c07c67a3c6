//! # Top-Level Error and Exit Mapping
//!
//! Every stage returns a typed error; [`SyncError`] folds them into the one
//! type `main` handles. Each failure kind has its own exit status and a short
//! categorical message for the calling orchestration system. Diagnostic
//! detail goes to the log sink, never to the categorical signal.

use eipsync_client::{ClientError, RemoteSystem};
use eipsync_core::{ArgumentError, LocateError};

use crate::settings::SettingsError;

/// Exit status for an invocation that completed (including the no-op case).
pub const EXIT_OK: u8 = 0;

/// Any failure that terminates a sync invocation.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Invocation tokens were rejected before any remote call.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// The IPAM lookup did not yield a usable reservation.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A remote call failed in transport or was rejected.
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The reservation carries no group tag to reconcile against.
    #[error("IPAM record {record} has no NAC group configured")]
    NoGroupConfigured {
        /// The record that was updated.
        record: String,
    },

    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The command line itself could not be parsed.
    #[error("invalid command line: {message}")]
    Usage {
        /// Parser diagnostic.
        message: String,
    },

    /// Writing the identifier report to stdout failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl SyncError {
    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(ArgumentError::MissingIdentity) => 2,
            Self::Arguments(ArgumentError::NoAttributesToSync { .. }) => 3,
            Self::Remote(ClientError::Http { .. }) => 4,
            Self::Remote(ClientError::ApiError { .. }) => 5,
            Self::Locate(LocateError::UnknownHardwareAddress { .. }) => 6,
            Self::Locate(LocateError::DynamicAddressNotSupported { .. }) => 7,
            Self::Locate(LocateError::MissingSiteId { .. }) => 8,
            Self::NoGroupConfigured { .. } => 9,
            Self::Settings(_) | Self::Remote(ClientError::Config(_)) => 10,
            Self::Usage { .. } => 11,
            Self::Output(_) => 1,
        }
    }

    /// Short categorical message for the calling system.
    pub fn signal(&self) -> String {
        match self {
            Self::Arguments(ArgumentError::MissingIdentity) => {
                "Missing mandatory argument Mac followed by value.".to_string()
            }
            Self::Arguments(ArgumentError::NoAttributesToSync { expected }) => {
                format!("At least one argument followed by value is needed: {expected}")
            }
            Self::Remote(ClientError::Http { .. }) => "RequestException".to_string(),
            Self::Remote(ClientError::ApiError { system, .. }) => {
                format!("ERROR communicating to {system}")
            }
            Self::Locate(LocateError::UnknownHardwareAddress { .. }) => "UnknownMAC".to_string(),
            Self::Locate(LocateError::DynamicAddressNotSupported { .. }) => {
                "DynamicAddress".to_string()
            }
            Self::Locate(LocateError::MissingSiteId { .. }) => "WrongSiteID".to_string(),
            Self::NoGroupConfigured { .. } => "No Group found in EIP to set".to_string(),
            Self::Settings(_) | Self::Remote(ClientError::Config(_)) => {
                "ConfigurationError".to_string()
            }
            Self::Usage { .. } => "UsageError".to_string(),
            Self::Output(_) => "OutputError".to_string(),
        }
    }

    /// The remote system involved, if any.
    pub fn remote_system(&self) -> Option<RemoteSystem> {
        match self {
            Self::Remote(e) => e.system(),
            _ => None,
        }
    }
}

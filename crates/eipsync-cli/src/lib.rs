//! # eipsync-cli
//!
//! Library half of the `eipsync` binary: settings loading, tracing setup,
//! the top-level error with its exit mapping, and the staged sync workflow.
//! `main.rs` only parses flags and wires these together.

pub mod error;
pub mod logging;
pub mod settings;
pub mod workflow;

pub use error::{SyncError, EXIT_OK};
pub use settings::{Settings, SettingsError};
pub use workflow::{drive, run, Invocation, Outcome};

//! # Argument Normalizer
//!
//! Turns the flat `key value key value ...` token list passed by the NAC
//! platform's script action into a [`SyncRequest`].
//!
//! Keys are case-sensitive. `Mac` is mandatory, `Group` is optional and
//! defaults to [`DEFAULT_GROUP`], and at least one [`AttributeKey`] must be
//! present. Repeated keys keep the last value; unknown keys are ignored.

use std::collections::HashMap;

use crate::attributes::{AttributeKey, AttributeSet};
use crate::error::ArgumentError;
use crate::identity::MacAddress;

/// Invocation key carrying the hardware address.
pub const MAC_KEY: &str = "Mac";

/// Invocation key carrying the device's current NAC group.
pub const GROUP_KEY: &str = "Group";

/// Group assumed when the caller does not pass one.
pub const DEFAULT_GROUP: &str = "Unregistered";

/// Sentinel written for a blank switch location.
pub const BLANK_LOCATION: &str = "-";

/// A validated sync request for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Hardware address, verbatim.
    pub mac: MacAddress,
    /// The group the NAC platform currently reports for the device. May hold
    /// several comma-separated groups.
    pub current_group: String,
    /// Attributes to write onto the reservation. Never empty.
    pub attributes: AttributeSet,
}

/// Normalize invocation tokens into a [`SyncRequest`].
///
/// # Errors
///
/// - [`ArgumentError::MissingIdentity`] if `Mac` is absent or empty.
/// - [`ArgumentError::NoAttributesToSync`] if no updatable attribute is present.
pub fn normalize<I, S>(tokens: I) -> Result<SyncRequest, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    tracing::debug!(?tokens, "attributes received");

    let mut loaded: HashMap<String, String> = HashMap::new();
    let mut chunks = tokens.chunks_exact(2);
    for pair in &mut chunks {
        loaded.insert(pair[0].clone(), pair[1].clone());
    }
    if let [dangling] = chunks.remainder() {
        tracing::warn!(key = %dangling, "ignoring trailing key without a value");
    }
    tracing::debug!(?loaded, "loaded attributes");

    let mac = match loaded.get(MAC_KEY) {
        Some(raw) => MacAddress::new(raw.as_str())?,
        None => return Err(ArgumentError::MissingIdentity),
    };

    let current_group = loaded
        .get(GROUP_KEY)
        .cloned()
        .unwrap_or_else(|| DEFAULT_GROUP.to_string());

    let mut attributes = AttributeSet::default();
    for key in AttributeKey::ALL {
        if let Some(raw) = loaded.get(key.invocation_key()) {
            attributes.insert(key, normalize_value(key, raw, &mac));
        }
    }

    for key in loaded.keys() {
        if key != MAC_KEY && key != GROUP_KEY && AttributeKey::from_invocation_key(key).is_none() {
            tracing::debug!(%key, "ignoring unrecognized key");
        }
    }

    tracing::debug!(?attributes, "attributes in the structure");
    tracing::debug!(end_system = %mac, group = %current_group, "end-system and current group");

    if attributes.is_empty() {
        return Err(ArgumentError::NoAttributesToSync {
            expected: AttributeKey::expected_list(),
        });
    }

    Ok(SyncRequest {
        mac,
        current_group,
        attributes,
    })
}

fn normalize_value(key: AttributeKey, raw: &str, mac: &MacAddress) -> String {
    let value = if key.strips_quotes() {
        raw.replace('"', "")
    } else {
        raw.to_string()
    };

    match key {
        AttributeKey::SwitchLocation if value == " " => BLANK_LOCATION.to_string(),
        // No username known: fall back to the device identity.
        AttributeKey::User if value == " " => mac.as_str().to_string(),
        _ => value,
    }
}

//! Remote-system traits the sync workflow is generic over.
//!
//! [`IpamClient`](crate::IpamClient) and [`NacClient`](crate::NacClient)
//! are the HTTP implementations. Tests substitute in-memory doubles that
//! count calls.

use std::future::Future;

use eipsync_core::{GroupTag, MacAddress, Reservation};

use crate::error::ClientError;

/// Read and write access to IPAM address records.
pub trait ReservationService {
    /// Fetch the raw lookup body for every record matching `mac`.
    fn lookup(&self, mac: &MacAddress) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Write `class_parameters` onto the located record.
    fn update(
        &self,
        reservation: &Reservation,
        mac: &MacAddress,
        class_parameters: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Group membership changes on the NAC platform.
pub trait GroupService {
    /// Move `mac` into `group`, removing it from every other end-system
    /// group and triggering reauthentication.
    fn assign(
        &self,
        mac: &MacAddress,
        group: &GroupTag,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

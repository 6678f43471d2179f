//! TIMS control unit transport: HTTP client and response reconciliation.
//!
//! The core never performs I/O; everything network-facing lives here
//! behind the `device` feature. There is no automatic retry anywhere —
//! resubmission is an explicit operator action.

mod client;
mod response;

pub use client::{DeviceClient, DeviceConfig};
pub use response::{ACCEPTED_CODE, Confirmation, DeviceError, DeviceResponse};

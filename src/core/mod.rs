//! Core fiscalization engine: classification, aggregation, assembly,
//! validation.
//!
//! Everything here is synchronous and side-effect-free. Recoverable data
//! anomalies are collected into a [`Diagnostics`] value returned alongside
//! the result rather than logged globally, so callers and tests can assert
//! on them.

mod buckets;
mod classify;
mod config;
mod diagnostics;
mod error;
mod payload;
mod pin;
mod rate;
mod reference;
mod types;
mod validate;

pub use buckets::*;
pub use classify::*;
pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use payload::*;
pub use pin::{PinFormatError, check_pin};
pub use rate::*;
pub use reference::{MAX_REFERENCE_LEN, receipt_reference};
pub use types::*;
pub use validate::*;

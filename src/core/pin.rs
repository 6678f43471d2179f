//! KRA PIN format check.
//!
//! Pattern: one uppercase letter, nine digits, one uppercase letter
//! (e.g. "A012345678B"). The check is deliberately loose — a mismatch is
//! recorded as a diagnostic by the assembler, never a blocker.

use std::fmt;

/// Error returned when a customer PIN fails the format check.
#[derive(Debug, Clone)]
pub struct PinFormatError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed.
    pub reason: String,
}

impl fmt::Display for PinFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid KRA PIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for PinFormatError {}

/// Validate a KRA PIN by format (no registry call).
pub fn check_pin(pin: &str) -> Result<(), PinFormatError> {
    let err = |reason: &str| {
        Err(PinFormatError {
            value: pin.into(),
            reason: reason.into(),
        })
    };

    if pin.len() != 11 {
        return err("must be exactly 11 characters");
    }
    let bytes = pin.as_bytes();
    if !bytes[0].is_ascii_uppercase() {
        return err("must start with an uppercase letter");
    }
    if !bytes[1..10].iter().all(|b| b.is_ascii_digit()) {
        return err("characters 2-10 must be digits");
    }
    if !bytes[10].is_ascii_uppercase() {
        return err("must end with an uppercase letter");
    }
    Ok(())
}

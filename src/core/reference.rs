//! Receipt reference derivation.
//!
//! The control unit limits the transaction reference to 18 characters.
//! ERP invoice identifiers like "ACC-SINV-2024-00007" exceed that, so they
//! are compressed; anything malformed degrades to truncation. This
//! function is pure and total — a malformed identifier must never block
//! submission.

/// Maximum reference length accepted by the device protocol.
pub const MAX_REFERENCE_LEN: usize = 18;

const ORG_PREFIX: &str = "ACC-";

/// Derive the receipt reference from the invoice's natural identifier.
///
/// Already-short identifiers pass through unchanged (the function is
/// idempotent). Longer ones have the organizational prefix stripped and,
/// when the remainder splits into exactly {series, year, number}, are
/// compressed to `series + last two year digits + number without leading
/// zeros`. Any other shape keeps the last 18 characters verbatim.
///
/// ```
/// use ushuru::core::receipt_reference;
/// assert_eq!(receipt_reference("ACC-SINV-2024-00007"), "SINV247");
/// ```
pub fn receipt_reference(natural_id: &str) -> String {
    if natural_id.chars().count() <= MAX_REFERENCE_LEN {
        return natural_id.to_string();
    }

    let stripped = natural_id.replace(ORG_PREFIX, "");
    let parts: Vec<&str> = stripped.split('-').collect();
    if let [series, year, number] = parts[..] {
        let short_year: String = {
            let chars: Vec<char> = year.chars().collect();
            chars[chars.len().saturating_sub(2)..].iter().collect()
        };
        let number = number.trim_start_matches('0');
        let formatted = format!("{series}{short_year}{number}");
        return formatted.chars().take(MAX_REFERENCE_LEN).collect();
    }

    // Fallback: keep the most recent (trailing) characters.
    let chars: Vec<char> = natural_id.chars().collect();
    chars[chars.len() - MAX_REFERENCE_LEN..].iter().collect()
}

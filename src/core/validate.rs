//! Payload cross-check against the source invoice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationIssue;
use super::types::{Payload, SourceInvoice};

/// Absolute tolerance for total comparisons, in currency units.
/// A difference of exactly 0.01 passes.
pub const TOTAL_TOLERANCE: Decimal = dec!(0.01);

/// Re-derive the payload's totals and check them against the invoice's
/// authoritative figures, plus per-item sanity.
///
/// Totals are recomputed purely from payload fields, independent of how
/// the assembler produced them. Returns all issues found (empty = pass);
/// the caller decides between soft and hard enforcement.
pub fn validate_payload(payload: &Payload, invoice: &SourceInvoice) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let grand = payload.vat_a_net
        + payload.vat_a
        + payload.vat_b_net
        + payload.vat_b
        + payload.vat_c_net
        + payload.vat_c
        + payload.vat_d_net
        + payload.vat_d
        + payload.vat_e_net
        + payload.vat_f_net;
    let tax = payload.vat_a
        + payload.vat_b
        + payload.vat_c
        + payload.vat_d
        + payload.vat_e
        + payload.vat_f;

    // Payload amounts are absolute; a return invoice carries the sign on
    // its recorded totals instead.
    let expected_grand = invoice.grand_total.abs();
    let expected_tax = invoice.total_taxes.abs();

    if (grand - expected_grand).abs() > TOTAL_TOLERANCE {
        issues.push(ValidationIssue::new(
            "total",
            format!("payload total {grand} differs from invoice grand total {expected_grand}"),
        ));
    }
    if (tax - expected_tax).abs() > TOTAL_TOLERANCE {
        issues.push(ValidationIssue::new(
            "total_tax",
            format!("payload tax {tax} differs from invoice tax total {expected_tax}"),
        ));
    }

    for (i, item) in payload.data.iter().enumerate() {
        if item.quantity <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                format!("data[{i}].quantity"),
                format!("product '{}' has non-positive quantity", item.product_code),
            ));
        }
        if item.unit_price <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                format!("data[{i}].unitPrice"),
                format!("product '{}' has non-positive unit price", item.product_code),
            ));
        }
    }

    issues
}

/// Whether an invoice posted on `posting` may be transmitted on `today`.
///
/// The device setup normally refuses invoices not posted the same day;
/// deployments that re-send historical invoices enable `allow_backdated`.
pub fn posting_date_permitted(
    posting: NaiveDate,
    today: NaiveDate,
    allow_backdated: bool,
) -> Option<ValidationIssue> {
    if posting == today || allow_backdated {
        None
    } else {
        Some(ValidationIssue::new(
            "posting_date",
            format!("invoice posted {posting} cannot be transmitted on {today}"),
        ))
    }
}

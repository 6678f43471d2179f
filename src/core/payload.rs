//! Payload assembly and the end-to-end fiscalization pipeline.

use rust_decimal::Decimal;

use super::buckets::{VatBucket, VatBuckets, bucket_for_label};
use super::classify::{classify_line, round_half_up};
use super::config::{Enforcement, FiscalConfig};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::error::{FiscalError, ValidationIssue};
use super::pin::check_pin;
use super::rate::resolve_rate;
use super::reference::receipt_reference;
use super::types::{
    ClassifiedLine, ConfirmationLookup, Payload, PaymentMethod, SaleType, SourceInvoice,
    TaxCategory,
};
use super::validate::validate_payload;

/// Everything one fiscalization run produces.
#[derive(Debug)]
pub struct FiscalOutcome {
    pub payload: Payload,
    /// Validation issues found; empty under hard enforcement (the pipeline
    /// would have aborted), possibly non-empty under soft. The caller must
    /// check this before transmitting.
    pub validation: Vec<ValidationIssue>,
    /// Recoverable anomalies recorded along the way.
    pub diagnostics: Diagnostics,
}

/// Combine aggregated buckets, normalized items, and invoice metadata into
/// the transmission payload.
///
/// Every bucket pair is rounded to 2 decimals here — not earlier, so
/// rounding error does not compound per line — and `total` is the sum of
/// the rounded fields, so the payload's bucket fields always re-add to it
/// exactly.
pub fn assemble(
    buckets: &VatBuckets,
    items: Vec<ClassifiedLine>,
    invoice: &SourceInvoice,
    config: &FiscalConfig,
    lookup: &dyn ConfirmationLookup,
    diagnostics: &mut Diagnostics,
) -> Result<Payload, FiscalError> {
    let rounded = |bucket: VatBucket| {
        let t = buckets.totals(bucket);
        (round_half_up(t.net), round_half_up(t.tax))
    };
    let (vat_a_net, vat_a) = rounded(VatBucket::A);
    let (vat_b_net, vat_b) = rounded(VatBucket::B);
    let (vat_c_net, vat_c) = rounded(VatBucket::C);
    let (vat_d_net, vat_d) = rounded(VatBucket::D);
    let (vat_e_net, vat_e) = rounded(VatBucket::E);
    let (vat_f_net, vat_f) = rounded(VatBucket::F);

    let total = vat_a_net
        + vat_a
        + vat_b_net
        + vat_b
        + vat_c_net
        + vat_c
        + vat_d_net
        + vat_d
        + vat_e_net
        + vat_f_net;

    // Refunds must reference the original sale's confirmation code.
    let (sale_type, cuin) = if invoice.is_return {
        let cuin = lookup
            .confirmation_code(&invoice.invoice_no)
            .ok_or_else(|| FiscalError::MissingConfirmation(invoice.invoice_no.clone()))?;
        (SaleType::Refund, cuin)
    } else {
        (SaleType::Sale, String::new())
    };

    let payment = if invoice.is_paid {
        PaymentMethod::Cash
    } else {
        PaymentMethod::Credit
    };

    if !invoice.customer_pin.is_empty() {
        if let Err(e) = check_pin(&invoice.customer_pin) {
            diagnostics.push(DiagnosticKind::CustomerPin, &invoice.customer_pin, e.to_string());
        }
    }

    Ok(Payload {
        sale_type,
        cuin,
        till: config.till.clone(),
        rct_no: receipt_reference(&invoice.invoice_no),
        total,
        paid: total,
        payment,
        customer_pin: invoice.customer_pin.clone(),
        vat_a_net,
        vat_a,
        vat_b_net,
        vat_b,
        vat_c_net,
        vat_c,
        vat_d_net,
        vat_d,
        vat_e_net,
        vat_e,
        vat_f_net,
        vat_f,
        data: items,
    })
}

/// Run the full pipeline for one invoice: classify every line, aggregate
/// into VAT buckets, assemble the payload, and validate it against the
/// invoice's recorded totals.
///
/// Under [`Enforcement::Hard`] any validation issue aborts with
/// [`FiscalError::Validation`]; under [`Enforcement::Soft`] issues are
/// returned in the outcome and transmission is the caller's call.
pub fn fiscalize(
    invoice: &SourceInvoice,
    config: &FiscalConfig,
    lookup: &dyn ConfirmationLookup,
) -> Result<FiscalOutcome, FiscalError> {
    if invoice.lines.is_empty() {
        return Err(FiscalError::EmptyInvoice(invoice.invoice_no.clone()));
    }

    let category = TaxCategory::from_invoice(invoice);
    let mut diagnostics = Diagnostics::new();
    let mut buckets = VatBuckets::new();
    let mut items = Vec::with_capacity(invoice.lines.len());

    for line in &invoice.lines {
        let resolved = resolve_rate(line, config, &mut diagnostics);
        let (item, taxable, tax) =
            classify_line(line, &resolved, category, config.unit_price_policy);
        let label = line.tax_template.as_deref().unwrap_or("");
        let bucket = bucket_for_label(
            label,
            &config.bucket_rules,
            config.default_bucket,
            &mut diagnostics,
        );
        buckets.accumulate(bucket, taxable, tax);
        items.push(item);
    }

    let payload = assemble(&buckets, items, invoice, config, lookup, &mut diagnostics)?;
    let validation = validate_payload(&payload, invoice);

    if config.enforcement == Enforcement::Hard && !validation.is_empty() {
        let msg = validation
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FiscalError::Validation(msg));
    }

    Ok(FiscalOutcome {
        payload,
        validation,
        diagnostics,
    })
}

/// Bucket-sum re-derivation used by tests and callers that want to assert
/// the payload's internal consistency without a source invoice.
pub fn payload_total(payload: &Payload) -> Decimal {
    payload.vat_a_net
        + payload.vat_a
        + payload.vat_b_net
        + payload.vat_b
        + payload.vat_c_net
        + payload.vat_c
        + payload.vat_d_net
        + payload.vat_d
        + payload.vat_e_net
        + payload.vat_f_net
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item as read from the source invoice. Immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    /// Product code (non-empty).
    pub product_code: String,
    /// Product description.
    pub product_desc: String,
    /// Invoiced quantity — negative for return lines, normalized to
    /// absolute value during classification.
    pub quantity: Decimal,
    /// Unit price as stated on the line (tax treatment per the invoice's
    /// tax category).
    pub rate: Decimal,
    /// Line net amount, used by the net-derived unit-price policy.
    pub net_amount: Decimal,
    /// Linked tax-template label. `None` means the linkage is missing
    /// entirely; `Some("")` means linked but empty.
    pub tax_template: Option<String>,
    /// Raw per-item tax-rate map as stored by the ERP, e.g.
    /// `{"VAT - 16%": 16.0}`. Parse failure is a recoverable anomaly.
    pub tax_rate_json: Option<String>,
    /// The template's configured detail-row rate, used by the
    /// template-lookup resolution policy.
    pub template_rate: Option<Decimal>,
}

/// Invoice metadata the pipeline consumes. Immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInvoice {
    /// Natural identifier (e.g. "ACC-SINV-2024-00007").
    pub invoice_no: String,
    pub posting_date: NaiveDate,
    /// Authoritative grand total for the validation cross-check.
    pub grand_total: Decimal,
    /// Authoritative total tax for the validation cross-check.
    pub total_taxes: Decimal,
    /// Refund flag — drives saleType and CUIN resolution.
    pub is_return: bool,
    /// Drives Cash vs Credit payment method.
    pub is_paid: bool,
    /// Customer KRA PIN; may be empty (walk-in sale).
    pub customer_pin: String,
    /// Whether tax is included in the stated line prices
    /// ("included in print rate").
    pub tax_inclusive: bool,
    pub lines: Vec<SaleLine>,
}

/// Whether the line's stated price already contains tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxCategory {
    Inclusive,
    Exclusive,
}

impl TaxCategory {
    /// Derive the per-invoice category from the "included in print rate"
    /// flag.
    pub fn from_invoice(invoice: &SourceInvoice) -> Self {
        if invoice.tax_inclusive {
            Self::Inclusive
        } else {
            Self::Exclusive
        }
    }
}

/// Transaction direction, wire values per the TIMS protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleType {
    #[serde(rename = "sales")]
    Sale,
    #[serde(rename = "refund")]
    Refund,
}

/// Payment method, wire values per the TIMS protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Credit,
}

/// A normalized line item as transmitted in the payload's `data[]` array.
/// Created once per [`SaleLine`]; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    #[serde(rename = "productCode")]
    pub product_code: String,
    #[serde(rename = "productDesc")]
    pub product_desc: String,
    /// Absolute quantity.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Absolute unit price, rounded to 2 decimals.
    #[serde(rename = "unitPrice", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Always zero today — explicit extension point.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    /// Integer tax percentage; 0 for zero-rated items.
    #[serde(rename = "taxtype")]
    pub tax_type: u32,
}

/// The transmission payload, with the exact wire field set the control
/// unit expects. Constructed once by the assembler, then validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "saleType")]
    pub sale_type: SaleType,
    /// Empty for sales; the original sale's authority confirmation code
    /// for refunds.
    pub cuin: String,
    pub till: String,
    /// Receipt reference, ≤ 18 characters.
    #[serde(rename = "rctNo")]
    pub rct_no: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "Paid", with = "rust_decimal::serde::float")]
    pub paid: Decimal,
    #[serde(rename = "Payment")]
    pub payment: PaymentMethod,
    #[serde(rename = "CustomerPIN")]
    pub customer_pin: String,
    #[serde(rename = "VAT_A_Net", with = "rust_decimal::serde::float")]
    pub vat_a_net: Decimal,
    #[serde(rename = "VAT_A", with = "rust_decimal::serde::float")]
    pub vat_a: Decimal,
    #[serde(rename = "VAT_B_Net", with = "rust_decimal::serde::float")]
    pub vat_b_net: Decimal,
    #[serde(rename = "VAT_B", with = "rust_decimal::serde::float")]
    pub vat_b: Decimal,
    #[serde(rename = "VAT_C_Net", with = "rust_decimal::serde::float")]
    pub vat_c_net: Decimal,
    #[serde(rename = "VAT_C", with = "rust_decimal::serde::float")]
    pub vat_c: Decimal,
    #[serde(rename = "VAT_D_Net", with = "rust_decimal::serde::float")]
    pub vat_d_net: Decimal,
    #[serde(rename = "VAT_D", with = "rust_decimal::serde::float")]
    pub vat_d: Decimal,
    #[serde(rename = "VAT_E_Net", with = "rust_decimal::serde::float")]
    pub vat_e_net: Decimal,
    #[serde(rename = "VAT_E", with = "rust_decimal::serde::float")]
    pub vat_e: Decimal,
    #[serde(rename = "VAT_F_Net", with = "rust_decimal::serde::float")]
    pub vat_f_net: Decimal,
    #[serde(rename = "VAT_F", with = "rust_decimal::serde::float")]
    pub vat_f: Decimal,
    pub data: Vec<ClassifiedLine>,
}

/// Lookup of the authority-issued confirmation code (CUIN) from prior
/// response records. Refunds must quote the original sale's CUIN, so a
/// caller wanting refunds implements this over its response archive.
pub trait ConfirmationLookup {
    fn confirmation_code(&self, invoice_no: &str) -> Option<String>;
}

impl ConfirmationLookup for std::collections::HashMap<String, String> {
    fn confirmation_code(&self, invoice_no: &str) -> Option<String> {
        self.get(invoice_no).cloned()
    }
}

/// Lookup for callers that never submit refunds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfirmations;

impl ConfirmationLookup for NoConfirmations {
    fn confirmation_code(&self, _invoice_no: &str) -> Option<String> {
        None
    }
}

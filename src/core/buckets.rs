//! The six fiscal VAT buckets and the label → bucket aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::BucketRule;
use super::diagnostics::{DiagnosticKind, Diagnostics};

/// One of the six fixed VAT reporting categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatBucket {
    /// Standard rate (16%).
    A,
    /// Alternate configured rate (8%).
    B,
    /// Alternate configured rate (10%).
    C,
    /// Alternate configured rate (2%).
    D,
    /// Zero-rated — reports no tax.
    E,
    /// Exempt — reports no tax.
    F,
}

impl VatBucket {
    /// Bucket letter as used in the wire field names.
    pub fn code(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }

    /// Parse from a bucket letter.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            _ => None,
        }
    }

    /// Whether this bucket reports a tax amount. Zero-rated and exempt
    /// supplies report none, by fiscal rule.
    pub fn reports_tax(&self) -> bool {
        !matches!(self, Self::E | Self::F)
    }
}

/// Accumulated (net, tax) pair for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketTotals {
    pub net: Decimal,
    pub tax: Decimal,
}

/// The six bucket accumulators, zero-initialized.
///
/// Mutated one line at a time via [`accumulate`](Self::accumulate);
/// read-only once the payload assembler consumes it.
#[derive(Debug, Clone, Default)]
pub struct VatBuckets {
    a: BucketTotals,
    b: BucketTotals,
    c: BucketTotals,
    d: BucketTotals,
    e: BucketTotals,
    f: BucketTotals,
}

impl VatBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one line's taxable and tax amounts into a bucket.
    ///
    /// Buckets E and F never receive tax contributions — the net amount
    /// accumulates, the tax amount is discarded here regardless of what
    /// the caller passes in.
    pub fn accumulate(&mut self, bucket: VatBucket, taxable: Decimal, tax: Decimal) {
        let slot = self.slot_mut(bucket);
        slot.net += taxable;
        if bucket.reports_tax() {
            slot.tax += tax;
        }
    }

    /// Read one bucket's totals.
    pub fn totals(&self, bucket: VatBucket) -> BucketTotals {
        match bucket {
            VatBucket::A => self.a,
            VatBucket::B => self.b,
            VatBucket::C => self.c,
            VatBucket::D => self.d,
            VatBucket::E => self.e,
            VatBucket::F => self.f,
        }
    }

    fn slot_mut(&mut self, bucket: VatBucket) -> &mut BucketTotals {
        match bucket {
            VatBucket::A => &mut self.a,
            VatBucket::B => &mut self.b,
            VatBucket::C => &mut self.c,
            VatBucket::D => &mut self.d,
            VatBucket::E => &mut self.e,
            VatBucket::F => &mut self.f,
        }
    }

    /// Grand total: net + tax over A–D, net only for E and F.
    pub fn grand_total(&self) -> Decimal {
        self.a.net
            + self.a.tax
            + self.b.net
            + self.b.tax
            + self.c.net
            + self.c.tax
            + self.d.net
            + self.d.tax
            + self.e.net
            + self.f.net
    }
}

/// Map a tax-template label to its VAT bucket.
///
/// Rules are tried in order; a rule matches on exact equality or substring
/// containment, first match wins. An empty label falls back to the default
/// bucket silently (the rate resolver has already recorded the missing
/// template). A non-empty label matching no rule records an
/// `UnmappedTemplate` diagnostic and also falls back — a single unmapped
/// template in historical data must never abort the invoice.
pub fn bucket_for_label(
    label: &str,
    rules: &[BucketRule],
    default: VatBucket,
    diagnostics: &mut Diagnostics,
) -> VatBucket {
    if label.is_empty() {
        return default;
    }
    for rule in rules {
        if rule.matches(label) {
            return rule.bucket;
        }
    }
    diagnostics.push(
        DiagnosticKind::UnmappedTemplate,
        label,
        format!("no bucket rule matches '{label}', using bucket {}", default.code()),
    );
    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FiscalConfig;
    use rust_decimal_macros::dec;

    #[test]
    fn accumulate_standard_bucket() {
        let mut buckets = VatBuckets::new();
        buckets.accumulate(VatBucket::A, dec!(100), dec!(16));
        buckets.accumulate(VatBucket::A, dec!(50), dec!(8));
        assert_eq!(buckets.totals(VatBucket::A).net, dec!(150));
        assert_eq!(buckets.totals(VatBucket::A).tax, dec!(24));
    }

    #[test]
    fn zero_rated_and_exempt_discard_tax() {
        let mut buckets = VatBuckets::new();
        buckets.accumulate(VatBucket::E, dec!(100), dec!(16));
        buckets.accumulate(VatBucket::F, dec!(200), dec!(32));
        assert_eq!(buckets.totals(VatBucket::E).net, dec!(100));
        assert_eq!(buckets.totals(VatBucket::E).tax, dec!(0));
        assert_eq!(buckets.totals(VatBucket::F).net, dec!(200));
        assert_eq!(buckets.totals(VatBucket::F).tax, dec!(0));
    }

    #[test]
    fn grand_total_counts_tax_only_for_a_to_d() {
        let mut buckets = VatBuckets::new();
        buckets.accumulate(VatBucket::A, dec!(100), dec!(16));
        buckets.accumulate(VatBucket::B, dec!(100), dec!(8));
        buckets.accumulate(VatBucket::E, dec!(100), dec!(999));
        assert_eq!(buckets.grand_total(), dec!(324));
    }

    #[test]
    fn label_exact_match() {
        let config = FiscalConfig::default();
        let mut diags = Diagnostics::new();
        let b = bucket_for_label("VAT 16%", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::A);
        assert!(diags.is_empty());
    }

    #[test]
    fn label_substring_match() {
        let config = FiscalConfig::default();
        let mut diags = Diagnostics::new();
        // "VAT - 16%" is not an exact rule but contains "16%"
        let b = bucket_for_label("VAT - 16%", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::A);
    }

    #[test]
    fn first_rule_wins() {
        let config = FiscalConfig::default();
        let mut diags = Diagnostics::new();
        // Contains both "VAT 8%" and (as substring) "8%"; both map to B anyway,
        // but "Zero Rated" must not be shadowed by the "0%" rule order.
        let b = bucket_for_label("Zero Rated", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::E);
        let b = bucket_for_label("Exempt", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::F);
    }

    #[test]
    fn empty_label_falls_back_silently() {
        let config = FiscalConfig::default();
        let mut diags = Diagnostics::new();
        let b = bucket_for_label("", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::A);
        assert!(diags.is_empty());
    }

    #[test]
    fn unmapped_label_records_diagnostic() {
        let config = FiscalConfig::default();
        let mut diags = Diagnostics::new();
        let b = bucket_for_label("Turnover Tax", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::A);
        assert!(diags.contains_kind(DiagnosticKind::UnmappedTemplate));
    }

    #[test]
    fn unmapped_label_refined_default_goes_to_e() {
        let config = FiscalConfig::default().with_default_bucket(VatBucket::E);
        let mut diags = Diagnostics::new();
        let b = bucket_for_label("Turnover Tax", &config.bucket_rules, config.default_bucket, &mut diags);
        assert_eq!(b, VatBucket::E);
    }

    #[test]
    fn bucket_code_roundtrip() {
        for b in [VatBucket::A, VatBucket::B, VatBucket::C, VatBucket::D, VatBucket::E, VatBucket::F] {
            assert_eq!(VatBucket::from_code(b.code()), Some(b));
        }
        assert_eq!(VatBucket::from_code("G"), None);
    }
}

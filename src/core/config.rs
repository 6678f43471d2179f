//! Injected fiscal policy configuration.
//!
//! The historical system had two independent implementations with different
//! rate-sourcing and defaulting behavior. Both survive here as named policy
//! variants on an explicit config value, so deployments pick behavior
//! deliberately rather than by accident of which code path shipped.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::buckets::VatBucket;

/// How the applicable tax rate is sourced for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatePolicy {
    /// Parse the item's stored tax-rate map and take the first value;
    /// default to the standard rate unless the template is a zero-rate one.
    #[default]
    ItemRateMap,
    /// Use the template's configured detail-row rate; absence yields 0%.
    TemplateDetail,
}

/// How the wire unit price is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPricePolicy {
    /// Legacy: net amount divided by quantity, grossed up by the rate.
    /// Robust against price-list edits after posting, but re-derives what
    /// the line already states.
    #[default]
    NetDerived,
    /// Refined: take the line's stated rate directly.
    LineRate,
}

/// What happens when payload validation finds issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enforcement {
    /// Issues are surfaced in the outcome; transmission is allowed.
    Soft,
    /// The pipeline aborts with a validation error.
    #[default]
    Hard,
}

/// One label-pattern → bucket mapping rule.
#[derive(Debug, Clone)]
pub struct BucketRule {
    pub pattern: String,
    pub bucket: VatBucket,
}

impl BucketRule {
    pub fn new(pattern: impl Into<String>, bucket: VatBucket) -> Self {
        Self {
            pattern: pattern.into(),
            bucket,
        }
    }

    /// Exact equality or substring containment.
    pub fn matches(&self, label: &str) -> bool {
        label == self.pattern || label.contains(&self.pattern)
    }
}

/// Fiscalization policy for one jurisdiction/deployment.
#[derive(Debug, Clone)]
pub struct FiscalConfig {
    /// Jurisdiction standard rate, used when the item-rate-map policy
    /// finds no explicit rate (default 16).
    pub standard_rate: Decimal,
    pub rate_policy: RatePolicy,
    pub unit_price_policy: UnitPricePolicy,
    /// Bucket for empty or unmapped template labels. The legacy system
    /// used A, the refined one E — this choice materially changes totals,
    /// so it is an explicit named value.
    pub default_bucket: VatBucket,
    /// Ordered mapping rules, first match wins.
    pub bucket_rules: Vec<BucketRule>,
    pub enforcement: Enforcement,
    /// Device till number, transmitted verbatim.
    pub till: String,
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            standard_rate: dec!(16),
            rate_policy: RatePolicy::default(),
            unit_price_policy: UnitPricePolicy::default(),
            default_bucket: VatBucket::A,
            bucket_rules: default_bucket_rules(),
            enforcement: Enforcement::default(),
            till: String::new(),
        }
    }
}

impl FiscalConfig {
    pub fn with_standard_rate(mut self, rate: Decimal) -> Self {
        self.standard_rate = rate;
        self
    }

    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    pub fn with_unit_price_policy(mut self, policy: UnitPricePolicy) -> Self {
        self.unit_price_policy = policy;
        self
    }

    pub fn with_default_bucket(mut self, bucket: VatBucket) -> Self {
        self.default_bucket = bucket;
        self
    }

    pub fn with_bucket_rules(mut self, rules: Vec<BucketRule>) -> Self {
        self.bucket_rules = rules;
        self
    }

    pub fn with_enforcement(mut self, enforcement: Enforcement) -> Self {
        self.enforcement = enforcement;
        self
    }

    pub fn with_till(mut self, till: impl Into<String>) -> Self {
        self.till = till.into();
        self
    }
}

/// The KRA template mapping the historical system shipped with.
///
/// Order matters: the specific "VAT n%" patterns come before their bare
/// "n%" substring fallbacks.
pub fn default_bucket_rules() -> Vec<BucketRule> {
    vec![
        BucketRule::new("VAT 16%", VatBucket::A),
        BucketRule::new("16%", VatBucket::A),
        BucketRule::new("VAT 8%", VatBucket::B),
        BucketRule::new("8%", VatBucket::B),
        BucketRule::new("VAT 10%", VatBucket::C),
        BucketRule::new("10%", VatBucket::C),
        BucketRule::new("VAT 2%", VatBucket::D),
        BucketRule::new("2%", VatBucket::D),
        BucketRule::new("Zero Rated", VatBucket::E),
        BucketRule::new("0%", VatBucket::E),
        BucketRule::new("Exempt", VatBucket::F),
    ]
}

//! Tax rate resolution for a single line item.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::config::{FiscalConfig, RatePolicy};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::types::SaleLine;

/// Outcome of rate resolution for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    /// Applicable tax percentage (0–100).
    pub percent: Decimal,
    pub zero_rated: bool,
}

impl ResolvedRate {
    fn from_percent(percent: Decimal) -> Self {
        Self {
            percent,
            zero_rated: percent.is_zero(),
        }
    }
}

/// Resolve the applicable tax rate for a line item.
///
/// A line with no tax template linked at all is classified zero-rated with
/// a diagnostic — a single bad line item must never block invoice
/// submission. Otherwise resolution follows the configured policy:
///
/// - [`RatePolicy::ItemRateMap`]: first value of the item's stored rate
///   map; if that yields 0 and the template label does not start with
///   "ZERO" (case-insensitive), default to the configured standard rate.
/// - [`RatePolicy::TemplateDetail`]: the template's detail-row rate,
///   absence yields 0%. No standard-rate defaulting.
pub fn resolve_rate(
    line: &SaleLine,
    config: &FiscalConfig,
    diagnostics: &mut Diagnostics,
) -> ResolvedRate {
    let Some(template) = line.tax_template.as_deref() else {
        diagnostics.push(
            DiagnosticKind::MissingTaxTemplate,
            &line.product_code,
            "no tax template linked, classifying as zero-rated",
        );
        return ResolvedRate::from_percent(Decimal::ZERO);
    };

    match config.rate_policy {
        RatePolicy::ItemRateMap => {
            let mut percent = first_map_rate(line, diagnostics).unwrap_or(Decimal::ZERO);
            if percent.is_zero() && !template.to_uppercase().starts_with("ZERO") {
                percent = config.standard_rate;
            }
            ResolvedRate::from_percent(percent)
        }
        RatePolicy::TemplateDetail => {
            ResolvedRate::from_percent(line.template_rate.unwrap_or(Decimal::ZERO))
        }
    }
}

/// First value of the item's stored JSON rate map, in document order
/// (serde_json's `preserve_order` feature), if any.
fn first_map_rate(line: &SaleLine, diagnostics: &mut Diagnostics) -> Option<Decimal> {
    let raw = line.tax_rate_json.as_deref()?;
    let parsed: Result<serde_json::Value, _> = serde_json::from_str(raw);
    let map = match parsed {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            diagnostics.push(
                DiagnosticKind::RateParse,
                &line.product_code,
                format!("unparseable tax rate map: {raw}"),
            );
            return None;
        }
    };
    map.values()
        .next()
        .and_then(|v| v.as_f64())
        .and_then(Decimal::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(template: Option<&str>, rate_json: Option<&str>, template_rate: Option<Decimal>) -> SaleLine {
        SaleLine {
            product_code: "ITM-001".into(),
            product_desc: "Test item".into(),
            quantity: dec!(1),
            rate: dec!(116),
            net_amount: dec!(100),
            tax_template: template.map(String::from),
            tax_rate_json: rate_json.map(String::from),
            template_rate,
        }
    }

    #[test]
    fn explicit_rate_from_map() {
        let mut diags = Diagnostics::new();
        let l = line(Some("VAT 16%"), Some(r#"{"VAT - 16%": 16.0}"#), None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(16));
        assert!(!r.zero_rated);
        assert!(diags.is_empty());
    }

    #[test]
    fn multi_entry_map_takes_document_order_first_value() {
        let mut diags = Diagnostics::new();
        // "Excise Duty" sorts before "VAT - 16%"; document order must win.
        let l = line(
            Some("VAT 16%"),
            Some(r#"{"VAT - 16%": 16.0, "Excise Duty": 5.0}"#),
            None,
        );
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(16));

        let l = line(
            Some("VAT 16%"),
            Some(r#"{"Excise Duty": 5.0, "VAT - 16%": 16.0}"#),
            None,
        );
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(5));
    }

    #[test]
    fn missing_map_defaults_to_standard_rate() {
        let mut diags = Diagnostics::new();
        let l = line(Some("VAT 16%"), None, None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(16));
        assert!(diags.is_empty());
    }

    #[test]
    fn zero_template_stays_zero_rated() {
        let mut diags = Diagnostics::new();
        let l = line(Some("Zero Rated"), None, None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(0));
        assert!(r.zero_rated);
    }

    #[test]
    fn zero_prefix_is_case_insensitive() {
        let mut diags = Diagnostics::new();
        let l = line(Some("zero rated supplies"), None, None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert!(r.zero_rated);
    }

    #[test]
    fn unparseable_map_records_diagnostic_and_defaults() {
        let mut diags = Diagnostics::new();
        let l = line(Some("VAT 16%"), Some("not json"), None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert_eq!(r.percent, dec!(16));
        assert!(diags.contains_kind(DiagnosticKind::RateParse));
    }

    #[test]
    fn missing_template_is_zero_rated_with_diagnostic() {
        let mut diags = Diagnostics::new();
        let l = line(None, Some(r#"{"VAT - 16%": 16.0}"#), None);
        let r = resolve_rate(&l, &FiscalConfig::default(), &mut diags);
        assert!(r.zero_rated);
        assert!(diags.contains_kind(DiagnosticKind::MissingTaxTemplate));
    }

    #[test]
    fn template_detail_policy_uses_detail_rate() {
        let mut diags = Diagnostics::new();
        let config = FiscalConfig::default().with_rate_policy(RatePolicy::TemplateDetail);
        let l = line(Some("VAT 8%"), None, Some(dec!(8)));
        let r = resolve_rate(&l, &config, &mut diags);
        assert_eq!(r.percent, dec!(8));
    }

    #[test]
    fn template_detail_policy_does_not_default() {
        let mut diags = Diagnostics::new();
        let config = FiscalConfig::default().with_rate_policy(RatePolicy::TemplateDetail);
        let l = line(Some("VAT 16%"), None, None);
        let r = resolve_rate(&l, &config, &mut diags);
        assert_eq!(r.percent, dec!(0));
        assert!(r.zero_rated);
    }
}

//! Per-line taxable/tax computation and normalization.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::config::UnitPricePolicy;
use super::rate::ResolvedRate;
use super::types::{ClassifiedLine, SaleLine, TaxCategory};

/// Round to 2 decimal places, half-up away from zero (commercial rounding).
pub(crate) fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Classify one line: compute its taxable base and tax amount and produce
/// the normalized wire record.
///
/// All monetary outputs are absolute-valued; the sign of a return is
/// carried only by the invoice's refund flag. Intermediate amounts keep
/// full precision — only the wire unit price is rounded here, so rounding
/// error does not compound across many lines.
pub fn classify_line(
    line: &SaleLine,
    resolved: &ResolvedRate,
    category: TaxCategory,
    policy: UnitPricePolicy,
) -> (ClassifiedLine, Decimal, Decimal) {
    let quantity = line.quantity.abs();
    let rate_factor = dec!(1) + resolved.percent / dec!(100);

    let unit_price = match policy {
        UnitPricePolicy::NetDerived => {
            // Quantity 0 yields a 0 price; the validator flags the line.
            let base_net = if quantity.is_zero() {
                Decimal::ZERO
            } else {
                (line.net_amount / quantity).abs()
            };
            round_half_up(base_net * rate_factor)
        }
        UnitPricePolicy::LineRate => round_half_up(line.rate.abs()),
    };

    let discount = Decimal::ZERO;
    let gross = unit_price * quantity - discount;

    // Never apply inclusive-tax division to a zero rate.
    let (taxable, tax) = if resolved.percent.is_zero() {
        (unit_price * quantity, Decimal::ZERO)
    } else {
        let taxable = match category {
            TaxCategory::Inclusive => gross / rate_factor,
            TaxCategory::Exclusive => gross,
        };
        (taxable, taxable * resolved.percent / dec!(100))
    };

    let classified = ClassifiedLine {
        product_code: line.product_code.clone(),
        product_desc: line.product_desc.clone(),
        quantity,
        unit_price,
        discount,
        tax_type: resolved.percent.trunc().to_u32().unwrap_or(0),
    };

    (classified, taxable.abs(), tax.abs())
}

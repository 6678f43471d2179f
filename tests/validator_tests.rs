use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ushuru::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice(grand_total: Decimal) -> SourceInvoice {
    SourceInvoice {
        invoice_no: "SINV-00001".into(),
        posting_date: date(2024, 6, 15),
        grand_total,
        total_taxes: dec!(16.00),
        is_return: false,
        is_paid: true,
        customer_pin: String::new(),
        tax_inclusive: true,
        lines: vec![SaleLine {
            product_code: "ITM-1".into(),
            product_desc: "Widget".into(),
            quantity: dec!(1),
            rate: dec!(116.00),
            net_amount: dec!(100.00),
            tax_template: Some("VAT 16%".into()),
            tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
            template_rate: None,
        }],
    }
}

// --- Tolerance boundary ---

#[test]
fn exact_match_passes_hard_enforcement() {
    assert!(fiscalize(&invoice(dec!(116.00)), &FiscalConfig::default(), &NoConfirmations).is_ok());
}

#[test]
fn one_cent_difference_passes() {
    assert!(fiscalize(&invoice(dec!(116.01)), &FiscalConfig::default(), &NoConfirmations).is_ok());
    assert!(fiscalize(&invoice(dec!(115.99)), &FiscalConfig::default(), &NoConfirmations).is_ok());
}

#[test]
fn two_cent_difference_fails_hard() {
    let err = fiscalize(&invoice(dec!(116.02)), &FiscalConfig::default(), &NoConfirmations)
        .unwrap_err();
    assert!(matches!(err, FiscalError::Validation(_)));
}

#[test]
fn two_cent_difference_surfaces_under_soft() {
    let config = FiscalConfig::default().with_enforcement(Enforcement::Soft);
    let outcome = fiscalize(&invoice(dec!(116.02)), &config, &NoConfirmations).unwrap();
    assert_eq!(outcome.validation.len(), 1);
    assert_eq!(outcome.validation[0].field, "total");
}

#[test]
fn tax_total_checked_independently() {
    let mut inv = invoice(dec!(116.00));
    inv.total_taxes = dec!(20.00);
    let config = FiscalConfig::default().with_enforcement(Enforcement::Soft);
    let outcome = fiscalize(&inv, &config, &NoConfirmations).unwrap();
    assert_eq!(outcome.validation.len(), 1);
    assert_eq!(outcome.validation[0].field, "total_tax");
}

// --- Item sanity ---

#[test]
fn zero_quantity_line_fails_validation() {
    let mut inv = invoice(dec!(116.00));
    inv.lines[0].quantity = dec!(0);
    let config = FiscalConfig::default().with_enforcement(Enforcement::Soft);
    let outcome = fiscalize(&inv, &config, &NoConfirmations).unwrap();
    assert!(
        outcome
            .validation
            .iter()
            .any(|v| v.field == "data[0].quantity" && v.message.contains("ITM-1"))
    );
}

#[test]
fn zero_price_line_fails_validation() {
    let mut inv = invoice(dec!(116.00));
    inv.lines[0].rate = dec!(0);
    inv.lines[0].net_amount = dec!(0);
    let config = FiscalConfig::default().with_enforcement(Enforcement::Soft);
    let outcome = fiscalize(&inv, &config, &NoConfirmations).unwrap();
    assert!(outcome.validation.iter().any(|v| v.field == "data[0].unitPrice"));
}

// --- Posting date guard ---

#[test]
fn same_day_posting_permitted() {
    let today = date(2024, 6, 15);
    assert!(posting_date_permitted(today, today, false).is_none());
}

#[test]
fn backdated_posting_needs_explicit_allowance() {
    let posted = date(2024, 6, 1);
    let today = date(2024, 6, 15);
    let issue = posting_date_permitted(posted, today, false).unwrap();
    assert_eq!(issue.field, "posting_date");
    assert!(issue.message.contains("2024-06-01"));

    assert!(posting_date_permitted(posted, today, true).is_none());
}

#[test]
fn future_posting_also_rejected() {
    let posted = date(2024, 6, 16);
    let today = date(2024, 6, 15);
    assert!(posting_date_permitted(posted, today, false).is_some());
}

//! Fiscalize a simple cash sale and print the device payload.
//!
//! Run with: `cargo run --example basic_sale`

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use ushuru::core::*;

fn main() {
    let invoice = SourceInvoice {
        invoice_no: "ACC-SINV-2024-00007".into(),
        posting_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        grand_total: dec!(348.00),
        total_taxes: dec!(48.00),
        is_return: false,
        is_paid: true,
        customer_pin: "A012345678B".into(),
        tax_inclusive: true,
        lines: vec![
            SaleLine {
                product_code: "ITM-001".into(),
                product_desc: "Bottled water 500ml".into(),
                quantity: dec!(2),
                rate: dec!(116.00),
                net_amount: dec!(200.00),
                tax_template: Some("VAT 16%".into()),
                tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
                template_rate: None,
            },
            SaleLine {
                product_code: "ITM-002".into(),
                product_desc: "Maize flour 2kg".into(),
                quantity: dec!(1),
                rate: dec!(116.00),
                net_amount: dec!(100.00),
                tax_template: Some("VAT 16%".into()),
                tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
                template_rate: None,
            },
        ],
    };

    let config = FiscalConfig::default().with_till("T01");
    match fiscalize(&invoice, &config, &NoConfirmations) {
        Ok(outcome) => {
            for diag in outcome.diagnostics.iter() {
                eprintln!("warning: {diag}");
            }
            println!("{}", serde_json::to_string_pretty(&outcome.payload).unwrap());
        }
        Err(e) => eprintln!("fiscalization failed: {e}"),
    }
}

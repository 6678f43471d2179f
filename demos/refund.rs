//! Fiscalize a refund that quotes the original sale's CUIN from a
//! response archive.
//!
//! Run with: `cargo run --example refund`

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use ushuru::core::*;

fn main() {
    // In a real deployment this lookup is backed by the stored authority
    // responses; any `ConfirmationLookup` impl works.
    let mut archive: HashMap<String, String> = HashMap::new();
    archive.insert("ACC-SINV-2024-00007".into(), "0050012345".into());

    let refund = SourceInvoice {
        invoice_no: "ACC-SINV-2024-00007".into(),
        posting_date: NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
        grand_total: dec!(-116.00),
        total_taxes: dec!(-16.00),
        is_return: true,
        is_paid: true,
        customer_pin: String::new(),
        tax_inclusive: true,
        lines: vec![SaleLine {
            product_code: "ITM-001".into(),
            product_desc: "Bottled water 500ml".into(),
            quantity: dec!(-1),
            rate: dec!(116.00),
            net_amount: dec!(-100.00),
            tax_template: Some("VAT 16%".into()),
            tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
            template_rate: None,
        }],
    };

    match fiscalize(&refund, &FiscalConfig::default(), &archive) {
        Ok(outcome) => {
            println!("saleType: refund, cuin: {}", outcome.payload.cuin);
            println!("{}", serde_json::to_string_pretty(&outcome.payload).unwrap());
        }
        Err(e) => eprintln!("fiscalization failed: {e}"),
    }
}

//! Submit a fiscalized payload to a TIMS control unit.
//!
//! Run with: `cargo run --example device_submit --features device -- <host> <port>`

use chrono::{Local, NaiveDate};
use rust_decimal_macros::dec;
use ushuru::core::*;
use ushuru::device::*;

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "192.168.1.50".into());
    let port: u16 = args.next().and_then(|p| p.parse().ok()).unwrap_or(8088);

    let invoice = SourceInvoice {
        invoice_no: "ACC-SINV-2024-00007".into(),
        posting_date: Local::now().date_naive(),
        grand_total: dec!(116.00),
        total_taxes: dec!(16.00),
        is_return: false,
        is_paid: true,
        customer_pin: String::new(),
        tax_inclusive: true,
        lines: vec![SaleLine {
            product_code: "ITM-001".into(),
            product_desc: "Bottled water 500ml".into(),
            quantity: dec!(1),
            rate: dec!(116.00),
            net_amount: dec!(100.00),
            tax_template: Some("VAT 16%".into()),
            tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
            template_rate: None,
        }],
    };

    // Refuse to transmit an invoice not posted today.
    let today: NaiveDate = Local::now().date_naive();
    if let Some(issue) = posting_date_permitted(invoice.posting_date, today, false) {
        eprintln!("{issue}");
        return;
    }

    let outcome = match fiscalize(&invoice, &FiscalConfig::default(), &NoConfirmations) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("fiscalization failed: {e}");
            return;
        }
    };

    let client = match DeviceClient::new(DeviceConfig::new(host, port)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("client setup failed: {e}");
            return;
        }
    };

    if let Err(e) = client.probe() {
        eprintln!("device unreachable: {e}");
        return;
    }

    match client.submit(&outcome.payload).await {
        Ok(response) => {
            // A rejected response is still recorded before being surfaced.
            println!("device answered: {} ({})", response.response_code, response.message);
            match response.confirmation() {
                Some(c) => println!("accepted — CUIN {}, signed {}", c.cuin, c.signing_time),
                None => eprintln!("submission rejected: {:?}", response.ensure_accepted()),
            }
        }
        Err(e) => eprintln!("submission failed: {e}"),
    }
}

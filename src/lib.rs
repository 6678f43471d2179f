//! # ushuru
//!
//! Fiscal-device compliance library for the KRA TIMS (Tax Invoice Management
//! System) control unit: VAT bucket aggregation, payload assembly and
//! validation, and the device transport.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! On the wire they serialize as JSON numbers, which is what the control
//! unit binds.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ushuru::core::*;
//!
//! let invoice = SourceInvoice {
//!     invoice_no: "ACC-SINV-2024-00007".into(),
//!     posting_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     grand_total: dec!(116.00),
//!     total_taxes: dec!(16.00),
//!     is_return: false,
//!     is_paid: true,
//!     customer_pin: "A012345678B".into(),
//!     tax_inclusive: true,
//!     lines: vec![SaleLine {
//!         product_code: "ITM-001".into(),
//!         product_desc: "Bottled water 500ml".into(),
//!         quantity: dec!(1),
//!         rate: dec!(116.00),
//!         net_amount: dec!(100.00),
//!         tax_template: Some("VAT 16%".into()),
//!         tax_rate_json: Some(r#"{"VAT - 16%": 16.0}"#.into()),
//!         template_rate: Some(dec!(16)),
//!     }],
//! };
//!
//! let outcome = fiscalize(&invoice, &FiscalConfig::default(), &NoConfirmations).unwrap();
//! assert_eq!(outcome.payload.total, dec!(116.00));
//! assert_eq!(outcome.payload.rct_no, "SINV247");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Classification, VAT aggregation, payload assembly & validation |
//! | `device` | Async HTTP client for the TIMS control unit |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "device")]
pub mod device;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

//! # suministro
//!
//! Spanish e-invoice reporting library for the AEAT SII ("Suministro
//! Inmediato de Información"): registro construction, SOAP submission,
//! and per-invoice result tracking.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Registros follow the `SuministroLR.xsd` schema the agency publishes.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use suministro::core::*;
//!
//! let invoice = InvoiceBuilder::new("INV-2017-001", NaiveDate::from_ymd_opt(2017, 6, 6).unwrap())
//!     .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
//!     .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
//!     .period(FiscalPeriod::new("06/2017").unwrap())
//!     .add_line(InvoiceLine::new("Servicios", dec!(1), dec!(150.00), dec!(21)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.totals.as_ref().unwrap().gross_total, dec!(181.50));
//! assert!(validate_for_submission(&invoice).is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, NIF validation, periods, numbering |
//! | `payload` | Registro construction (`FacturaExpedida`/`FacturaRecibida`) |
//! | `submit` | Submission workflow: dispatcher, queue, transport trait |
//! | `soap` | SOAP envelopes and the HTTPS transport |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "payload")]
pub mod payload;

#[cfg(feature = "submit")]
pub mod submit;

#[cfg(feature = "soap")]
pub mod soap;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

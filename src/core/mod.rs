//! Core invoice types, validation, and series numbering.
//!
//! This module provides the foundational types for reporting Spanish
//! invoices under the SII (Suministro Inmediato de Información):
//! invoices with their registro coding, tax id checksums, the agency's
//! key tables and gapless series.

mod builder;
mod config;
mod error;
pub mod fiscal_positions;
pub mod nif;
pub mod payment_keys;
mod period;
pub mod registration_keys;
mod series;
mod types;
pub(crate) mod validation;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use nif::{NifError, NifKind, is_valid_nif, sii_nif, validate_nif};
pub use period::*;
pub use registration_keys::is_known_registration_key;
pub use series::*;
pub use types::*;
pub use validation::*;

//! Registro construction.
//!
//! Turns locally stored invoices into the nested records the agency's
//! supply operations carry: identification, settlement period, the
//! side-specific invoice body and, for credit notes, the correction
//! block. Building a registro is pure and never touches the network;
//! failures here (a counterparty without a tax id, a credit note with
//! no correction details) surface before anything is sent.

mod build;
mod types;

pub use build::*;
pub use types::*;

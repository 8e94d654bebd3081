//! Default registration keys per fiscal position.
//!
//! Accounting charts map counterparties to fiscal positions (domestic,
//! intra-community, extra-community, surcharge of equivalence). Each
//! position implies a registration key for each register side, so
//! invoices pick up the right `ClaveRegimenEspecialOTrascendencia`
//! without per-invoice configuration.

use super::types::InvoiceSide;

/// Fiscal position slug, issued-side key, received-side key.
static POSITION_KEYS: &[(&str, &str, &str)] = &[
    ("extracomunitario", "02", "13"),
    ("intracomunitario", "01", "09"),
    ("nacional", "01", "01"),
    ("recargo", "01", "01"),
];

/// Default registration key for a fiscal position and register side.
///
/// Returns `None` for unknown positions; callers should fall back to
/// "01" or ask for explicit configuration.
pub fn default_registration_key(position: &str, side: InvoiceSide) -> Option<&'static str> {
    POSITION_KEYS
        .binary_search_by_key(&position, |(p, _, _)| p)
        .ok()
        .map(|i| match side {
            InvoiceSide::Issued => POSITION_KEYS[i].1,
            InvoiceSide::Received => POSITION_KEYS[i].2,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domestic_maps_to_ordinary_regime() {
        assert_eq!(
            default_registration_key("nacional", InvoiceSide::Issued),
            Some("01")
        );
        assert_eq!(
            default_registration_key("nacional", InvoiceSide::Received),
            Some("01")
        );
    }

    #[test]
    fn intra_community_purchases_use_key_09() {
        assert_eq!(
            default_registration_key("intracomunitario", InvoiceSide::Received),
            Some("09")
        );
        assert_eq!(
            default_registration_key("intracomunitario", InvoiceSide::Issued),
            Some("01")
        );
    }

    #[test]
    fn extra_community_splits_export_and_import() {
        assert_eq!(
            default_registration_key("extracomunitario", InvoiceSide::Issued),
            Some("02")
        );
        assert_eq!(
            default_registration_key("extracomunitario", InvoiceSide::Received),
            Some("13")
        );
    }

    #[test]
    fn unknown_positions_return_none() {
        assert_eq!(default_registration_key("canarias", InvoiceSide::Issued), None);
    }
}

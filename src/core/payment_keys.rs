//! Payment method keys.
//!
//! The cash-basis regime (`ClaveRegimenEspecialOTrascendencia` "07")
//! reports collections and payments with a `Medio` element describing
//! how the money moved.

/// Check whether `code` is a known payment method key.
pub fn is_known_payment_key(code: &str) -> bool {
    payment_key_description(code).is_some()
}

/// Official description of a payment method key, if the key exists.
pub fn payment_key_description(code: &str) -> Option<&'static str> {
    PAYMENT_KEYS
        .binary_search_by_key(&code, |(c, _)| c)
        .ok()
        .map(|i| PAYMENT_KEYS[i].1)
}

/// Payment method keys, sorted for binary search.
static PAYMENT_KEYS: &[(&str, &str)] = &[
    ("01", "Transferencia"),
    ("02", "Cheque"),
    (
        "03",
        "No se cobra / paga (fecha límite de devengo / devengo forzoso en concurso de acreedores)",
    ),
    ("04", "Otros medios de cobro / pago"),
    ("05", "Domiciliación bancaria"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        assert!(is_known_payment_key("01"));
        assert_eq!(payment_key_description("05"), Some("Domiciliación bancaria"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(!is_known_payment_key("06"));
        assert!(!is_known_payment_key(""));
    }
}

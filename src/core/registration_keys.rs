//! Special regime and relevance keys.
//!
//! The `ClaveRegimenEspecialOTrascendencia` element classifies each
//! registro under one of the agency's special regimes. The issued and
//! received registers carry different key lists; "01" (ordinary regime)
//! is the default on both sides.

use super::types::InvoiceSide;

/// Check whether `code` is a key of the register for `side`.
pub fn is_known_registration_key(side: InvoiceSide, code: &str) -> bool {
    registration_key_description(side, code).is_some()
}

/// Official description of a registration key, if the key exists.
pub fn registration_key_description(side: InvoiceSide, code: &str) -> Option<&'static str> {
    let table = match side {
        InvoiceSide::Issued => ISSUED_KEYS,
        InvoiceSide::Received => RECEIVED_KEYS,
    };
    table
        .binary_search_by_key(&code, |(c, _)| c)
        .ok()
        .map(|i| table[i].1)
}

/// Keys of the issued-invoices register, sorted for binary search.
static ISSUED_KEYS: &[(&str, &str)] = &[
    ("01", "Operación de régimen general"),
    ("02", "Exportación"),
    (
        "03",
        "Operaciones a las que se aplique el régimen especial de bienes usados, \
         objetos de arte, antigüedades y objetos de colección",
    ),
    ("04", "Régimen especial del oro de inversión"),
    ("05", "Régimen especial de las agencias de viajes"),
    (
        "06",
        "Régimen especial grupo de entidades en IVA (Nivel Avanzado)",
    ),
    ("07", "Régimen especial del criterio de caja"),
    (
        "08",
        "Operaciones sujetas al IPSI / IGIC (Impuesto sobre la Producción, los Servicios \
         y la Importación / Impuesto General Indirecto Canario)",
    ),
    (
        "09",
        "Facturación de las prestaciones de servicios de agencias de viaje que actúan \
         como mediadoras en nombre y por cuenta ajena",
    ),
    ("10", "Cobros por cuenta de terceros de honorarios profesionales"),
    (
        "11",
        "Operaciones de arrendamiento de local de negocio sujetas a retención",
    ),
    (
        "12",
        "Operaciones de arrendamiento de local de negocio no sujetas a retención",
    ),
    (
        "13",
        "Operaciones de arrendamiento de local de negocio sujetas y no sujetas a retención",
    ),
    (
        "14",
        "Factura con IVA pendiente de devengo en certificaciones de obra cuyo \
         destinatario sea una Administración Pública",
    ),
    (
        "15",
        "Factura con IVA pendiente de devengo en operaciones de tracto sucesivo",
    ),
    ("16", "Primer semestre 2017 y otras facturas anteriores a la inclusión en el SII"),
];

/// Keys of the received-invoices register, sorted for binary search.
static RECEIVED_KEYS: &[(&str, &str)] = &[
    ("01", "Operación de régimen general"),
    (
        "02",
        "Operaciones por las que los empresarios satisfacen compensaciones en las \
         adquisiciones a personas acogidas al Régimen especial de la agricultura, \
         ganadería y pesca",
    ),
    (
        "03",
        "Operaciones a las que se aplique el régimen especial de bienes usados, \
         objetos de arte, antigüedades y objetos de colección",
    ),
    ("04", "Régimen especial del oro de inversión"),
    ("05", "Régimen especial de las agencias de viajes"),
    (
        "06",
        "Régimen especial grupo de entidades en IVA (Nivel Avanzado)",
    ),
    ("07", "Régimen especial del criterio de caja"),
    (
        "08",
        "Operaciones sujetas al IPSI / IGIC (Impuesto sobre la Producción, los Servicios \
         y la Importación / Impuesto General Indirecto Canario)",
    ),
    (
        "09",
        "Adquisiciones intracomunitarias de bienes y prestaciones de servicios",
    ),
    (
        "12",
        "Operaciones de arrendamiento de local de negocio",
    ),
    (
        "13",
        "Factura correspondiente a una importación (informada sin asociar a un DUA)",
    ),
    ("14", "Primer semestre 2017 y otras facturas anteriores a la inclusión en el SII"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_regime_exists_on_both_sides() {
        assert!(is_known_registration_key(InvoiceSide::Issued, "01"));
        assert!(is_known_registration_key(InvoiceSide::Received, "01"));
    }

    #[test]
    fn side_specific_keys() {
        // Intra-community acquisitions only exist on the received side.
        assert!(is_known_registration_key(InvoiceSide::Received, "09"));
        // Exports only on the issued side.
        assert!(is_known_registration_key(InvoiceSide::Issued, "02"));
        assert!(!is_known_registration_key(InvoiceSide::Received, "16"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(!is_known_registration_key(InvoiceSide::Issued, "99"));
        assert!(!is_known_registration_key(InvoiceSide::Received, ""));
    }

    #[test]
    fn descriptions_resolve() {
        assert_eq!(
            registration_key_description(InvoiceSide::Issued, "02"),
            Some("Exportación")
        );
    }
}

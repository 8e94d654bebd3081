use suministro::core::nif::{NifKind, is_valid_nif, normalize, sii_nif, validate_nif};

// --- Prefix handling ---

#[test]
fn strips_the_es_prefix_for_the_schema() {
    assert_eq!(sii_nif("ESU2687761C"), "U2687761C");
    assert_eq!(sii_nif("ESF35999705"), "F35999705");
    assert_eq!(sii_nif("U2687761C"), "U2687761C");
}

#[test]
fn leaves_foreign_prefixes_alone() {
    assert_eq!(sii_nif("FR12345678901"), "FR12345678901");
    assert_eq!(sii_nif("DE123456789"), "DE123456789");
}

#[test]
fn normalizes_spacing_and_punctuation() {
    assert_eq!(normalize("es u2687761-c"), "ESU2687761C");
    assert_eq!(normalize("f.35.999.705"), "F35999705");
    assert_eq!(sii_nif("ES-U2687761C"), "U2687761C");
}

// --- DNI ---

#[test]
fn dni_control_letter() {
    assert_eq!(validate_nif("12345678Z"), Ok(NifKind::Dni));
    assert!(validate_nif("12345678A").is_err());
}

#[test]
fn dni_with_leading_zeros() {
    // 10 % 23 = 10 → 'X'
    assert_eq!(validate_nif("00000010X"), Ok(NifKind::Dni));
}

#[test]
fn dni_error_names_the_expected_letter() {
    let err = validate_nif("12345678A").unwrap_err();
    assert!(err.message.contains("'Z'"));
    assert!(err.to_string().starts_with("invalid NIF '12345678A'"));
}

// --- NIE ---

#[test]
fn nie_prefixes_map_to_digits() {
    assert_eq!(validate_nif("X1234567L"), Ok(NifKind::Nie));
    assert_eq!(validate_nif("Y1234567X"), Ok(NifKind::Nie));
    assert_eq!(validate_nif("Z7654321H"), Ok(NifKind::Nie));
    assert!(validate_nif("X1234567T").is_err());
}

// --- CIF ---

#[test]
fn cif_accepts_digit_or_letter_control_for_most_kinds() {
    // F and U accept either form of the control character.
    assert_eq!(validate_nif("F35999705"), Ok(NifKind::Company));
    assert_eq!(validate_nif("U2687761C"), Ok(NifKind::Company));
    assert!(validate_nif("F35999704").is_err());
}

#[test]
fn cif_digit_only_kinds_reject_the_letter_form() {
    assert_eq!(validate_nif("A58818501"), Ok(NifKind::Company));
    // Same checksum expressed as a letter, not allowed for kind A.
    assert!(validate_nif("A5881850A").is_err());
}

#[test]
fn cif_letter_only_kinds_reject_the_digit_form() {
    assert_eq!(validate_nif("P2800000H"), Ok(NifKind::Company));
    assert!(validate_nif("P28000008").is_err());
}

#[test]
fn cif_rejects_non_digit_body() {
    assert!(validate_nif("A58X18501").is_err());
}

// --- Shape errors ---

#[test]
fn rejects_wrong_lengths() {
    assert!(validate_nif("123").is_err());
    assert!(validate_nif("12345678ZZ").is_err());
    assert!(validate_nif("").is_err());
}

#[test]
fn rejects_unknown_leading_characters() {
    assert!(validate_nif("I12345675").is_err());
    assert!(validate_nif("O12345678").is_err());
}

#[test]
fn prefixed_values_validate_like_bare_ones() {
    assert!(is_valid_nif("ESU2687761C"));
    assert!(is_valid_nif("es 12345678-z"));
    assert!(!is_valid_nif("ES12345678A"));
}

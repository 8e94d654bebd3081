//! Spanish tax identifier handling.
//!
//! Accounting systems usually store tax ids with the `ES` country prefix
//! (`ESB12345674`), while the agency's schema wants the bare nine-character
//! NIF. This module strips the prefix and checksums the three NIF families:
//! personal DNI, foreigner NIE and company CIF.

/// Control letters for DNI and NIE numbers, indexed by `number % 23`.
const DNI_LETTERS: &[u8] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Control letters for CIF numbers, indexed by the control digit.
const CIF_LETTERS: &[u8] = b"JABCDEFGHI";

/// Organisation kind letters a CIF may start with.
const CIF_KINDS: &str = "ABCDEFGHJNPQRSUVW";

/// CIF kinds whose control character must be a letter.
const CIF_LETTER_ONLY: &str = "NPQRSW";

/// CIF kinds whose control character must be a digit.
const CIF_DIGIT_ONLY: &str = "ABEH";

/// Which NIF family a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NifKind {
    /// Personal id, eight digits plus a control letter.
    Dni,
    /// Foreigner id, X/Y/Z plus seven digits plus a control letter.
    Nie,
    /// Company id (CIF), kind letter plus seven digits plus a control
    /// digit or letter.
    Company,
}

/// A malformed or mis-checksummed tax identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NifError {
    /// The offending value, as given.
    pub value: String,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for NifError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid NIF '{}': {}", self.value, self.message)
    }
}

impl std::error::Error for NifError {}

impl NifError {
    fn new(value: &str, message: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            message: message.into(),
        }
    }
}

/// Uppercase a tax id and drop spaces, dots and dashes.
pub fn normalize(tax_id: &str) -> String {
    tax_id
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// The bare NIF the schema expects, with a leading `ES` prefix removed.
///
/// Prefixes other than `ES` are left alone; a foreign id is not a NIF
/// and truncating it would only hide the problem.
pub fn sii_nif(tax_id: &str) -> String {
    let normalized = normalize(tax_id);
    match normalized.strip_prefix("ES") {
        Some(rest) if rest.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) => {
            rest.to_string()
        }
        _ => normalized,
    }
}

/// Checksum-validate a Spanish tax id and report which family it is.
///
/// Accepts values with or without the `ES` prefix.
pub fn validate_nif(tax_id: &str) -> Result<NifKind, NifError> {
    let nif = sii_nif(tax_id);
    if nif.len() != 9 {
        return Err(NifError::new(
            tax_id,
            format!("expected 9 characters, got {}", nif.len()),
        ));
    }
    if !nif.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(NifError::new(tax_id, "contains non-alphanumeric characters"));
    }

    let first = nif.as_bytes()[0] as char;
    if first.is_ascii_digit() {
        validate_dni(tax_id, &nif)
    } else if matches!(first, 'X' | 'Y' | 'Z') {
        validate_nie(tax_id, &nif)
    } else if CIF_KINDS.contains(first) {
        validate_cif(tax_id, &nif)
    } else {
        Err(NifError::new(
            tax_id,
            format!("unknown leading character '{first}'"),
        ))
    }
}

/// True when `tax_id` carries a checksum-valid Spanish NIF.
pub fn is_valid_nif(tax_id: &str) -> bool {
    validate_nif(tax_id).is_ok()
}

fn validate_dni(original: &str, nif: &str) -> Result<NifKind, NifError> {
    let (digits, control) = nif.split_at(8);
    let number: u32 = digits
        .parse()
        .map_err(|_| NifError::new(original, "DNI body must be eight digits"))?;
    let expected = DNI_LETTERS[(number % 23) as usize] as char;
    if control.as_bytes()[0] as char != expected {
        return Err(NifError::new(
            original,
            format!("control letter should be '{expected}'"),
        ));
    }
    Ok(NifKind::Dni)
}

fn validate_nie(original: &str, nif: &str) -> Result<NifKind, NifError> {
    let lead = match nif.as_bytes()[0] {
        b'X' => '0',
        b'Y' => '1',
        b'Z' => '2',
        _ => unreachable!("caller checked the NIE prefix"),
    };
    let body: String = std::iter::once(lead).chain(nif[1..8].chars()).collect();
    let number: u32 = body
        .parse()
        .map_err(|_| NifError::new(original, "NIE body must be seven digits"))?;
    let expected = DNI_LETTERS[(number % 23) as usize] as char;
    if nif.as_bytes()[8] as char != expected {
        return Err(NifError::new(
            original,
            format!("control letter should be '{expected}'"),
        ));
    }
    Ok(NifKind::Nie)
}

fn validate_cif(original: &str, nif: &str) -> Result<NifKind, NifError> {
    let kind = nif.as_bytes()[0] as char;
    let digits = &nif[1..8];
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(NifError::new(original, "CIF body must be seven digits"));
    }

    let mut total = 0u32;
    for (i, c) in digits.chars().enumerate() {
        let d = c.to_digit(10).unwrap_or(0);
        if i % 2 == 0 {
            // Odd positions (1st, 3rd, ...) are doubled and digit-summed.
            let doubled = d * 2;
            total += doubled / 10 + doubled % 10;
        } else {
            total += d;
        }
    }
    let control_digit = (10 - total % 10) % 10;
    let control_letter = CIF_LETTERS[control_digit as usize] as char;

    let control = nif.as_bytes()[8] as char;
    let digit_ok = control.to_digit(10) == Some(control_digit);
    let letter_ok = control == control_letter;

    let valid = if CIF_LETTER_ONLY.contains(kind) {
        letter_ok
    } else if CIF_DIGIT_ONLY.contains(kind) {
        digit_ok
    } else {
        digit_ok || letter_ok
    };
    if !valid {
        return Err(NifError::new(
            original,
            format!("control character should be '{control_digit}' or '{control_letter}'"),
        ));
    }
    Ok(NifKind::Company)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_the_spanish_prefix() {
        assert_eq!(sii_nif("ESF35999705"), "F35999705");
        assert_eq!(sii_nif("F35999705"), "F35999705");
        assert_eq!(sii_nif("es u2687761c"), "U2687761C");
        assert_eq!(sii_nif("FR12345678901"), "FR12345678901");
    }

    #[test]
    fn validates_dni_control_letter() {
        assert_eq!(validate_nif("12345678Z"), Ok(NifKind::Dni));
        assert!(validate_nif("12345678A").is_err());
    }

    #[test]
    fn validates_nie_control_letter() {
        assert_eq!(validate_nif("X1234567L"), Ok(NifKind::Nie));
        assert!(validate_nif("X1234567T").is_err());
    }

    #[test]
    fn validates_cif_control_character() {
        assert_eq!(validate_nif("ESF35999705"), Ok(NifKind::Company));
        assert_eq!(validate_nif("ESU2687761C"), Ok(NifKind::Company));
        assert!(validate_nif("ESF35999704").is_err());
    }

    #[test]
    fn rejects_wrong_length_and_unknown_kinds() {
        assert!(validate_nif("ES123").is_err());
        assert!(validate_nif("I12345675").is_err());
    }
}

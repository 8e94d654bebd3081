use serde::{Deserialize, Serialize};

use super::error::SiiError;

/// Settlement period an invoice is reported under, wrapping the period
/// code used by the host accounting system (e.g. `"03/2017"`).
///
/// The agency's `PeriodoLiquidacion` block is derived from the code:
/// `Periodo` is the first two characters and `Ejercicio` the four
/// trailing digits. Anything between them (separators, ledger suffixes)
/// is ignored. Serializes as the bare code string, and deserializing
/// runs the same checks as [`FiscalPeriod::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalPeriod {
    code: String,
}

impl FiscalPeriod {
    /// Wrap a period code, checking that a month and year can be read
    /// back out of it.
    pub fn new(code: impl Into<String>) -> Result<Self, SiiError> {
        let code = code.into();
        check_code(&code)?;
        Ok(Self { code })
    }

    /// The raw period code as stored by the accounting system.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Two-character period for the `Periodo` element: `"01"` to `"12"`,
    /// or `"0A"` for an annual settlement.
    pub fn period(&self) -> &str {
        &self.code[..2]
    }

    /// Four-digit year for the `Ejercicio` element.
    pub fn year(&self) -> i32 {
        // Validated in `new`; a malformed code cannot reach this point.
        self.code[self.code.len() - 4..].parse().unwrap_or(0)
    }
}

impl std::fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl TryFrom<&str> for FiscalPeriod {
    type Error = SiiError;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl TryFrom<String> for FiscalPeriod {
    type Error = SiiError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<FiscalPeriod> for String {
    fn from(period: FiscalPeriod) -> Self {
        period.code
    }
}

fn check_code(code: &str) -> Result<(), SiiError> {
    if code.len() < 6 {
        return Err(SiiError::Period(format!(
            "period code '{code}' is too short, expected at least 'MM' plus 'YYYY'"
        )));
    }
    if !code.is_ascii() {
        return Err(SiiError::Period(format!(
            "period code '{code}' contains non-ASCII characters"
        )));
    }

    let period = &code[..2];
    let annual = period == "0A";
    if !annual {
        let month: u32 = period.parse().map_err(|_| {
            SiiError::Period(format!(
                "period code '{code}' does not start with a two-digit month or '0A'"
            ))
        })?;
        if !(1..=12).contains(&month) {
            return Err(SiiError::Period(format!(
                "period code '{code}' has month {month} outside 01..=12"
            )));
        }
    }

    let year = &code[code.len() - 4..];
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(SiiError::Period(format!(
            "period code '{code}' does not end in a four-digit year"
        )));
    }

    Ok(())
}

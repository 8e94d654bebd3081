use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::nif;
use super::registration_keys;
use super::types::*;

/// Longest `NumSerieFacturaEmisor` the schema accepts.
const MAX_SERIES_NUMBER_LEN: usize = 60;

/// Longest `DescripcionOperacion` the schema accepts.
const MAX_DESCRIPTION_LEN: usize = 500;

/// Validate invoice structure and coding.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.company.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "company.name",
            "company name must not be empty",
            "NombreRazon",
        ));
    }
    if invoice.counterparty.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "counterparty.name",
            "counterparty name must not be empty",
            "NombreRazon",
        ));
    }

    // Tax ids are optional until submission, but must checksum when present.
    for (field, party) in [
        ("company.tax_id", &invoice.company),
        ("counterparty.tax_id", &invoice.counterparty),
    ] {
        if let Some(tax_id) = &party.tax_id {
            if let Err(e) = nif::validate_nif(tax_id) {
                errors.push(ValidationError::with_rule(field, e.message, "NIF"));
            }
        }
    }

    let series_number = invoice.series_number();
    if series_number.len() > MAX_SERIES_NUMBER_LEN {
        errors.push(ValidationError::with_rule(
            "number",
            format!(
                "invoice number has {} characters, the schema allows {}",
                series_number.len(),
                MAX_SERIES_NUMBER_LEN
            ),
            "NumSerieFacturaEmisor",
        ));
    }

    if let Some(description) = &invoice.description {
        if description.len() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::with_rule(
                "description",
                format!(
                    "operation description has {} characters, the schema allows {}",
                    description.len(),
                    MAX_DESCRIPTION_LEN
                ),
                "DescripcionOperacion",
            ));
        }
    }

    if !registration_keys::is_known_registration_key(invoice.side, &invoice.registration_key) {
        errors.push(ValidationError::with_rule(
            "registration_key",
            format!(
                "'{}' is not a registration key of the {} register",
                invoice.registration_key,
                match invoice.side {
                    InvoiceSide::Issued => "issued",
                    InvoiceSide::Received => "received",
                }
            ),
            "ClaveRegimenEspecialOTrascendencia",
        ));
    }

    match (invoice.kind, &invoice.correction) {
        (DocumentKind::CreditNote, None) => {
            errors.push(ValidationError::with_rule(
                "correction",
                "credit note carries no correction details",
                "TipoRectificativa",
            ));
        }
        (DocumentKind::Standard, Some(_)) => {
            errors.push(ValidationError::with_rule(
                "correction",
                "ordinary invoice carries correction details",
                "TipoRectificativa",
            ));
        }
        _ => {}
    }

    if invoice.lines.is_empty() {
        errors.push(ValidationError::with_rule(
            "lines",
            "invoice must have at least one line",
            "DetalleIVA",
        ));
    }
    for (i, line) in invoice.lines.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    errors
}

/// Validate everything a registro needs before it can be sent:
/// structure plus the fields the agency refuses to take empty.
pub fn validate_for_submission(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = validate_invoice(invoice);

    if invoice.series_number().trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice has no number yet",
            "NumSerieFacturaEmisor",
        ));
    }

    if tax_id_missing(&invoice.counterparty) {
        errors.push(ValidationError::with_rule(
            "counterparty.tax_id",
            format!("counterparty '{}' has no tax id", invoice.counterparty.name),
            "NIF",
        ));
    }
    if tax_id_missing(&invoice.company) {
        errors.push(ValidationError::with_rule(
            "company.tax_id",
            format!("company '{}' has no tax id", invoice.company.name),
            "NIF",
        ));
    }

    errors
}

fn tax_id_missing(party: &Party) -> bool {
    party.tax_id.as_deref().is_none_or(|t| t.trim().is_empty())
}

fn validate_line(line: &InvoiceLine, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if line.quantity.is_zero() {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must not be zero",
        ));
    }

    if line.unit_price.is_sign_negative() {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    }

    if line.tax_rate.is_sign_negative() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.tax_rate"),
            "VAT rate must not be negative",
            "TipoImpositivo",
        ));
    }
}

/// Calculate totals for an invoice (mutates in place).
///
/// Lines are grouped by VAT rate; each group's quota is rounded to cents
/// before summing, matching how the registro reports `DetalleIVA`.
pub fn calculate_totals(invoice: &mut Invoice) {
    let summary = tax_summary(&invoice.lines);

    let untaxed_total: Decimal = summary.iter().map(|s| s.taxable_base).sum();
    let tax_total: Decimal = summary.iter().map(|s| s.tax_amount).sum();

    invoice.totals = Some(InvoiceTotals {
        untaxed_total,
        tax_total,
        gross_total: untaxed_total + tax_total,
        tax_summary: summary,
    });
}

/// Per-rate bases and quotas for a set of lines, ascending by rate.
pub fn tax_summary(lines: &[InvoiceLine]) -> Vec<TaxSummary> {
    let mut groups: HashMap<Decimal, Decimal> = HashMap::new();
    for line in lines {
        *groups.entry(line.tax_rate).or_insert(Decimal::ZERO) += line.base();
    }

    let mut summary: Vec<TaxSummary> = groups
        .into_iter()
        .map(|(rate, taxable_base)| TaxSummary {
            rate,
            taxable_base,
            tax_amount: round_half_up(taxable_base * rate / dec!(100), 2),
        })
        .collect();

    // Sort for deterministic output
    summary.sort_by(|a, b| a.rate.cmp(&b.rate));
    summary
}

/// Untaxed and tax totals for a set of lines, without mutating anything.
pub(crate) fn line_totals(lines: &[InvoiceLine]) -> (Decimal, Decimal) {
    let summary = tax_summary(lines);
    (
        summary.iter().map(|s| s.taxable_base).sum(),
        summary.iter().map(|s| s.tax_amount).sum(),
    )
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

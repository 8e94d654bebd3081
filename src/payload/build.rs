use rust_decimal::Decimal;

use crate::core::{
    CorrectionMode, DocumentKind, Invoice, InvoiceSide, Party, SiiConfig, SiiError, nif,
    validation,
};

use super::types::*;

/// Assemble the registro for one invoice.
///
/// Fails without building anything when a party the registro needs has
/// no tax id, or the invoice is structurally unfit for its register.
pub fn build_invoice_record(
    invoice: &Invoice,
    config: &SiiConfig,
) -> Result<InvoiceRecord, SiiError> {
    let counterparty_nif = required_nif(&invoice.counterparty, "counterparty")?;

    let period = PeriodBlock {
        period: invoice.period.period().to_string(),
        year: invoice.period.year(),
    };

    let description = invoice
        .description
        .clone()
        .unwrap_or_else(|| config.default_description.clone());

    let counterparty = PartyBlock {
        name: invoice.counterparty.name.clone(),
        nif: counterparty_nif.clone(),
    };

    let invoice_type = invoice_type_for(invoice);
    let correction = correction_block(invoice)?;

    match invoice.side {
        InvoiceSide::Issued => {
            let company_nif = required_nif(&invoice.company, "company")?;
            Ok(InvoiceRecord {
                period,
                id: InvoiceId {
                    issuer_nif: company_nif,
                    series_number: invoice.series_number().to_string(),
                    issue_date: invoice.issue_date,
                },
                detail: InvoiceDetail::Issued(IssuedDetail {
                    invoice_type,
                    registration_key: invoice.registration_key.clone(),
                    description,
                    counterparty,
                    breakdown: IssuedBreakdown,
                    total: invoice.gross_total(),
                    correction,
                }),
            })
        }
        InvoiceSide::Received => {
            let tax_details = tax_details(invoice);
            let deductible_tax = tax_details.iter().map(|d| d.tax_amount).sum();
            Ok(InvoiceRecord {
                period,
                id: InvoiceId {
                    // The supplier issued the document we are reporting.
                    issuer_nif: counterparty_nif,
                    series_number: invoice.series_number().to_string(),
                    issue_date: invoice.issue_date,
                },
                detail: InvoiceDetail::Received(ReceivedDetail {
                    invoice_type,
                    registration_key: invoice.registration_key.clone(),
                    description,
                    counterparty,
                    tax_details,
                    deductible_tax,
                    accounting_date: invoice.effective_accounting_date(),
                    total: invoice.gross_total(),
                    correction,
                }),
            })
        }
    }
}

/// `Cabecera` for a batch sent on behalf of the configured titular.
pub fn build_batch_header(
    config: &SiiConfig,
    communication: CommunicationType,
) -> Result<BatchHeader, SiiError> {
    if config.company_tax_id.trim().is_empty() {
        return Err(SiiError::Validation(format!(
            "company '{}' has no tax id",
            config.company_name
        )));
    }
    Ok(BatchHeader {
        version: config.version,
        titular: PartyBlock {
            name: config.company_name.clone(),
            nif: nif::sii_nif(&config.company_tax_id),
        },
        communication,
    })
}

fn required_nif(party: &Party, role: &str) -> Result<String, SiiError> {
    match party.tax_id.as_deref() {
        Some(tax_id) if !tax_id.trim().is_empty() => Ok(nif::sii_nif(tax_id)),
        _ => Err(SiiError::Validation(format!(
            "{role} '{}' has no tax id",
            party.name
        ))),
    }
}

fn invoice_type_for(invoice: &Invoice) -> SiiInvoiceType {
    match invoice.kind {
        DocumentKind::Standard => SiiInvoiceType::F1,
        // Without a stated legal ground a credit note reports as R4,
        // "any other reason".
        DocumentKind::CreditNote => SiiInvoiceType::R4,
    }
}

fn correction_block(invoice: &Invoice) -> Result<Option<CorrectionBlock>, SiiError> {
    match (invoice.kind, &invoice.correction) {
        (DocumentKind::Standard, None) => Ok(None),
        (DocumentKind::Standard, Some(_)) => Err(SiiError::Validation(format!(
            "invoice '{}' is not a credit note but carries correction details",
            invoice.series_number()
        ))),
        (DocumentKind::CreditNote, None) => Err(SiiError::Validation(format!(
            "credit note '{}' carries no correction details",
            invoice.series_number()
        ))),
        (DocumentKind::CreditNote, Some(correction)) => {
            let amounts = match correction.mode {
                CorrectionMode::Substitution => {
                    let corrected_base: Decimal =
                        correction.originals.iter().map(|o| o.untaxed_total).sum();
                    let corrected_tax: Decimal =
                        correction.originals.iter().map(|o| o.tax_total).sum();
                    Some(CorrectionAmounts {
                        corrected_base,
                        corrected_tax,
                    })
                }
                CorrectionMode::Differences => None,
            };
            Ok(Some(CorrectionBlock {
                mode: correction.mode,
                amounts,
            }))
        }
    }
}

/// One `DetalleIVA` per VAT rate, from cached totals when available.
fn tax_details(invoice: &Invoice) -> Vec<VatDetail> {
    let summary = match &invoice.totals {
        Some(t) => t.tax_summary.clone(),
        None => validation::tax_summary(&invoice.lines),
    };
    summary
        .into_iter()
        .map(|s| VatDetail {
            taxable_base: s.taxable_base,
            tax_rate: s.rate,
            tax_amount: s.tax_amount,
        })
        .collect()
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{CorrectionMode, SiiVersion};

/// One registro of a supply batch: the nested structure a single
/// invoice occupies inside `SuministroLRFacturas*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Settlement block (`PeriodoLiquidacion`; `PeriodoImpositivo` in v1.0).
    pub period: PeriodBlock,
    /// Identification block (`IDFactura`).
    pub id: InvoiceId,
    /// Side-specific body: `FacturaExpedida` or `FacturaRecibida`.
    pub detail: InvoiceDetail,
}

/// `Ejercicio` and `Periodo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBlock {
    /// Two-character period, "01".."12" or "0A".
    pub period: String,
    /// Four-digit settlement year.
    pub year: i32,
}

/// `IDFactura`: who issued the invoice, under which number, and when.
///
/// For issued invoices the issuer is the reporting company; for received
/// invoices it is the supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceId {
    /// Bare NIF of the issuer (`IDEmisorFactura/NIF`).
    pub issuer_nif: String,
    /// `NumSerieFacturaEmisor`.
    pub series_number: String,
    /// `FechaExpedicionFacturaEmisor`.
    pub issue_date: NaiveDate,
}

/// The register-specific body of a registro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceDetail {
    /// `FacturaExpedida`.
    Issued(IssuedDetail),
    /// `FacturaRecibida`.
    Received(ReceivedDetail),
}

impl InvoiceDetail {
    /// The `TipoFactura` of either body.
    pub fn invoice_type(&self) -> SiiInvoiceType {
        match self {
            Self::Issued(d) => d.invoice_type,
            Self::Received(d) => d.invoice_type,
        }
    }

    /// The correction block of either body, if any.
    pub fn correction(&self) -> Option<&CorrectionBlock> {
        match self {
            Self::Issued(d) => d.correction.as_ref(),
            Self::Received(d) => d.correction.as_ref(),
        }
    }
}

/// `FacturaExpedida`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedDetail {
    /// `TipoFactura`.
    pub invoice_type: SiiInvoiceType,
    /// `ClaveRegimenEspecialOTrascendencia`.
    pub registration_key: String,
    /// `DescripcionOperacion`.
    pub description: String,
    /// `Contraparte`: the customer.
    pub counterparty: PartyBlock,
    /// `TipoDesglose`, sent as an empty element. The upstream accounting
    /// data does not split Sujeta/NoSujeta/Exenta, and the agency accepts
    /// the element empty.
    pub breakdown: IssuedBreakdown,
    /// `ImporteTotal`.
    pub total: Decimal,
    /// `TipoRectificativa` and `ImporteRectificacion` for credit notes.
    pub correction: Option<CorrectionBlock>,
}

/// Placeholder for the issued-side `TipoDesglose` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedBreakdown;

/// `FacturaRecibida`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedDetail {
    /// `TipoFactura`.
    pub invoice_type: SiiInvoiceType,
    /// `ClaveRegimenEspecialOTrascendencia`.
    pub registration_key: String,
    /// `DescripcionOperacion`.
    pub description: String,
    /// `Contraparte`: the supplier.
    pub counterparty: PartyBlock,
    /// `DesgloseFactura/DesgloseIVA/DetalleIVA`, one entry per VAT rate.
    pub tax_details: Vec<VatDetail>,
    /// `CuotaDeducible`.
    pub deductible_tax: Decimal,
    /// `FechaRegContable`.
    pub accounting_date: NaiveDate,
    /// `ImporteTotal`.
    pub total: Decimal,
    /// `TipoRectificativa` and `ImporteRectificacion` for credit notes.
    pub correction: Option<CorrectionBlock>,
}

/// One `DetalleIVA` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatDetail {
    /// `BaseImponible`.
    pub taxable_base: Decimal,
    /// `TipoImpositivo`.
    pub tax_rate: Decimal,
    /// `CuotaSoportada`.
    pub tax_amount: Decimal,
}

/// Correction data a credit note's registro carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionBlock {
    /// `TipoRectificativa`: substitution or differences.
    pub mode: CorrectionMode,
    /// `ImporteRectificacion`; present for substitution corrections.
    pub amounts: Option<CorrectionAmounts>,
}

/// `ImporteRectificacion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionAmounts {
    /// `BaseRectificada`: summed untaxed totals of the origin invoices.
    pub corrected_base: Decimal,
    /// `CuotaRectificada`: summed tax totals of the origin invoices.
    pub corrected_tax: Decimal,
}

/// `NombreRazon` plus bare `NIF`, used for `Contraparte` and `Titular`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBlock {
    /// `NombreRazon`.
    pub name: String,
    /// Bare NIF without country prefix.
    pub nif: String,
}

/// `Cabecera` of a supply batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// `IDVersionSii`.
    pub version: SiiVersion,
    /// `Titular`: the reporting company.
    pub titular: PartyBlock,
    /// `TipoComunicacion`.
    pub communication: CommunicationType,
}

/// `TipoComunicacion` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunicationType {
    /// A0 — first registration of the invoices in the batch.
    Registration,
    /// A1 — amendment of registros already on file.
    Amendment,
}

impl CommunicationType {
    /// Schema code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Registration => "A0",
            Self::Amendment => "A1",
        }
    }

    /// Parse from the schema code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A0" => Some(Self::Registration),
            "A1" => Some(Self::Amendment),
            _ => None,
        }
    }
}

/// `TipoFactura` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiiInvoiceType {
    /// F1 — ordinary invoice.
    F1,
    /// F2 — simplified invoice (ticket).
    F2,
    /// F3 — invoice replacing reported simplified invoices.
    F3,
    /// F4 — summary entry for a batch of invoices.
    F4,
    /// R1 — credit note, legal grounds of art. 80.1 and 80.2 LIVA.
    R1,
    /// R2 — credit note, debtor in bankruptcy (art. 80.3).
    R2,
    /// R3 — credit note, uncollectible debt (art. 80.4).
    R3,
    /// R4 — credit note, any other reason.
    R4,
    /// R5 — credit note over simplified invoices.
    R5,
}

impl SiiInvoiceType {
    /// Schema code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
        }
    }

    /// Parse from the schema code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F1" => Some(Self::F1),
            "F2" => Some(Self::F2),
            "F3" => Some(Self::F3),
            "F4" => Some(Self::F4),
            "R1" => Some(Self::R1),
            "R2" => Some(Self::R2),
            "R3" => Some(Self::R3),
            "R4" => Some(Self::R4),
            "R5" => Some(Self::R5),
            _ => None,
        }
    }

    /// True for the R-family of correcting invoice types.
    pub fn is_correction(&self) -> bool {
        matches!(self, Self::R1 | Self::R2 | Self::R3 | Self::R4 | Self::R5)
    }
}

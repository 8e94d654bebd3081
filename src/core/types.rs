use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::FiscalPeriod;

/// An invoice as stored by the host accounting system, together with its
/// SII reporting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number; feeds `NumSerieFacturaEmisor` unless a supplier
    /// number overrides it. Empty until a series assigns one.
    pub number: String,
    /// Number the supplier printed on a received invoice. Takes
    /// precedence over `number` in the registro identification.
    pub supplier_number: Option<String>,
    /// Issue date (`FechaExpedicionFacturaEmisor`).
    pub issue_date: NaiveDate,
    /// Ledger entry date for received invoices (`FechaRegContable`).
    /// Falls back to the issue date when absent.
    pub accounting_date: Option<NaiveDate>,
    /// Reporting side: issued (sales) or received (purchases).
    pub side: InvoiceSide,
    /// Ordinary invoice or correcting credit note.
    pub kind: DocumentKind,
    /// Correction details; expected exactly when `kind` is `CreditNote`.
    pub correction: Option<Correction>,
    /// Workflow state.
    pub state: InvoiceState,
    /// The reporting company (the SII titular).
    pub company: Party,
    /// `Contraparte`: customer on issued invoices, supplier on received.
    pub counterparty: Party,
    /// Invoice lines.
    pub lines: Vec<InvoiceLine>,
    /// Settlement period (`PeriodoLiquidacion`).
    pub period: FiscalPeriod,
    /// Special regime key (`ClaveRegimenEspecialOTrascendencia`).
    pub registration_key: String,
    /// Operation description (`DescripcionOperacion`); the configured
    /// default applies when absent.
    pub description: Option<String>,
    /// Calculated totals (set by `calculate_totals()`).
    pub totals: Option<InvoiceTotals>,
    /// SII submission tracking.
    pub sii: SiiStatus,
}

impl Invoice {
    /// The number reported as `NumSerieFacturaEmisor`: the supplier's
    /// own number when present, the local number otherwise.
    pub fn series_number(&self) -> &str {
        self.supplier_number.as_deref().unwrap_or(&self.number)
    }

    /// `FechaRegContable` for received invoices.
    pub fn effective_accounting_date(&self) -> NaiveDate {
        self.accounting_date.unwrap_or(self.issue_date)
    }

    /// Sum of line bases, from cached totals when available.
    pub fn untaxed_total(&self) -> Decimal {
        match &self.totals {
            Some(t) => t.untaxed_total,
            None => super::validation::line_totals(&self.lines).0,
        }
    }

    /// Sum of per-rate tax amounts, from cached totals when available.
    pub fn tax_total(&self) -> Decimal {
        match &self.totals {
            Some(t) => t.tax_total,
            None => super::validation::line_totals(&self.lines).1,
        }
    }

    /// `ImporteTotal`: untaxed total plus tax.
    pub fn gross_total(&self) -> Decimal {
        self.untaxed_total() + self.tax_total()
    }
}

/// Which register book an invoice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceSide {
    /// Sales invoice, reported to the issued-invoices register.
    Issued,
    /// Purchase invoice, reported to the received-invoices register.
    Received,
}

impl InvoiceSide {
    /// True for sales invoices.
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued)
    }
}

/// Ordinary invoice versus correcting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A regular invoice.
    Standard,
    /// A credit note correcting earlier invoices.
    CreditNote,
}

/// Invoice workflow states relevant to reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceState {
    /// Editable, not yet posted.
    Draft,
    /// Posted and awaiting payment; reportable.
    Open,
    /// Settled; reportable.
    Paid,
    /// Cancelled locally.
    Cancelled,
}

impl std::fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// How a credit note corrects its origin invoices (`TipoRectificativa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionMode {
    /// S — by substitution; corrected base and tax are reported.
    Substitution,
    /// I — by differences; only the delta amounts are reported.
    Differences,
}

impl CorrectionMode {
    /// Schema code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Substitution => "S",
            Self::Differences => "I",
        }
    }

    /// Parse from the schema code letter.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Substitution),
            "I" => Some(Self::Differences),
            _ => None,
        }
    }
}

/// Correction details attached to a credit note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    /// Substitution or differences.
    pub mode: CorrectionMode,
    /// The invoices being corrected. May be empty when the origin
    /// documents are unknown; corrected amounts then sum to zero.
    pub originals: Vec<CorrectedInvoiceRef>,
}

/// Identification and amounts of one corrected origin invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedInvoiceRef {
    /// Origin invoice number.
    pub number: String,
    /// Origin issue date.
    pub issue_date: NaiveDate,
    /// Origin untaxed total, contributing to `BaseRectificada`.
    pub untaxed_total: Decimal,
    /// Origin tax total, contributing to `CuotaRectificada`.
    pub tax_total: Decimal,
}

impl CorrectedInvoiceRef {
    /// Reference an existing invoice as the correction origin.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            number: invoice.number.clone(),
            issue_date: invoice.issue_date,
            untaxed_total: invoice.untaxed_total(),
            tax_total: invoice.tax_total(),
        }
    }
}

/// An invoice line. Bases and quotas are derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// What was sold or bought.
    pub description: String,
    /// Invoiced quantity.
    pub quantity: Decimal,
    /// Net price per unit.
    pub unit_price: Decimal,
    /// VAT rate percentage (`TipoImpositivo`), e.g. 21 or 10.
    pub tax_rate: Decimal,
}

impl InvoiceLine {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            tax_rate,
        }
    }

    /// Net base contributed by this line.
    pub fn base(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Calculated invoice totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line bases.
    pub untaxed_total: Decimal,
    /// Sum of per-rate tax amounts, each rounded to cents.
    pub tax_total: Decimal,
    /// `ImporteTotal`: untaxed plus tax.
    pub gross_total: Decimal,
    /// Per-rate breakdown, ascending by rate.
    pub tax_summary: Vec<TaxSummary>,
}

/// Base and quota accumulated for one VAT rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    /// VAT rate percentage.
    pub rate: Decimal,
    /// Taxable base at this rate (`BaseImponible`).
    pub taxable_base: Decimal,
    /// Tax amount at this rate, rounded to cents.
    pub tax_amount: Decimal,
}

/// A party on the invoice: the titular company or the counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Legal name (`NombreRazon`).
    pub name: String,
    /// Tax identifier as stored, usually with the `ES` prefix.
    pub tax_id: Option<String>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: None,
        }
    }

    /// Attach a tax identifier.
    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }
}

/// Identifier of a queued submission job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Per-invoice SII tracking, kept alongside the accounting document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiiStatus {
    /// True once the agency has accepted the invoice.
    pub sent: bool,
    /// Secure verification code of the last accepted submission.
    pub csv: Option<String>,
    /// One record per submission attempt, append-only.
    pub results: Vec<SubmissionResult>,
    /// Queue jobs created for this invoice.
    pub jobs: Vec<JobId>,
}

/// Overall batch verdict reported in `EstadoEnvio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Every registro was accepted.
    Accepted,
    /// Accepted, but some registros carry errors.
    PartiallyAccepted,
    /// The batch was rejected.
    Rejected,
}

impl SubmissionState {
    /// Schema code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accepted => "Correcto",
            Self::PartiallyAccepted => "ParcialmenteCorrecto",
            Self::Rejected => "Incorrecto",
        }
    }

    /// Parse from the schema code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Correcto" => Some(Self::Accepted),
            "ParcialmenteCorrecto" => Some(Self::PartiallyAccepted),
            "Incorrecto" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// True when the agency registered the batch, with or without
    /// per-registro errors.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Outcome of one submission attempt for one invoice.
///
/// Exactly one of these is appended per invoice per send, whatever the
/// outcome: acceptance, rejection or a failure that produced no agency
/// response at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Agency verdict; `None` when no response was obtained.
    pub state: Option<SubmissionState>,
    /// Secure verification code, present on acceptance.
    pub csv: Option<String>,
    /// Registration error code (`CodigoErrorRegistro`) on rejection.
    pub error_code: Option<u32>,
    /// Rejection description (`DescripcionErrorRegistro`).
    pub error_description: Option<String>,
    /// Local failure detail when no agency response exists.
    pub message: Option<String>,
    /// When the outcome was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl SubmissionResult {
    /// Record an accepted submission.
    pub fn accepted(state: SubmissionState, csv: Option<String>) -> Self {
        Self {
            state: Some(state),
            csv,
            error_code: None,
            error_description: None,
            message: None,
            recorded_at: Utc::now(),
        }
    }

    /// Record a rejection with the agency's error detail.
    pub fn rejected(
        state: SubmissionState,
        error_code: Option<u32>,
        error_description: Option<String>,
    ) -> Self {
        Self {
            state: Some(state),
            csv: None,
            error_code,
            error_description,
            message: None,
            recorded_at: Utc::now(),
        }
    }

    /// Record an attempt that produced no agency verdict.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            state: None,
            csv: None,
            error_code: None,
            error_description: None,
            message: Some(message.into()),
            recorded_at: Utc::now(),
        }
    }

    /// True when this attempt ended in acceptance.
    pub fn is_accepted(&self) -> bool {
        self.state.is_some_and(|s| s.is_accepted())
    }
}

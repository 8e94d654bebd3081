use chrono::NaiveDate;

use super::error::SiiError;
use super::period::FiscalPeriod;
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// ```
/// use suministro::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("INV-2017-001", NaiveDate::from_ymd_opt(2017, 6, 15).unwrap())
///     .company(Party::new("Gestión Documental SL").with_tax_id("ESU2687761C"))
///     .counterparty(Party::new("Cliente SA").with_tax_id("ESF35999705"))
///     .period(FiscalPeriod::new("06/2017").unwrap())
///     .add_line(InvoiceLine::new("Consultoría", dec!(10), dec!(80), dec!(21)))
///     .build();
/// assert!(invoice.is_ok());
/// ```
pub struct InvoiceBuilder {
    number: String,
    supplier_number: Option<String>,
    issue_date: NaiveDate,
    accounting_date: Option<NaiveDate>,
    side: InvoiceSide,
    kind: DocumentKind,
    correction: Option<Correction>,
    company: Option<Party>,
    counterparty: Option<Party>,
    lines: Vec<InvoiceLine>,
    period: Option<FiscalPeriod>,
    registration_key: String,
    description: Option<String>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            supplier_number: None,
            issue_date,
            accounting_date: None,
            side: InvoiceSide::Issued,
            kind: DocumentKind::Standard,
            correction: None,
            company: None,
            counterparty: None,
            lines: Vec::new(),
            period: None,
            registration_key: "01".to_string(),
            description: None,
        }
    }

    /// Start an unnumbered draft; a series assigns the number on posting.
    pub fn unnumbered(issue_date: NaiveDate) -> Self {
        Self::new("", issue_date)
    }

    /// The number the supplier printed on a received invoice.
    pub fn supplier_number(mut self, number: impl Into<String>) -> Self {
        self.supplier_number = Some(number.into());
        self
    }

    /// Ledger entry date for received invoices.
    pub fn accounting_date(mut self, date: NaiveDate) -> Self {
        self.accounting_date = Some(date);
        self
    }

    pub fn side(mut self, side: InvoiceSide) -> Self {
        self.side = side;
        self
    }

    /// Turn the invoice into a credit note correcting `originals`.
    pub fn credit_note(mut self, mode: CorrectionMode, originals: Vec<CorrectedInvoiceRef>) -> Self {
        self.kind = DocumentKind::CreditNote;
        self.correction = Some(Correction { mode, originals });
        self
    }

    pub fn company(mut self, party: Party) -> Self {
        self.company = Some(party);
        self
    }

    pub fn counterparty(mut self, party: Party) -> Self {
        self.counterparty = Some(party);
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn period(mut self, period: FiscalPeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// Special regime key; defaults to "01", ordinary operations.
    pub fn registration_key(mut self, key: impl Into<String>) -> Self {
        self.registration_key = key.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the invoice, calculating totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, SiiError> {
        let mut invoice = self.assemble()?;

        validation::calculate_totals(&mut invoice);

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SiiError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without validation — useful for testing or importing external data.
    pub fn build_unchecked(self) -> Result<Invoice, SiiError> {
        let mut invoice = self.assemble()?;
        validation::calculate_totals(&mut invoice);
        Ok(invoice)
    }

    fn assemble(self) -> Result<Invoice, SiiError> {
        let company = self
            .company
            .ok_or_else(|| SiiError::Builder("company is required".into()))?;
        let counterparty = self
            .counterparty
            .ok_or_else(|| SiiError::Builder("counterparty is required".into()))?;
        let period = self
            .period
            .ok_or_else(|| SiiError::Builder("settlement period is required".into()))?;

        if self.lines.is_empty() {
            return Err(SiiError::Builder("at least one line is required".into()));
        }

        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(SiiError::Builder(
                "invoice cannot have more than 10,000 lines".into(),
            ));
        }

        Ok(Invoice {
            number: self.number,
            supplier_number: self.supplier_number,
            issue_date: self.issue_date,
            accounting_date: self.accounting_date,
            side: self.side,
            kind: self.kind,
            correction: self.correction,
            state: InvoiceState::Draft,
            company,
            counterparty,
            lines: self.lines,
            period,
            registration_key: self.registration_key,
            description: self.description,
            totals: None,
            sii: SiiStatus::default(),
        })
    }
}

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Invoice series with one register per exercise year.
///
/// Spanish invoicing rules (RD 1619/2012) require correlative numbering
/// within a series. Numbers carry the exercise year of the issue date,
/// `{prefix}{year}/{sequential}`, and every year keeps its own register:
/// a straggler dated in an already-closed year continues that year's
/// count instead of breaking the current one.
#[derive(Debug, Clone)]
pub struct InvoiceSeries {
    prefix: String,
    zero_pad: usize,
    registers: BTreeMap<i32, u64>,
}

impl InvoiceSeries {
    /// Create a series. A year's register opens at 1 the first time an
    /// invoice dated in that year asks for a number.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            zero_pad: 4,
            registers: BTreeMap::new(),
        }
    }

    /// Seed one exercise year's register, taking over numbering from the
    /// accounting system. Chainable for several open years.
    pub fn resume(mut self, year: i32, next_number: u64) -> Self {
        self.registers.insert(year, next_number.max(1));
        self
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Issue the next number from the register of the date's exercise
    /// year, consuming it.
    pub fn next_number(&mut self, date: NaiveDate) -> String {
        let register = self.registers.entry(date.year()).or_insert(1);
        let number = *register;
        *register += 1;
        self.format(date.year(), number)
    }

    /// Preview what [`Self::next_number`] would issue for the date.
    pub fn peek(&self, date: NaiveDate) -> String {
        let number = self.registers.get(&date.year()).copied().unwrap_or(1);
        self.format(date.year(), number)
    }

    /// Exercise years with an open register, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.registers.keys().copied()
    }

    fn format(&self, year: i32, number: u64) -> String {
        format!(
            "{}{}/{:0>width$}",
            self.prefix,
            year,
            number,
            width = self.zero_pad
        )
    }
}

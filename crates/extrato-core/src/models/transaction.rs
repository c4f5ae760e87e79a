//! Transaction records produced from statement lines.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One parsed financial line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Posting date as printed (`DD/MM`, `DD/MM/YY` or `DD/MM/YYYY`), or empty.
    pub date: String,

    /// Whatever text remains after the other fields are claimed.
    pub description: String,

    /// Installment marker (`N/M`), or empty.
    pub installment: String,

    /// Localized amount, e.g. `1.234,56` or `-50,00`.
    pub value: String,

    /// Identifier unique within one response.
    pub id: u64,
}

impl TransactionRecord {
    /// Parse the localized value into a decimal amount.
    pub fn amount(&self) -> Option<Decimal> {
        parse_localized_amount(&self.value)
    }
}

/// Response returned for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Number of records.
    pub count: usize,

    /// Records in top-to-bottom order.
    pub transactions: Vec<TransactionRecord>,
}

impl ParseResponse {
    pub fn new(transactions: Vec<TransactionRecord>) -> Self {
        Self {
            count: transactions.len(),
            transactions,
        }
    }

    /// An empty response (no words selected).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Sum of all parseable record values.
    pub fn total(&self) -> Decimal {
        total_value(&self.transactions)
    }
}

/// Monotonic id source scoped to a single response.
#[derive(Debug, Clone)]
pub struct RecordIds {
    next: u64,
}

impl RecordIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next identifier.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for RecordIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a statement amount such as `R$ 1.234,56` or `-50,00`.
///
/// The currency marker and spaces are ignored; `.` is a thousands separator
/// and `,` the decimal separator.
pub fn parse_localized_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned.replace(',', ".")).ok()
}

/// Sum the values of the given records, skipping any that do not parse.
pub fn total_value(records: &[TransactionRecord]) -> Decimal {
    records.iter().filter_map(TransactionRecord::amount).sum()
}

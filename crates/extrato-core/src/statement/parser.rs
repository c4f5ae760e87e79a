//! Ordered field extraction over one reconstructed line.

use tracing::trace;

use crate::models::transaction::{RecordIds, TransactionRecord};

use super::LineParser;
use super::rules::{
    DateExtractor, ExtractionMatch, FieldExtractor, InstallmentExtractor, ValueExtractor,
};

/// Fields read from one line, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub date: String,
    pub description: String,
    pub installment: String,
    pub value: String,
}

impl TransactionFields {
    /// Attach an identifier.
    pub fn into_record(self, id: u64) -> TransactionRecord {
        TransactionRecord {
            date: self.date,
            description: self.description,
            installment: self.installment,
            value: self.value,
            id,
        }
    }
}

/// Line text that shrinks as extractors claim spans of it.
///
/// Every occurrence of the claimed text is replaced by a single space so the
/// words on either side stay separated; later extractors never see it again.
#[derive(Debug, Clone)]
struct WorkingText {
    text: String,
}

impl WorkingText {
    fn new(line: &str) -> Self {
        Self {
            text: line.to_string(),
        }
    }

    fn claim<E: FieldExtractor>(&mut self, extractor: &E) -> Option<E::Output> {
        let ExtractionMatch { value, source, .. } = extractor.extract(&self.text)?;

        trace!(field = extractor.field(), claimed = %source, "claimed span");
        self.text = self.text.replace(&source, " ");

        Some(value)
    }

    /// The unclaimed remainder as a description.
    fn into_description(self) -> String {
        self.text
            .trim()
            .trim_matches(|c| c == ' ' || c == '-')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Rule-based line parser.
///
/// Fields are extracted value first, then date, then installment. The value
/// must go first: its digit groups would otherwise be read as a date or an
/// installment marker.
pub struct FieldParser {
    value: ValueExtractor,
    date: DateExtractor,
    installment: InstallmentExtractor,
}

impl FieldParser {
    pub fn new() -> Self {
        Self {
            value: ValueExtractor::new(),
            date: DateExtractor::new(),
            installment: InstallmentExtractor::new(),
        }
    }

    /// Extract fields from a line, or `None` if the line has no value.
    pub fn extract_fields(&self, line: &str) -> Option<TransactionFields> {
        let mut working = WorkingText::new(line);

        let Some(value) = working.claim(&self.value) else {
            trace!(line, "no value, not a transaction");
            return None;
        };

        let date = working.claim(&self.date).unwrap_or_default();
        let installment = working
            .claim(&self.installment)
            .map(|i| i.to_string())
            .unwrap_or_default();

        Some(TransactionFields {
            date,
            description: working.into_description(),
            installment,
            value,
        })
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for FieldParser {
    fn parse(&self, line: &str, ids: &mut RecordIds) -> Option<TransactionRecord> {
        self.extract_fields(line)
            .map(|fields| fields.into_record(ids.next_id()))
    }
}

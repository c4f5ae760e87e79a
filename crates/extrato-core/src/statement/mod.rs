//! Transaction extraction from statement lines.

mod assembler;
mod parser;
pub mod rules;

pub use assembler::{parse_selection, TransactionAssembler};
pub use parser::{FieldParser, TransactionFields};

use crate::models::transaction::{RecordIds, TransactionRecord};

/// Trait for line parsers.
pub trait LineParser {
    /// Parse one line of text, drawing an id from `ids` only when the line
    /// is accepted. Returns `None` for lines that are not transactions.
    fn parse(&self, line: &str, ids: &mut RecordIds) -> Option<TransactionRecord>;
}

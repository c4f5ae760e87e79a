//! Monetary value extraction.

use super::patterns::VALUE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts the transaction amount.
///
/// The claimed span includes any `R$` marker; the value keeps only the sign
/// and digits, so `"R$ - 50,00"` yields `"-50,00"`.
pub struct ValueExtractor;

impl ValueExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ValueExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        "value"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = VALUE.captures(text)?;
        let full_match = caps.get(0)?;
        let value: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();

        Some(ExtractionMatch::new(value, full_match))
    }
}

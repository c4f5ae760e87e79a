//! Posting date extraction.

use super::patterns::DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts a `DD/MM`, `DD/MM/YY` or `DD/MM/YYYY` date as printed.
///
/// Dates are not calendar-checked: statements print them as labels and the
/// reviewer corrects misreads.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        "date"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let m = DATE.find(text)?;
        Some(ExtractionMatch::new(m.as_str().to_string(), m))
    }
}

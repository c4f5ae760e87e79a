//! Rule-based field extractors for statement lines.

pub mod date;
pub mod installment;
pub mod patterns;
pub mod value;

pub use date::DateExtractor;
pub use installment::{Installment, InstallmentExtractor};
pub use value::ValueExtractor;

/// Trait for field extractors.
///
/// Each extractor reports only the first occurrence of its field; a statement
/// row carries at most one of each.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Field name, for logging.
    fn field(&self) -> &'static str;

    /// Find the field in text.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;
}

/// An extracted value together with the span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte offset where the claimed span starts.
    pub start: usize,
    /// Byte offset just past the claimed span.
    pub end: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, m: regex::Match<'_>) -> Self {
        Self {
            value,
            start: m.start(),
            end: m.end(),
            source: m.as_str().to_string(),
        }
    }
}

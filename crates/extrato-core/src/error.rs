//! Error types for the extrato-core library.

use thiserror::Error;

/// Main error type for the extrato library.
#[derive(Error, Debug)]
pub enum ExtratoError {
    /// The request's word data could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The word-extraction collaborator failed to supply words.
    #[error("upstream extraction error: {0}")]
    UpstreamExtraction(#[from] UpstreamExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while validating a request at the boundary.
///
/// Word-level variants carry the zero-based position of the offending word
/// in the request so callers can point the reviewer at it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// The request body is not the expected shape.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A word entry is not an object.
    #[error("word {index} is not an object")]
    NotAnObject { index: usize },

    /// A required word field is absent.
    #[error("word {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// A word field has the wrong JSON type.
    #[error("word {index} field `{field}` must be a {expected}")]
    WrongType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    /// A coordinate could not be interpreted as a real number.
    #[error("word {index} field `{field}` is not a number: {value}")]
    NonNumeric {
        index: usize,
        field: &'static str,
        value: String,
    },

    /// A coordinate is NaN, infinite or negative.
    #[error("word {index} field `{field}` is out of range: {value}")]
    OutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// A word has no text.
    #[error("word {index} has empty text")]
    EmptyText { index: usize },

    /// The per-call tolerance override is unusable.
    #[error("vertical tolerance must be a finite non-negative number, got {0}")]
    InvalidTolerance(f64),
}

/// Errors reported by the word-extraction collaborator.
#[derive(Error, Debug)]
pub enum UpstreamExtractionError {
    /// The page dump could not be read.
    #[error("failed to read text map: {0}")]
    Read(#[from] std::io::Error),

    /// The page dump is not valid.
    #[error("failed to parse text map: {0}")]
    Parse(String),

    /// The requested page does not exist in the dump.
    #[error("page {0} not found in text map")]
    PageNotFound(u32),

    /// The dump contains no pages at all.
    #[error("text map has no pages")]
    NoPages,
}

/// Result type for the extrato library.
pub type Result<T> = std::result::Result<T, ExtratoError>;

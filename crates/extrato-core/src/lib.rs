//! Core library for turning bank-statement selections into transactions.
//!
//! This crate provides:
//! - Boundary validation of loosely typed word data
//! - Line clustering of positioned words by vertical position
//! - Ordered field extraction (value, date, installment, description)
//! - Region selection and page text-map sources for the front end

pub mod error;
pub mod layout;
pub mod models;
pub mod source;
pub mod statement;

pub use error::{ExtratoError, InvalidInputError, Result, UpstreamExtractionError};
pub use layout::{cluster_words_into_lines, select_words, Line, LineClusterer, Region, ScreenRect};
pub use models::config::{ExtratoConfig, DEFAULT_VERTICAL_TOLERANCE};
pub use models::transaction::{
    parse_localized_amount, total_value, ParseResponse, RecordIds, TransactionRecord,
};
pub use models::word::{parse_words, ParseRequest, Word};
pub use source::{PageWords, TextMapSource, WordSource};
pub use statement::{parse_selection, FieldParser, LineParser, TransactionAssembler};

//! Regex patterns for statement line extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount: optional "R$", optional sign, 1.234,56 grouping.
    // Group 1 is the numeric part, possibly with a space after the sign.
    pub static ref VALUE: Regex = Regex::new(
        r"(?:R\$\s*)?(-?\s?\d{1,3}(?:\.\d{3})*,\d{2})"
    ).unwrap();

    // DD/MM with optional /YYYY or /YY
    pub static ref DATE: Regex = Regex::new(
        r"\d{2}/\d{2}(?:/(?:\d{4}|\d{2}))?"
    ).unwrap();

    // Installment marker such as "3/12" or "3 / 12"
    pub static ref INSTALLMENT: Regex = Regex::new(
        r"(\d{1,2})\s*/\s*(\d{1,2})"
    ).unwrap();
}

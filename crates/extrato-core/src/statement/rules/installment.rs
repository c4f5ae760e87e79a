//! Installment marker extraction ("parcela 3 de 12" printed as `3/12`).

use std::fmt;

use super::patterns::INSTALLMENT;
use super::{ExtractionMatch, FieldExtractor};

/// An installment position, `current` of `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub current: String,
    pub total: String,
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Installment field extractor.
pub struct InstallmentExtractor;

impl InstallmentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InstallmentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InstallmentExtractor {
    type Output = Installment;

    fn field(&self) -> &'static str {
        "installment"
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Installment>> {
        let caps = INSTALLMENT.captures(text)?;
        let installment = Installment {
            current: caps[1].to_string(),
            total: caps[2].to_string(),
        };

        Some(ExtractionMatch::new(installment, caps.get(0)?))
    }
}

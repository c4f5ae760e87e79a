//! Positioned words and request validation.
//!
//! Word data arrives as loosely typed JSON from the extraction collaborator.
//! Everything is checked here, before clustering starts, so the rest of the
//! pipeline can work on plain `f64` coordinates and never fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InvalidInputError;

/// A single text-extraction unit with its top-left position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word text.
    pub text: String,

    /// Left edge.
    pub x0: f64,

    /// Top edge.
    pub top: f64,

    /// Right edge, when the extractor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,

    /// Bottom edge, when the extractor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl Word {
    /// Create a word from its text and top-left corner.
    pub fn new(text: impl Into<String>, x0: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1: None,
            bottom: None,
        }
    }

    /// Attach the bottom-right corner of the bounding box.
    pub fn with_extent(mut self, x1: f64, bottom: f64) -> Self {
        self.x1 = Some(x1);
        self.bottom = Some(bottom);
        self
    }

    /// Centre of the bounding box.
    ///
    /// Falls back to the top-left corner on axes without a reported extent.
    pub fn center(&self) -> (f64, f64) {
        let cx = match self.x1 {
            Some(x1) => self.x0 + (x1 - self.x0) / 2.0,
            None => self.x0,
        };
        let cy = match self.bottom {
            Some(bottom) => self.top + (bottom - self.top) / 2.0,
            None => self.top,
        };
        (cx, cy)
    }
}

/// A validated selection request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseRequest {
    /// Words inside the reviewer's selection, in any order.
    pub words: Vec<Word>,

    /// Per-call override of the clustering tolerance.
    pub vertical_tolerance: Option<f64>,
}

impl ParseRequest {
    /// Parse and validate a request from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, InvalidInputError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| InvalidInputError::MalformedRequest(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate a request body of the form `{"words": [...], "vertical_tolerance": n}`.
    ///
    /// A missing or `null` `words` key is treated as an empty selection.
    pub fn from_value(value: &Value) -> Result<Self, InvalidInputError> {
        let body = value.as_object().ok_or_else(|| {
            InvalidInputError::MalformedRequest("request body must be an object".to_string())
        })?;

        let words = match body.get("words") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => parse_words(raw)?,
        };

        let vertical_tolerance = match body.get("vertical_tolerance") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_tolerance(raw)?),
        };

        Ok(Self {
            words,
            vertical_tolerance,
        })
    }
}

/// Validate a JSON array of word objects.
pub fn parse_words(value: &Value) -> Result<Vec<Word>, InvalidInputError> {
    let items = value.as_array().ok_or_else(|| {
        InvalidInputError::MalformedRequest("`words` must be an array".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_word(index, item))
        .collect()
}

fn parse_word(index: usize, value: &Value) -> Result<Word, InvalidInputError> {
    let obj = value
        .as_object()
        .ok_or(InvalidInputError::NotAnObject { index })?;

    let text = match obj.get("text") {
        None | Some(Value::Null) => {
            return Err(InvalidInputError::MissingField {
                index,
                field: "text",
            });
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(InvalidInputError::WrongType {
                index,
                field: "text",
                expected: "string",
            });
        }
    };

    if text.trim().is_empty() {
        return Err(InvalidInputError::EmptyText { index });
    }

    let x0 = required_coordinate(index, obj.get("x0"), "x0")?;
    let top = required_coordinate(index, obj.get("top"), "top")?;
    let x1 = optional_coordinate(index, obj.get("x1"), "x1")?;
    let bottom = optional_coordinate(index, obj.get("bottom"), "bottom")?;

    Ok(Word {
        text,
        x0,
        top,
        x1,
        bottom,
    })
}

fn required_coordinate(
    index: usize,
    value: Option<&Value>,
    field: &'static str,
) -> Result<f64, InvalidInputError> {
    optional_coordinate(index, value, field)?
        .ok_or(InvalidInputError::MissingField { index, field })
}

fn optional_coordinate(
    index: usize,
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<f64>, InvalidInputError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    // Extractors sometimes serialize coordinates as strings ("104.2").
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| InvalidInputError::NonNumeric {
        index,
        field,
        value: value.to_string(),
    })?;

    if !number.is_finite() || number < 0.0 {
        return Err(InvalidInputError::OutOfRange {
            index,
            field,
            value: number,
        });
    }

    Ok(Some(number))
}

fn parse_tolerance(value: &Value) -> Result<f64, InvalidInputError> {
    let tolerance = value.as_f64().ok_or_else(|| {
        InvalidInputError::MalformedRequest(format!(
            "`vertical_tolerance` must be a number, got {}",
            value
        ))
    })?;

    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(InvalidInputError::InvalidTolerance(tolerance));
    }

    Ok(tolerance)
}

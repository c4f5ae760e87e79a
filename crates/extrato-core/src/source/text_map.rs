//! JSON page dumps from the word extractor.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{PageWords, WordSource};
use crate::error::{Result, UpstreamExtractionError};
use crate::models::word::parse_words;

#[derive(Debug, Clone, Deserialize)]
struct RawPage {
    page: u32,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    words: Value,
}

/// Page words read from a text-map dump.
///
/// Accepts a bare array of pages, an object with a `text_map` array, or the
/// full upload response with `visual_data.text_map`.
#[derive(Debug, Clone)]
pub struct TextMapSource {
    pages: Vec<RawPage>,
}

impl TextMapSource {
    /// Load a dump from disk.
    pub fn from_path(path: &Path) -> std::result::Result<Self, UpstreamExtractionError> {
        let content = std::fs::read_to_string(path)?;
        debug!("Loaded text map from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Parse a dump from JSON text.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, UpstreamExtractionError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| UpstreamExtractionError::Parse(e.to_string()))?;

        let pages_value = if value.is_array() {
            value
        } else if let Some(map) = value.get("text_map") {
            map.clone()
        } else if let Some(map) = value.pointer("/visual_data/text_map") {
            map.clone()
        } else {
            return Err(UpstreamExtractionError::Parse(
                "expected an array of pages or a `text_map` field".to_string(),
            ));
        };

        let pages: Vec<RawPage> = serde_json::from_value(pages_value)
            .map_err(|e| UpstreamExtractionError::Parse(e.to_string()))?;

        if pages.is_empty() {
            return Err(UpstreamExtractionError::NoPages);
        }

        debug!("Text map has {} pages", pages.len());

        Ok(Self { pages })
    }
}

impl WordSource for TextMapSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_words(&self, page: u32) -> Result<PageWords> {
        let raw = self
            .pages
            .iter()
            .find(|p| p.page == page)
            .ok_or(UpstreamExtractionError::PageNotFound(page))?;

        let words = match &raw.words {
            Value::Null => Vec::new(),
            value => parse_words(value)?,
        };

        Ok(PageWords {
            page: raw.page,
            width: raw.width,
            height: raw.height,
            words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtratoError, InvalidInputError};
    use crate::layout::Region;
    use pretty_assertions::assert_eq;

    const DUMP: &str = r#"[
        {"page": 1, "width": 595.0, "height": 842.0, "words": [
            {"text": "15/03", "x0": 40.0, "x1": 66.0, "top": 100.0, "bottom": 110.0},
            {"text": "Mercado", "x0": 80.0, "x1": 120.0, "top": 100.5, "bottom": 110.5},
            {"text": "Total", "x0": 40.0, "x1": 66.0, "top": 700.0, "bottom": 710.0}
        ]},
        {"page": 2, "width": 595.0, "height": 842.0, "words": [
            {"text": "bad", "x0": "x", "top": 1}
        ]}
    ]"#;

    #[test]
    fn test_load_pages() {
        let source = TextMapSource::from_json_str(DUMP).unwrap();
        assert_eq!(source.page_count(), 2);

        let page = source.page_words(1).unwrap();
        assert_eq!(page.words.len(), 3);
        assert_eq!(page.width, 595.0);
        assert_eq!(page.display_scale(297.5), 0.5);
    }

    #[test]
    fn test_select_region_on_page() {
        let source = TextMapSource::from_json_str(DUMP).unwrap();
        let page = source.page_words(1).unwrap();

        let selected = page.select(&Region::from_corners((0.0, 90.0), (595.0, 130.0)));

        let texts: Vec<&str> = selected.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["15/03", "Mercado"]);
    }

    #[test]
    fn test_wrapped_forms() {
        let wrapped = format!(r#"{{"status": "success", "visual_data": {{"text_map": {}}}}}"#, DUMP);
        assert_eq!(TextMapSource::from_json_str(&wrapped).unwrap().page_count(), 2);

        let bare = format!(r#"{{"text_map": {}}}"#, DUMP);
        assert_eq!(TextMapSource::from_json_str(&bare).unwrap().page_count(), 2);
    }

    #[test]
    fn test_upstream_errors() {
        assert!(matches!(
            TextMapSource::from_json_str("not json"),
            Err(UpstreamExtractionError::Parse(_))
        ));
        assert!(matches!(
            TextMapSource::from_json_str("[]"),
            Err(UpstreamExtractionError::NoPages)
        ));
        assert!(matches!(
            TextMapSource::from_json_str(r#"{"pages": []}"#),
            Err(UpstreamExtractionError::Parse(_))
        ));

        let source = TextMapSource::from_json_str(DUMP).unwrap();
        assert!(matches!(
            source.page_words(9),
            Err(ExtratoError::UpstreamExtraction(
                UpstreamExtractionError::PageNotFound(9)
            ))
        ));
    }

    #[test]
    fn test_bad_word_is_invalid_input() {
        let source = TextMapSource::from_json_str(DUMP).unwrap();
        match source.page_words(2) {
            Err(ExtratoError::InvalidInput(InvalidInputError::NonNumeric { index, field, .. })) => {
                assert_eq!((index, field), (0, "x0"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = TextMapSource::from_path(Path::new("/nonexistent/extrato/map.json"));
        assert!(matches!(result, Err(UpstreamExtractionError::Read(_))));
    }
}

//! WASM bindings for bank-statement transaction extraction.
//!
//! This crate lets the review front end run selection parsing in the browser,
//! without a round trip to the server.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use extrato_core::{
    ExtratoConfig, InvalidInputError, ParseRequest, ParseResponse, Region, ScreenRect,
    TransactionAssembler, TransactionRecord,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn request_from_js(request: JsValue) -> Result<ParseRequest, JsValue> {
    let body: Value = serde_wasm_bindgen::from_value(request).map_err(to_js_error)?;
    ParseRequest::from_value(&body).map_err(to_js_error)
}

/// Extract transactions from a selection request.
///
/// Takes `{words: [{text, x0, top}, ...], vertical_tolerance?}` and returns
/// `{count, transactions}`.
#[wasm_bindgen]
pub fn parse_selection(request: JsValue) -> Result<JsValue, JsValue> {
    let body: Value = serde_wasm_bindgen::from_value(request).map_err(to_js_error)?;
    let response =
        extrato_core::parse_selection(&body, &ExtratoConfig::default()).map_err(to_js_error)?;
    to_js(&response)
}

/// Select the words under a rectangle drawn on the page image and extract them.
///
/// `rect` is `{x, y, width, height}` in screen units, `origin_x`/`origin_y`
/// the on-screen position of the image and `scale` its displayed width over
/// the page width. Selections too small to be deliberate yield no transactions.
#[wasm_bindgen]
pub fn select_and_parse(
    words: JsValue,
    rect: JsValue,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
) -> Result<JsValue, JsValue> {
    let config = ExtratoConfig::default();

    let words: Value = serde_wasm_bindgen::from_value(words).map_err(to_js_error)?;
    let words = extrato_core::parse_words(&words).map_err(to_js_error)?;
    let rect: ScreenRect = serde_wasm_bindgen::from_value(rect).map_err(to_js_error)?;

    if !rect.is_selection(config.selection.min_box_size) {
        return to_js(&ParseResponse::empty());
    }

    let region = Region::from_screen(&rect, (origin_x, origin_y), scale).map_err(to_js_error)?;
    let request = ParseRequest {
        words: extrato_core::select_words(&words, &region),
        vertical_tolerance: None,
    };

    to_js(&TransactionAssembler::from_config(&config).process(&request))
}

/// Sum the values of a list of transactions, as a decimal string.
#[wasm_bindgen]
pub fn total_value(transactions: JsValue) -> Result<String, JsValue> {
    let records: Vec<TransactionRecord> =
        serde_wasm_bindgen::from_value(transactions).map_err(to_js_error)?;
    Ok(extrato_core::total_value(&records).to_string())
}

/// Parse a statement amount (e.g., "R$ 1.234,56").
#[wasm_bindgen]
pub fn parse_amount(amount: &str) -> Option<f64> {
    extrato_core::parse_localized_amount(amount).and_then(|d| d.to_string().parse().ok())
}

/// Statement extractor class for browser use.
#[wasm_bindgen]
pub struct StatementExtractor {
    config: ExtratoConfig,
}

#[wasm_bindgen]
impl StatementExtractor {
    /// Create an extractor with the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtratoConfig::default(),
        }
    }

    /// Configure the row-membership tolerance.
    #[wasm_bindgen]
    pub fn set_vertical_tolerance(&mut self, tolerance: f64) -> Result<(), JsValue> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(to_js_error(InvalidInputError::InvalidTolerance(tolerance)));
        }
        self.config.clustering.vertical_tolerance = tolerance;
        Ok(())
    }

    /// Current row-membership tolerance.
    #[wasm_bindgen(getter)]
    pub fn vertical_tolerance(&self) -> f64 {
        self.config.clustering.vertical_tolerance
    }

    /// Extract transactions from a selection request.
    #[wasm_bindgen]
    pub fn parse(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request = request_from_js(request)?;
        to_js(&TransactionAssembler::from_config(&self.config).process(&request))
    }

    /// Rebuilt text lines of a selection request, top to bottom.
    #[wasm_bindgen]
    pub fn lines(&self, request: JsValue) -> Result<Vec<String>, JsValue> {
        let request = request_from_js(request)?;

        Ok(TransactionAssembler::from_config(&self.config)
            .lines(&request)
            .into_iter()
            .map(|line| line.text)
            .collect())
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Build a plain JS object, as the front end would send it.
    fn js(value: Value) -> JsValue {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap()
    }

    fn request(words: Value) -> JsValue {
        js(serde_json::json!({ "words": words }))
    }

    #[wasm_bindgen_test]
    fn test_parse_amount() {
        let amount = parse_amount("R$ 1.234,56");
        assert!(amount.is_some());
        assert!((amount.unwrap() - 1234.56).abs() < 0.01);
        assert!(parse_amount("abc").is_none());
    }

    #[wasm_bindgen_test]
    fn test_parse_selection() {
        let words = serde_json::json!([
            {"text": "150,00", "x0": 300.0, "top": 100.0},
            {"text": "15/03", "x0": 10.0, "top": 101.0},
            {"text": "Mercado", "x0": 80.0, "top": 99.0}
        ]);

        let result = parse_selection(request(words)).unwrap();
        let response: ParseResponse = serde_wasm_bindgen::from_value(result).unwrap();

        assert_eq!(response.count, 1);
        assert_eq!(response.transactions[0].date, "15/03");
        assert_eq!(response.transactions[0].description, "Mercado");
        assert_eq!(response.transactions[0].value, "150,00");
    }

    #[wasm_bindgen_test]
    fn test_parse_selection_rejects_bad_word() {
        let words = serde_json::json!([{"text": "x", "x0": "abc", "top": 1.0}]);
        assert!(parse_selection(request(words)).is_err());
    }

    #[wasm_bindgen_test]
    fn test_small_selection_is_ignored() {
        let words = js(serde_json::json!([{"text": "10,00", "x0": 1.0, "top": 1.0}]));
        let rect = serde_wasm_bindgen::to_value(&ScreenRect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 50.0,
        })
        .unwrap();

        let result = select_and_parse(words, rect, 0.0, 0.0, 1.0).unwrap();
        let response: ParseResponse = serde_wasm_bindgen::from_value(result).unwrap();
        assert_eq!(response.count, 0);
    }

    #[wasm_bindgen_test]
    fn test_extractor_tolerance() {
        let mut extractor = StatementExtractor::new();
        assert_eq!(extractor.vertical_tolerance(), 6.0);
        assert!(extractor.set_vertical_tolerance(-1.0).is_err());

        extractor.set_vertical_tolerance(2.0).unwrap();
        let words = serde_json::json!([
            {"text": "Loja", "x0": 10.0, "top": 100.0},
            {"text": "10,00", "x0": 200.0, "top": 104.0}
        ]);
        assert_eq!(extractor.lines(request(words)).unwrap(), vec!["Loja", "10,00"]);
    }
}

//! Words in, transaction records out.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::InvalidInputError;
use crate::layout::{Line, LineClusterer};
use crate::models::config::ExtratoConfig;
use crate::models::transaction::{ParseResponse, RecordIds, TransactionRecord};
use crate::models::word::{ParseRequest, Word};

use super::{FieldParser, LineParser};

/// Runs line clustering and then a line parser over every line.
pub struct TransactionAssembler<P = FieldParser> {
    clusterer: LineClusterer,
    parser: P,
}

impl TransactionAssembler<FieldParser> {
    /// Create an assembler with default settings.
    pub fn new() -> Self {
        Self::with_parts(LineClusterer::new(), FieldParser::new())
    }

    /// Create an assembler from configuration.
    pub fn from_config(config: &ExtratoConfig) -> Self {
        Self::with_parts(
            LineClusterer::from_config(&config.clustering),
            FieldParser::new(),
        )
    }
}

impl Default for TransactionAssembler<FieldParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: LineParser> TransactionAssembler<P> {
    /// Combine a clusterer with any line parser.
    pub fn with_parts(clusterer: LineClusterer, parser: P) -> Self {
        Self { clusterer, parser }
    }

    /// Rebuild a request's lines without parsing them.
    pub fn lines(&self, request: &ParseRequest) -> Vec<Line> {
        match request.vertical_tolerance {
            Some(tolerance) => self
                .clusterer
                .clone()
                .with_vertical_tolerance(tolerance)
                .cluster(&request.words),
            None => self.clusterer.cluster(&request.words),
        }
    }

    /// Turn words into records, top to bottom.
    pub fn assemble(&self, words: &[Word]) -> Vec<TransactionRecord> {
        self.assemble_lines(&self.clusterer.cluster(words))
    }

    /// Parse already clustered lines, keeping their order.
    pub fn assemble_lines(&self, lines: &[Line]) -> Vec<TransactionRecord> {
        let mut ids = RecordIds::new();
        let records: Vec<TransactionRecord> = lines
            .iter()
            .filter_map(|line| self.parser.parse(&line.text, &mut ids))
            .collect();

        debug!(
            "Parsed {} of {} lines as transactions",
            records.len(),
            lines.len()
        );

        records
    }

    /// Handle a validated request, honouring its tolerance override.
    pub fn process(&self, request: &ParseRequest) -> ParseResponse {
        let start = Instant::now();

        let records = self.assemble_lines(&self.lines(request));

        info!(
            "Extracted {} transactions from {} words in {}µs",
            records.len(),
            request.words.len(),
            start.elapsed().as_micros()
        );

        ParseResponse::new(records)
    }
}

/// Validate a raw selection request and extract its transactions.
///
/// Either every word is valid and the full record set is returned, or the
/// request fails with no partial results.
pub fn parse_selection(
    body: &Value,
    config: &ExtratoConfig,
) -> Result<ParseResponse, InvalidInputError> {
    let request = ParseRequest::from_value(body)?;

    if request.words.is_empty() {
        return Ok(ParseResponse::empty());
    }

    Ok(TransactionAssembler::from_config(config).process(&request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Lay out a line's tokens left to right at one height.
    fn row(text: &str, top: f64) -> Vec<Word> {
        text.split(' ')
            .enumerate()
            .map(|(i, t)| Word::new(t, 10.0 + 60.0 * i as f64, top))
            .collect()
    }

    fn strip_ids(records: &[TransactionRecord]) -> Vec<(String, String, String, String)> {
        records
            .iter()
            .map(|r| {
                (
                    r.date.clone(),
                    r.description.clone(),
                    r.installment.clone(),
                    r.value.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_scenario_full_line() {
        let mut words = row("15/03 Compra Mercado 2/5 R$ 150,00", 100.0);
        words.reverse();

        let records = TransactionAssembler::new().assemble(&words);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "15/03");
        assert_eq!(records[0].installment, "2/5");
        assert_eq!(records[0].value, "150,00");
        assert_eq!(records[0].description, "Compra Mercado");
    }

    #[test]
    fn test_scenario_no_value() {
        let records = TransactionAssembler::new().assemble(&row("Saldo anterior", 40.0));
        assert!(records.is_empty());
    }

    #[test]
    fn test_scenario_empty() {
        let response = parse_selection(&json!({"words": []}), &ExtratoConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"count": 0, "transactions": []})
        );
    }

    #[test]
    fn test_output_follows_visual_order() {
        let mut words = Vec::new();
        words.extend(row("03/01 Farmacia 35,10", 300.0));
        words.extend(row("01/01 Padaria 12,00", 100.0));
        words.extend(row("Saldo anterior", 50.0));
        words.extend(row("02/01 Posto 200,00", 200.0));

        let records = TransactionAssembler::new().assemble(&words);

        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["01/01", "02/01", "03/01"]);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let mut words = row("10/02 Uber 3,50", 10.0);
        words.extend(row("11/02 Cinema 1/2 R$ 1.040,00", 30.0));

        let assembler = TransactionAssembler::new();
        let first = assembler.assemble(&words);
        let second = assembler.assemble(&words);

        assert_eq!(strip_ids(&first), strip_ids(&second));
    }

    #[test]
    fn test_tolerance_override() {
        let words = vec![
            Word::new("Loja", 10.0, 100.0),
            Word::new("10,00", 200.0, 104.0),
        ];
        let assembler = TransactionAssembler::new();

        let merged = assembler.process(&ParseRequest {
            words: words.clone(),
            vertical_tolerance: None,
        });
        assert_eq!(strip_ids(&merged.transactions), vec![(
            String::new(),
            "Loja".to_string(),
            String::new(),
            "10,00".to_string()
        )]);

        let split = assembler.process(&ParseRequest {
            words,
            vertical_tolerance: Some(2.0),
        });
        assert_eq!(split.count, 1);
        assert_eq!(split.transactions[0].description, "");
    }

    #[test]
    fn test_lines_apply_tolerance_override() {
        let mut request = ParseRequest {
            words: vec![
                Word::new("10,00", 200.0, 104.0),
                Word::new("Loja", 10.0, 100.0),
            ],
            vertical_tolerance: None,
        };
        let assembler = TransactionAssembler::new();

        let texts = |lines: Vec<Line>| lines.into_iter().map(|l| l.text).collect::<Vec<_>>();
        assert_eq!(texts(assembler.lines(&request)), vec!["Loja 10,00"]);

        request.vertical_tolerance = Some(2.0);
        assert_eq!(texts(assembler.lines(&request)), vec!["Loja", "10,00"]);
    }

    #[test]
    fn test_parse_selection_rejects_whole_request() {
        let body = json!({"words": [
            {"text": "Loja", "x0": 10, "top": 100},
            {"text": "10,00", "x0": 200, "top": "cem"}
        ]});

        let result = parse_selection(&body, &ExtratoConfig::default());

        assert!(matches!(
            result,
            Err(InvalidInputError::NonNumeric { index: 1, field: "top", .. })
        ));
    }

    #[test]
    fn test_negative_value_normalized_end_to_end() {
        let body = json!({"words": [
            {"text": "Estorno", "x0": 10, "top": 100},
            {"text": "-", "x0": 200, "top": 100},
            {"text": "50,00", "x0": 210, "top": 101}
        ]});

        let response = parse_selection(&body, &ExtratoConfig::default()).unwrap();

        assert_eq!(response.count, 1);
        assert_eq!(response.transactions[0].value, "-50,00");
        assert_eq!(response.transactions[0].description, "Estorno");
    }

    struct Uppercase;

    impl LineParser for Uppercase {
        fn parse(&self, line: &str, ids: &mut RecordIds) -> Option<TransactionRecord> {
            Some(TransactionRecord {
                date: String::new(),
                description: line.to_uppercase(),
                installment: String::new(),
                value: String::new(),
                id: ids.next_id(),
            })
        }
    }

    #[test]
    fn test_custom_line_parser() {
        let assembler = TransactionAssembler::with_parts(LineClusterer::new(), Uppercase);
        let records = assembler.assemble(&row("saldo anterior", 0.0));
        assert_eq!(records[0].description, "SALDO ANTERIOR");
    }
}

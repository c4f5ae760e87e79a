//! Grouping of loose words into visual text lines.

use tracing::{debug, trace};

use super::Line;
use crate::models::config::{ClusterConfig, DEFAULT_VERTICAL_TOLERANCE};
use crate::models::word::Word;

/// Clusters words into rows by vertical position.
#[derive(Debug, Clone)]
pub struct LineClusterer {
    vertical_tolerance: f64,
    min_line_chars: usize,
}

impl LineClusterer {
    /// Create a clusterer with the default tolerance.
    pub fn new() -> Self {
        Self {
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            min_line_chars: 2,
        }
    }

    /// Create a clusterer from configuration.
    pub fn from_config(config: &ClusterConfig) -> Self {
        Self {
            vertical_tolerance: config.vertical_tolerance,
            min_line_chars: config.min_line_chars,
        }
    }

    /// Set the vertical tolerance.
    pub fn with_vertical_tolerance(mut self, tolerance: f64) -> Self {
        self.vertical_tolerance = tolerance;
        self
    }

    /// Group words into lines, top to bottom.
    ///
    /// A word joins the open row when its `top` is within the tolerance of
    /// the row's first word. Comparing against that fixed base top keeps a
    /// long, slightly skewed row from creeping past the tolerance.
    pub fn cluster(&self, words: &[Word]) -> Vec<Line> {
        let mut sorted: Vec<Word> = words.to_vec();
        sorted.sort_by(|a, b| a.top.total_cmp(&b.top));

        let mut iter = sorted.into_iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };

        let mut rows: Vec<Line> = Vec::new();
        let mut current = Line::open(first);

        for word in iter {
            if (word.top - current.base_top).abs() <= self.vertical_tolerance {
                current.words.push(word);
            } else {
                rows.push(current);
                current = Line::open(word);
            }
        }
        rows.push(current);

        let row_count = rows.len();
        let lines: Vec<Line> = rows
            .into_iter()
            .map(Line::close)
            .filter(|line| {
                let keep = line.text.trim().chars().count() >= self.min_line_chars;
                if !keep {
                    trace!(text = %line.text, "dropping noise line");
                }
                keep
            })
            .collect();

        debug!(
            "Clustered {} words into {} rows, kept {} lines",
            words.len(),
            row_count,
            lines.len()
        );

        lines
    }
}

impl Default for LineClusterer {
    fn default() -> Self {
        Self::new()
    }
}

/// Group words into lines with the given tolerance.
pub fn cluster_words_into_lines(words: &[Word], vertical_tolerance: f64) -> Vec<Line> {
    LineClusterer::new()
        .with_vertical_tolerance(vertical_tolerance)
        .cluster(words)
}

//! Page layout: selecting words and rebuilding text lines.

mod clusterer;
mod region;

pub use clusterer::{cluster_words_into_lines, LineClusterer};
pub use region::{select_words, Region, ScreenRect};

use crate::models::word::Word;

/// Words judged to share one visual row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Member words, left to right once the line is closed.
    pub words: Vec<Word>,

    /// `top` of the word that opened the row.
    pub base_top: f64,

    /// Member texts joined with single spaces.
    pub text: String,
}

impl Line {
    fn open(first: Word) -> Self {
        Self {
            base_top: first.top,
            words: vec![first],
            text: String::new(),
        }
    }

    fn close(mut self) -> Self {
        self.words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
        self.text = self
            .words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self
    }
}

//! Word sources: where page words come from.
//!
//! Rendering and text extraction happen outside this crate. A [`WordSource`]
//! hands over the words of one page in the shape the extractor produced;
//! [`TextMapSource`] reads the JSON page dump written by that extractor.

mod text_map;

pub use text_map::TextMapSource;

use crate::error::Result;
use crate::layout::{select_words, Region};
use crate::models::word::Word;

/// Words of one page, with the page size in the same units.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWords {
    /// Page number (1-indexed).
    pub page: u32,
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Validated words on the page.
    pub words: Vec<Word>,
}

impl PageWords {
    /// Words whose centre lies inside `region`.
    pub fn select(&self, region: &Region) -> Vec<Word> {
        select_words(&self.words, region)
    }

    /// Display scale for a page image shown `displayed_width` units wide.
    pub fn display_scale(&self, displayed_width: f64) -> f64 {
        displayed_width / self.width
    }
}

/// Trait for suppliers of page words.
pub trait WordSource {
    /// Number of pages available.
    fn page_count(&self) -> u32;

    /// Words of one page.
    ///
    /// Failures of the source itself are
    /// [`UpstreamExtraction`](crate::ExtratoError::UpstreamExtraction) errors;
    /// malformed words are
    /// [`InvalidInput`](crate::ExtratoError::InvalidInput) errors.
    fn page_words(&self, page: u32) -> Result<PageWords>;
}

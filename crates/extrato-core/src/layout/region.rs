//! Reviewer selections over a rendered page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidInputError;
use crate::models::word::Word;

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl Region {
    /// Build a region from two opposite corners, in any order.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            top: a.1.min(b.1),
            x1: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    /// Map a rectangle drawn over the displayed page image back to page space.
    ///
    /// `origin` is the on-screen position of the image's top-left corner and
    /// `scale` the displayed width divided by the page width.
    pub fn from_screen(
        rect: &ScreenRect,
        origin: (f64, f64),
        scale: f64,
    ) -> Result<Self, InvalidInputError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(InvalidInputError::MalformedRequest(format!(
                "display scale must be positive, got {}",
                scale
            )));
        }

        Ok(Self {
            x0: (rect.x - origin.0) / scale,
            top: (rect.y - origin.1) / scale,
            x1: (rect.x + rect.width - origin.0) / scale,
            bottom: (rect.y + rect.height - origin.1) / scale,
        })
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check if a point is inside this region (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.top && y <= self.bottom
    }

    /// Check if a word's centre falls inside this region.
    pub fn contains(&self, word: &Word) -> bool {
        let (cx, cy) = word.center();
        self.contains_point(cx, cy)
    }
}

impl FromStr for Region {
    type Err = InvalidInputError;

    /// Parse `x0,top,x1,bottom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| InvalidInputError::MalformedRequest(format!("region `{}`: {}", s, e)))?;

        match parts.as_slice() {
            [x0, top, x1, bottom] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Self::from_corners((*x0, *top), (*x1, *bottom)))
            }
            _ => Err(InvalidInputError::MalformedRequest(format!(
                "region `{}` must be four numbers: x0,top,x1,bottom",
                s
            ))),
        }
    }
}

/// A rectangle drawn on screen, as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    /// Whether the rectangle is big enough to count as a deliberate selection.
    pub fn is_selection(&self, min_box_size: f64) -> bool {
        self.width > min_box_size && self.height > min_box_size
    }
}

/// Keep the words whose centre lies inside `region`, in input order.
pub fn select_words(words: &[Word], region: &Region) -> Vec<Word> {
    let selected: Vec<Word> = words
        .iter()
        .filter(|w| region.contains(w))
        .cloned()
        .collect();

    debug!("Selected {} of {} words", selected.len(), words.len());

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_by_center() {
        let region = Region::from_corners((0.0, 90.0), (200.0, 120.0));
        let words = vec![
            Word::new("inside", 10.0, 95.0).with_extent(50.0, 105.0),
            // Top-left corner inside, centre below the region.
            Word::new("straddling", 10.0, 115.0).with_extent(50.0, 135.0),
            Word::new("below", 10.0, 200.0).with_extent(50.0, 210.0),
        ];

        let selected = select_words(&words, &region);

        let texts: Vec<&str> = selected.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["inside"]);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let region = Region::from_corners((0.0, 0.0), (10.0, 10.0));
        assert!(region.contains(&Word::new("edge", 10.0, 10.0)));
        assert!(!region.contains(&Word::new("out", 10.5, 10.0)));
    }

    #[test]
    fn test_corners_in_any_order() {
        let region = Region::from_corners((100.0, 50.0), (20.0, 10.0));
        assert_eq!(
            region,
            Region {
                x0: 20.0,
                top: 10.0,
                x1: 100.0,
                bottom: 50.0,
            }
        );
        assert_eq!(region.width(), 80.0);
        assert_eq!(region.height(), 40.0);
    }

    #[test]
    fn test_from_screen() {
        let rect = ScreenRect {
            x: 120.0,
            y: 240.0,
            width: 200.0,
            height: 40.0,
        };

        let region = Region::from_screen(&rect, (20.0, 40.0), 2.0).unwrap();

        assert_eq!(
            region,
            Region {
                x0: 50.0,
                top: 100.0,
                x1: 150.0,
                bottom: 120.0,
            }
        );
        assert!(Region::from_screen(&rect, (0.0, 0.0), 0.0).is_err());
    }

    #[test]
    fn test_small_boxes_are_not_selections() {
        let click = ScreenRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 300.0,
        };
        assert!(!click.is_selection(10.0));

        let drag = ScreenRect {
            width: 10.5,
            height: 10.5,
            ..click
        };
        assert!(drag.is_selection(10.0));
    }

    #[test]
    fn test_parse_region() {
        let region: Region = "10, 20, 110, 60".parse().unwrap();
        assert_eq!(region.x1, 110.0);
        assert!("10,20,30".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
    }
}

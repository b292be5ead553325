//! Ellipsis truncation of labels to a pixel width.

use crate::surface::{TextMeasure, TextStyle};

pub const ELLIPSIS: char = '…';

/// Shortens labels until the measured width fits.
pub struct LabelFitter<'m, M: TextMeasure + ?Sized> {
    measure: &'m M,
}

impl<'m, M: TextMeasure + ?Sized> LabelFitter<'m, M> {
    pub fn new(measure: &'m M) -> Self {
        Self { measure }
    }

    /// `text` if it fits in `max_width`, otherwise the longest prefix plus
    /// `…` that does, or an empty string when not even `…` fits.
    pub fn fit(&self, text: &str, style: &TextStyle, max_width: f64) -> String {
        if self.fits(text, style, max_width) {
            return text.to_string();
        }

        let mut kept: Vec<char> = text.chars().collect();
        while kept.pop().is_some() {
            let mut candidate: String = kept.iter().collect();
            candidate.push(ELLIPSIS);
            if self.fits(&candidate, style, max_width) {
                return candidate;
            }
        }
        String::new()
    }

    fn fits(&self, text: &str, style: &TextStyle, max_width: f64) -> bool {
        self.measure.measure_text(text, style) <= max_width
    }
}

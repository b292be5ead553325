//! Minute-of-day to pixel mapping.

use crate::event::MINUTES_PER_DAY;

/// Linear map from `[0, 1440]` minutes onto `[0, height]` pixels.
///
/// Every vertical position in a chart goes through this one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    height: f64,
}

impl TimeScale {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel offset of `minute` from the top of the chart.
    pub fn pixel_y(&self, minute: f64) -> f64 {
        minute * self.height / f64::from(MINUTES_PER_DAY)
    }

    /// Pixel length of a duration.
    pub fn span(&self, minutes: u32) -> f64 {
        self.pixel_y(f64::from(minutes)) - self.pixel_y(0.0)
    }

    /// Label font size for a block of `minutes`: its height clamped to 8..=12.
    pub fn label_font_size(&self, minutes: u32) -> f64 {
        self.span(minutes).clamp(8.0, 12.0)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(1200.0)
    }
}

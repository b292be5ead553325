//! Drawing surfaces.
//!
//! The renderer never writes pixels itself; it issues primitives to a
//! [`Surface`]. Surfaces also answer text-measurement queries, which the
//! label fitter depends on.
//!
//! - [`SvgSurface`]: accumulates an SVG document
//! - [`RecordingSurface`]: keeps the primitive list for inspection

mod recording;
mod svg;

pub use recording::{Primitive, RecordingSurface};
pub use svg::SvgSurface;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::palette::Color;

/// A point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Font settings for a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Glyphs a surface knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Clock,
}

/// Rendered-width queries.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn with `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64;
}

/// A drawing target with known pixel dimensions.
pub trait Surface: TextMeasure {
    /// Drop everything drawn so far and resize.
    fn clear(&mut self, width: f64, height: f64);

    /// Current `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Fill a rectangle. `None` leaves the fill unpainted.
    fn fill_rect(&mut self, rect: Rect, fill: Option<Color>, corner_radius: f64);

    fn line(&mut self, from: Point, to: Point, stroke: Color, width: f64);

    /// Draw `content` with its baseline-left corner at `origin`.
    fn text(&mut self, origin: Point, content: &str, style: &TextStyle);

    fn icon(&mut self, icon: Icon, bounds: Rect, color: Color);
}

/// Width estimate from terminal column counts.
///
/// Each column is `advance` ems wide; East Asian wide characters count as
/// two columns. Bold text is `bold_factor` wider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharMetrics {
    pub advance: f64,
    pub bold_factor: f64,
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasure for CharMetrics {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        let columns = UnicodeWidthStr::width(text) as f64;
        let width = columns * style.size * self.advance;
        if style.bold {
            width * self.bold_factor
        } else {
            width
        }
    }
}

//! A surface that records primitives instead of drawing them.

use serde::Serialize;

use super::{CharMetrics, Icon, Point, Rect, Surface, TextMeasure, TextStyle};
use crate::palette::Color;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        corner_radius: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Color,
        width: f64,
    },
    Text {
        origin: Point,
        content: String,
        style: TextStyle,
    },
    Icon {
        icon: Icon,
        bounds: Rect,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    metrics: CharMetrics,
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: CharMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Text contents in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, Option<Color>)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect { rect, fill, .. } => Some((rect, *fill)),
            _ => None,
        })
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        self.metrics.measure_text(text, style)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.primitives.clear();
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, fill: Option<Color>, corner_radius: f64) {
        self.primitives.push(Primitive::Rect {
            rect,
            fill,
            corner_radius,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Color, width: f64) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            stroke,
            width,
        });
    }

    fn text(&mut self, origin: Point, content: &str, style: &TextStyle) {
        self.primitives.push(Primitive::Text {
            origin,
            content: content.to_string(),
            style: *style,
        });
    }

    fn icon(&mut self, icon: Icon, bounds: Rect, color: Color) {
        self.primitives.push(Primitive::Icon {
            icon,
            bounds,
            color,
        });
    }
}

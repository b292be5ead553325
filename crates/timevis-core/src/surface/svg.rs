//! SVG document output.

use std::fmt::Write;

use super::{CharMetrics, Icon, Point, Rect, Surface, TextMeasure, TextStyle};
use crate::palette::Color;

// Font Awesome Free 6 "clock" (CC BY 4.0), 512x512 viewBox.
const CLOCK_PATH: &str = "M464 256A208 208 0 1 1 48 256a208 208 0 1 1 416 0zM0 256a256 256 0 1 0 512 0A256 256 0 1 0 0 256zM232 120l0 136c0 8 4 15.5 10.7 20l96 64c11 7.4 25.9 4.4 33.3-6.7s4.4-25.9-6.7-33.3L280 243.2 280 120c0-13.3-10.7-24-24-24s-24 10.7-24 24z";

/// Builds an SVG document in memory.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    metrics: CharMetrics,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: CharMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// The complete document for everything drawn since the last clear.
    pub fn to_document(&self) -> String {
        let (w, h) = (num(self.width), num(self.height));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n{}</svg>\n",
            self.body
        )
    }
}

impl TextMeasure for SvgSurface {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        self.metrics.measure_text(text, style)
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, fill: Option<Color>, corner_radius: f64) {
        let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_string());
        let _ = write!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
        );
        if corner_radius > 0.0 {
            let r = num(corner_radius);
            let _ = write!(self.body, " rx=\"{r}\" ry=\"{r}\"");
        }
        self.body.push_str("/>\n");
    }

    fn line(&mut self, from: Point, to: Point, stroke: Color, width: f64) {
        let _ = writeln!(
            self.body,
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"/>",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            num(width),
        );
    }

    fn text(&mut self, origin: Point, content: &str, style: &TextStyle) {
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"{}\"{weight}>{}</text>",
            num(origin.x),
            num(origin.y),
            style.color,
            num(style.size),
            escape(content),
        );
    }

    fn icon(&mut self, icon: Icon, bounds: Rect, color: Color) {
        let path = match icon {
            Icon::Clock => CLOCK_PATH,
        };
        let _ = writeln!(
            self.body,
            "  <svg x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 512 512\" fill=\"{color}\"><path d=\"{path}\"/></svg>",
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height),
        );
    }
}

/// Two decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

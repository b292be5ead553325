//! Drawing a laid-out timeline onto a surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::label::LabelFitter;
use super::layout::{DayLayout, EventBlock, LayoutConfig, TimelineLayout};
use crate::error::Result;
use crate::event::CalendarEvent;
use crate::palette::{CategoryPalette, Color, FILL_ALPHA};
use crate::surface::{Icon, Point, Rect, Surface, SvgSurface, TextStyle};

const HOUR_LABEL_X: f64 = 3.0;
const HOUR_LABEL_SIZE: f64 = 10.0;
const HEADER_LABEL_SIZE: f64 = 11.0;
const BLOCK_RADIUS: f64 = 5.0;
const ACCENT_INSET: f64 = 2.0;
const ACCENT_WIDTH: f64 = 3.0;
/// Left inset of block text from the block edge
const TEXT_INSET: f64 = 10.0;
const TEXT_RIGHT_PAD: f64 = 4.0;
const BADGE_SIZE: f64 = 10.0;
const DURATION_BADGE_Y: f64 = 26.0;
const ICON_Y: f64 = 31.0;
const ICON_SIZE: f64 = 10.0;
const TIME_RANGE_X: f64 = 25.0;
const TIME_RANGE_Y: f64 = 40.0;
const TITLE_DARKEN: u8 = 60;
const TIME_RANGE_DARKEN: u8 = 40;

/// Non-category colours of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_grid")]
    pub grid: Color,
    /// Hour labels, and block text for categories missing from the palette
    #[serde(default = "default_label")]
    pub label: Color,
    #[serde(default = "default_header_fill")]
    pub header_fill: Color,
    #[serde(default = "default_label")]
    pub header_text: Color,
}

fn default_background() -> Color {
    Color::WHITE
}
fn default_grid() -> Color {
    Color::rgb(0xe6, 0xe3, 0xde)
}
fn default_label() -> Color {
    Color::rgb(0x63, 0x60, 0x5b)
}
fn default_header_fill() -> Color {
    Color::rgb(0xf4, 0xf2, 0xee)
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid: default_grid(),
            label: default_label(),
            header_fill: default_header_fill(),
            header_text: default_label(),
        }
    }
}

/// Lays out events and draws them: background, hour grid, day headers,
/// then one block per visible fragment.
#[derive(Debug, Clone, Default)]
pub struct TimelineRenderer {
    layout: LayoutConfig,
    theme: Theme,
    palette: CategoryPalette,
}

impl TimelineRenderer {
    pub fn new(layout: LayoutConfig, theme: Theme, palette: CategoryPalette) -> Self {
        Self {
            layout,
            theme,
            palette,
        }
    }

    /// Clear `surface` and draw `day_count` days starting at `first_day`.
    ///
    /// Returns the computed geometry.
    ///
    /// # Errors
    /// Returns a validation error when `day_count` is zero; the surface is
    /// left untouched in that case.
    pub fn render<S: Surface + ?Sized>(
        &self,
        events: &[CalendarEvent],
        first_day: NaiveDate,
        day_count: u32,
        surface: &mut S,
    ) -> Result<TimelineLayout> {
        let layout = TimelineLayout::compute(events, first_day, day_count, &self.layout)?;

        surface.clear(layout.width, layout.height);
        surface.fill_rect(
            Rect::new(0.0, 0.0, layout.width, layout.height),
            Some(self.theme.background),
            0.0,
        );
        self.draw_grid(&layout, surface);
        for day in &layout.days {
            self.draw_header(day, layout.column_width, surface);
            for block in &day.blocks {
                self.draw_block(block, surface);
            }
        }

        tracing::debug!(
            %first_day,
            day_count,
            events = events.len(),
            blocks = layout.block_count(),
            "rendered timeline"
        );
        Ok(layout)
    }

    /// Render into a fresh [`SvgSurface`] and return the document.
    ///
    /// # Errors
    /// See [`render`](Self::render).
    pub fn render_svg(
        &self,
        events: &[CalendarEvent],
        first_day: NaiveDate,
        day_count: u32,
    ) -> Result<String> {
        let mut surface = SvgSurface::new();
        self.render(events, first_day, day_count, &mut surface)?;
        Ok(surface.to_document())
    }

    fn draw_grid<S: Surface + ?Sized>(&self, layout: &TimelineLayout, surface: &mut S) {
        let scale = self.layout.scale();
        let style = TextStyle::new(HOUR_LABEL_SIZE, self.theme.label).bold();
        for hour in 0..=24u32 {
            let y = self.layout.chart_top() + scale.pixel_y(f64::from(hour * 60));
            surface.line(
                Point::new(self.layout.grid_left, y),
                Point::new(layout.width, y),
                self.theme.grid,
                1.0,
            );
            surface.text(Point::new(HOUR_LABEL_X, y + 3.0), &format!("{hour}:00"), &style);
        }
    }

    fn draw_header<S: Surface + ?Sized>(&self, day: &DayLayout, column_width: f64, surface: &mut S) {
        let height = self.layout.header_height;
        surface.fill_rect(
            Rect::new(day.x, 0.0, column_width, height),
            Some(self.theme.header_fill),
            0.0,
        );
        let style = TextStyle::new(HEADER_LABEL_SIZE, self.theme.header_text).bold();
        let text = LabelFitter::new(&*surface).fit(&day.header, &style, column_width - 8.0);
        if !text.is_empty() {
            surface.text(Point::new(day.x + 4.0, height / 2.0 + HEADER_LABEL_SIZE / 3.0), &text, &style);
        }
    }

    fn draw_block<S: Surface + ?Sized>(&self, block: &EventBlock, surface: &mut S) {
        let rect = block.rect;
        let color = self.palette.get(&block.calendar);
        if color.is_none() {
            tracing::warn!(category = %block.calendar, title = %block.title, "category has no palette colour");
        }

        surface.fill_rect(rect, color.map(|c| c.with_alpha(FILL_ALPHA)), BLOCK_RADIUS);

        let accent_height = rect.height - 2.0 * ACCENT_INSET;
        if accent_height > 0.0 {
            surface.fill_rect(
                Rect::new(rect.x + ACCENT_INSET, rect.y + ACCENT_INSET, ACCENT_WIDTH, accent_height),
                color,
                0.0,
            );
        }

        let text_color = color.map_or(self.theme.label, |c| c.darken(TITLE_DARKEN));
        let font_size = block.font_size();
        let title_y = if rect.height < font_size + 2.0 {
            rect.height / 2.0 + font_size / 3.0
        } else {
            font_size
        };
        let title_style = TextStyle::new(font_size, text_color).bold();
        self.fitted_text(
            surface,
            Point::new(rect.x + TEXT_INSET, rect.y + title_y),
            &block.title,
            &title_style,
            rect.width - TEXT_INSET - TEXT_RIGHT_PAD,
        );

        let badge_style = TextStyle::new(BADGE_SIZE, text_color);
        if let Some(badge) = block.duration_badge() {
            self.fitted_text(
                surface,
                Point::new(rect.x + TEXT_INSET, rect.y + DURATION_BADGE_Y),
                &badge,
                &badge_style,
                rect.width - TEXT_INSET - TEXT_RIGHT_PAD,
            );
        }

        if block.shows_time_range() {
            surface.icon(
                Icon::Clock,
                Rect::new(rect.x + TEXT_INSET, rect.y + ICON_Y, ICON_SIZE, ICON_SIZE),
                text_color,
            );
            let range_color = color.map_or(self.theme.label, |c| c.darken(TIME_RANGE_DARKEN));
            self.fitted_text(
                surface,
                Point::new(rect.x + TIME_RANGE_X, rect.y + TIME_RANGE_Y),
                &block.time_range,
                &TextStyle::new(BADGE_SIZE, range_color),
                rect.width - TIME_RANGE_X - TEXT_RIGHT_PAD,
            );
        }
    }

    fn fitted_text<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        origin: Point,
        text: &str,
        style: &TextStyle,
        max_width: f64,
    ) {
        let fitted = LabelFitter::new(&*surface).fit(text, style, max_width);
        if !fitted.is_empty() {
            surface.text(origin, &fitted, style);
        }
    }
}

//! Chart geometry for a date range.
//!
//! Layout is pure: it turns events into positioned blocks without touching
//! a surface. Label fitting happens later, at draw time, because it needs
//! the surface's text measurement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::{day_range, fragments_for_day, DayFragment};
use super::overlap::{OverlapResolver, Placement};
use super::scale::TimeScale;
use crate::error::{Result, ValidationError};
use crate::event::CalendarEvent;
use crate::surface::Rect;

/// Blocks longer than this get a duration badge.
pub const DURATION_BADGE_MIN_MINUTES: u32 = 30;
/// Blocks longer than this get a clock and a time-range badge.
pub const TIME_RANGE_BADGE_MIN_MINUTES: u32 = 55;
/// Longest range a single chart lays out.
pub const MAX_DAY_COUNT: u32 = 31;

/// Pixel metrics of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_chart_height")]
    pub chart_height: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    /// Gap between the header band and minute 0, and below minute 1440
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Left edge of the block area; hour labels live to its left
    #[serde(default = "default_left_margin")]
    pub left_margin: f64,
    /// Left end of the hour grid lines
    #[serde(default = "default_grid_left")]
    pub grid_left: f64,
    #[serde(default = "default_right_padding")]
    pub right_padding: f64,
    #[serde(default = "default_single_day_width")]
    pub single_day_width: f64,
    #[serde(default = "default_multi_day_width")]
    pub multi_day_width: f64,
    /// Cascade shift in a single-day column; scaled for narrower columns
    #[serde(default = "default_overlap_step")]
    pub overlap_step: f64,
    #[serde(default = "default_min_block_width")]
    pub min_block_width: f64,
}

fn default_chart_height() -> f64 {
    1200.0
}
fn default_header_height() -> f64 {
    24.0
}
fn default_padding() -> f64 {
    10.0
}
fn default_left_margin() -> f64 {
    35.0
}
fn default_grid_left() -> f64 {
    30.0
}
fn default_right_padding() -> f64 {
    15.0
}
fn default_single_day_width() -> f64 {
    300.0
}
fn default_multi_day_width() -> f64 {
    150.0
}
fn default_overlap_step() -> f64 {
    60.0
}
fn default_min_block_width() -> f64 {
    20.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chart_height: default_chart_height(),
            header_height: default_header_height(),
            padding: default_padding(),
            left_margin: default_left_margin(),
            grid_left: default_grid_left(),
            right_padding: default_right_padding(),
            single_day_width: default_single_day_width(),
            multi_day_width: default_multi_day_width(),
            overlap_step: default_overlap_step(),
            min_block_width: default_min_block_width(),
        }
    }
}

impl LayoutConfig {
    pub fn scale(&self) -> TimeScale {
        TimeScale::new(self.chart_height)
    }

    /// Check the metrics that divide or scale the chart.
    ///
    /// # Errors
    /// Names the first height or width that is not a positive number.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        for (name, value) in [
            ("chart_height", self.chart_height),
            ("single_day_width", self.single_day_width),
            ("multi_day_width", self.multi_day_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidMetric { name, value });
            }
        }
        Ok(())
    }

    pub fn column_width(&self, day_count: u32) -> f64 {
        if day_count > 1 {
            self.multi_day_width
        } else {
            self.single_day_width
        }
    }

    /// Y of minute 0.
    pub fn chart_top(&self) -> f64 {
        self.header_height + self.padding
    }
}

/// One event fragment with its final geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBlock {
    pub title: String,
    pub calendar: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub placement: Placement,
    pub rect: Rect,
    /// Raw clock range of the whole event
    pub time_range: String,
}

impl EventBlock {
    pub fn duration(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    /// Title size: block height clamped to 8..=12.
    pub fn font_size(&self) -> f64 {
        self.rect.height.clamp(8.0, 12.0)
    }

    /// `Xh Ymin` badge text, when the block is tall enough for one.
    pub fn duration_badge(&self) -> Option<String> {
        (self.duration() > DURATION_BADGE_MIN_MINUTES).then(|| format_duration(self.duration()))
    }

    pub fn shows_time_range(&self) -> bool {
        self.duration() > TIME_RANGE_BADGE_MIN_MINUTES
    }
}

/// One day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub header: String,
    /// Left edge of the column's block area
    pub x: f64,
    pub blocks: Vec<EventBlock>,
    /// Fragments skipped because nothing was left after clipping
    pub dropped: usize,
}

/// Geometry for a whole render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub width: f64,
    pub height: f64,
    pub column_width: f64,
    pub days: Vec<DayLayout>,
}

impl TimelineLayout {
    /// Lay out `day_count` days starting at `first_day`.
    ///
    /// # Errors
    /// Returns a validation error when `day_count` is zero or above
    /// [`MAX_DAY_COUNT`], or when the config fails
    /// [`LayoutConfig::validate`].
    pub fn compute(
        events: &[CalendarEvent],
        first_day: NaiveDate,
        day_count: u32,
        config: &LayoutConfig,
    ) -> Result<Self> {
        if day_count == 0 {
            return Err(ValidationError::EmptyRange(day_count).into());
        }
        if day_count > MAX_DAY_COUNT {
            return Err(ValidationError::RangeTooLong {
                days: day_count,
                max: MAX_DAY_COUNT,
            }
            .into());
        }
        config.validate()?;

        let scale = config.scale();
        let column_width = config.column_width(day_count);
        let step = config.overlap_step * column_width / config.single_day_width;
        let resolver = OverlapResolver::new(scale, column_width, step)
            .with_min_width(config.min_block_width);

        let days = day_range(first_day, day_count)
            .enumerate()
            .map(|(index, date)| {
                let x = config.left_margin + index as f64 * column_width;
                layout_day(events, date, x, day_count, config, &resolver)
            })
            .collect();

        Ok(Self {
            width: config.left_margin + f64::from(day_count) * column_width + config.right_padding,
            height: config.chart_top() + config.chart_height + config.padding,
            column_width,
            days,
        })
    }

    pub fn block_count(&self) -> usize {
        self.days.iter().map(|d| d.blocks.len()).sum()
    }
}

fn layout_day(
    events: &[CalendarEvent],
    date: NaiveDate,
    x: f64,
    day_count: u32,
    config: &LayoutConfig,
    resolver: &OverlapResolver,
) -> DayLayout {
    let scale = config.scale();
    let (visible, empty): (Vec<DayFragment<'_>>, Vec<_>) = fragments_for_day(events, date)
        .into_iter()
        .partition(|f| !f.is_empty());

    let placements = resolver.resolve(&visible);
    let blocks = visible
        .iter()
        .zip(placements)
        .map(|(fragment, placement)| EventBlock {
            title: fragment.event.title.clone(),
            calendar: fragment.event.calendar.clone(),
            start_minutes: fragment.start_minutes,
            end_minutes: fragment.end_minutes,
            placement,
            rect: Rect::new(
                x + placement.offset,
                config.chart_top() + scale.pixel_y(f64::from(fragment.start_minutes)),
                placement.width,
                scale.span(fragment.duration()),
            ),
            time_range: fragment.event.time_range_label(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(%date, blocks = blocks.len(), dropped = empty.len(), "laid out day");

    DayLayout {
        date,
        header: format_header(date, day_count),
        x,
        blocks,
        dropped: empty.len(),
    }
}

/// Header text; narrow columns drop the year.
pub fn format_header(date: NaiveDate, day_count: u32) -> String {
    if day_count > 1 {
        date.format("%m-%d %a").to_string()
    } else {
        date.format("%Y-%m-%d %a").to_string()
    }
}

/// `1h 30min`, `2h`, `45min`.
pub fn format_duration(minutes: u32) -> String {
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

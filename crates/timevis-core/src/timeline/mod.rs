//! Timeline layout engine.
//!
//! This module provides:
//! - The minute-to-pixel time scale
//! - Per-day event selection and midnight clipping
//! - Greedy overlap staggering within a day column
//! - Ellipsis label fitting
//! - Layout computation and drawing onto a surface

mod filter;
mod label;
mod layout;
mod overlap;
mod render;
mod scale;

pub use filter::{clip_minutes, day_range, events_in_range, fragments_for_day, DayFragment};
pub use label::{LabelFitter, ELLIPSIS};
pub use layout::{
    format_duration, format_header, DayLayout, EventBlock, LayoutConfig, TimelineLayout,
    DURATION_BADGE_MIN_MINUTES, MAX_DAY_COUNT, TIME_RANGE_BADGE_MIN_MINUTES,
};
pub use overlap::{OverlapResolver, Placement};
pub use render::{Theme, TimelineRenderer};
pub use scale::TimeScale;

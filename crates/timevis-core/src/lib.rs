//! # timevis Core Library
//!
//! This library renders day and multi-day timeline charts from calendar
//! events stored as one JSON file per month. The `timevis` CLI is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Timeline**: minute-to-pixel scale, per-day clipping, greedy overlap
//!   staggering, ellipsis label fitting, layout and drawing
//! - **Surfaces**: drawing targets with text measurement (SVG output and a
//!   recording surface)
//! - **Storage**: month-keyed event files and TOML-based configuration
//! - **Directive**: the `dayView YYYY-MM-DD` code-block entry point
//!
//! ## Key Components
//!
//! - [`TimelineRenderer`]: draws a date range onto a [`Surface`]
//! - [`TimelineLayout`]: the geometry of one render
//! - [`EventStore`]: month file access
//! - [`Config`]: application configuration management

pub mod directive;
pub mod error;
pub mod event;
pub mod palette;
pub mod storage;
pub mod surface;
pub mod timeline;

pub use directive::{render_block, BlockCommand, BlockDirective, BlockOutput};
pub use error::{ConfigError, CoreError, StampError, StoreError, ValidationError};
pub use event::{CalendarEvent, EventStamp};
pub use palette::{CategoryPalette, Color};
pub use storage::{Config, EventStore};
pub use surface::{RecordingSurface, Surface, SvgSurface, TextMeasure};
pub use timeline::{LayoutConfig, Theme, TimeScale, TimelineLayout, TimelineRenderer};

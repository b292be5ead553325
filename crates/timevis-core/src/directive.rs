//! The `timevis` code-block directive.
//!
//! A block body such as `dayView 2024-11-08` or `weekView 2024-11-04`
//! resolves to a chart or, when anything is off, to a placeholder message
//! shown in place of the chart. Directive handling never returns an error.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError, ValidationError};
use crate::storage::Config;
use crate::surface::SvgSurface;
use crate::timeline::{events_in_range, TimelineLayout, MAX_DAY_COUNT};

pub const USAGE: &str = "Invalid command or date. Use: `dayView YYYY-MM-DD`.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCommand {
    /// One day, or the explicit day count
    DayView,
    /// Seven days from the given date
    WeekView,
}

impl BlockCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayView => "dayView",
            Self::WeekView => "weekView",
        }
    }

    fn default_days(&self) -> u32 {
        match self {
            Self::DayView => 1,
            Self::WeekView => 7,
        }
    }
}

/// A parsed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDirective {
    pub command: BlockCommand,
    pub date: NaiveDate,
    pub day_count: u32,
}

impl FromStr for BlockDirective {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let invalid = || ValidationError::InvalidDate(s.trim().to_string());

        let command = match tokens.next() {
            Some("dayView") => BlockCommand::DayView,
            Some("weekView") => BlockCommand::WeekView,
            Some(other) => return Err(ValidationError::UnknownCommand(other.to_string())),
            None => return Err(invalid()),
        };
        let date = tokens
            .next()
            .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok())
            .ok_or_else(invalid)?;
        let day_count = match tokens.next() {
            Some(t) => t
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_DAY_COUNT).contains(n))
                .ok_or_else(invalid)?,
            None => command.default_days(),
        };
        if tokens.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            command,
            date,
            day_count,
        })
    }
}

impl fmt::Display for BlockDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.command.as_str(), self.date, self.day_count)
    }
}

/// What a directive renders to.
#[derive(Debug, Clone)]
pub enum BlockOutput {
    Chart { svg: String, layout: TimelineLayout },
    Placeholder(String),
}

impl BlockOutput {
    /// The SVG document or the placeholder text.
    pub fn text(&self) -> &str {
        match self {
            Self::Chart { svg, .. } => svg,
            Self::Placeholder(message) => message,
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, Self::Chart { .. })
    }
}

/// Run a directive body against the configured event store.
pub async fn render_block(source: &str, config: &Config) -> BlockOutput {
    let directive = match source.parse::<BlockDirective>() {
        Ok(directive) => directive,
        Err(e) => {
            tracing::debug!(error = %e, "rejected directive");
            return BlockOutput::Placeholder(USAGE.to_string());
        }
    };
    let date = directive.date;

    let store = config.event_store();
    let events = match store.load_range(date, directive.day_count).await {
        Ok(events) => events,
        Err(StoreError::Missing { .. }) => {
            return BlockOutput::Placeholder(format!(
                "No data found for {date}. Expected file: {}",
                store.relative_month_path(date).display()
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, path = %e.path().display(), "failed to load events");
            return BlockOutput::Placeholder(format!(
                "Error loading events for {date}. Check the console for details."
            ));
        }
    };

    let events = events_in_range(&events, date, directive.day_count);
    if events.is_empty() {
        return BlockOutput::Placeholder(format!("No events found for {date}."));
    }

    let rendered: Result<(String, TimelineLayout)> =
        config.renderer().map_err(Into::into).and_then(|renderer| {
            let mut surface = SvgSurface::with_metrics(config.text);
            let layout = renderer.render(&events, date, directive.day_count, &mut surface)?;
            Ok((surface.to_document(), layout))
        });
    match rendered {
        Ok((svg, layout)) => BlockOutput::Chart { svg, layout },
        Err(e) => {
            tracing::error!(error = %e, %directive, "failed to render timeline");
            BlockOutput::Placeholder(format!("Error rendering {date}: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[test]
    fn parses_day_view() {
        let directive: BlockDirective = "  dayView 2024-11-08 \n".parse().unwrap();
        assert_eq!(directive.command, BlockCommand::DayView);
        assert_eq!(directive.date, date(8));
        assert_eq!(directive.day_count, 1);
    }

    #[test]
    fn parses_explicit_day_count() {
        let directive: BlockDirective = "dayView 2024-11-08 3".parse().unwrap();
        assert_eq!(directive.day_count, 3);
    }

    #[test]
    fn week_view_defaults_to_seven_days() {
        let directive: BlockDirective = "weekView 2024-11-04".parse().unwrap();
        assert_eq!(directive.command, BlockCommand::WeekView);
        assert_eq!(directive.day_count, 7);
    }

    #[test]
    fn rejects_bad_directives() {
        for source in [
            "",
            "summary 2024-11-08",
            "dayView",
            "dayView 2024-13-01",
            "dayView 08-11-2024",
            "dayView 2024-11-08 0",
            "dayView 2024-11-08 x",
            "dayView 2024-11-08 2 extra",
        ] {
            assert!(source.parse::<BlockDirective>().is_err(), "accepted {source:?}");
        }
    }

    #[test]
    fn day_count_is_capped() {
        let max = format!("dayView 2024-11-08 {MAX_DAY_COUNT}");
        assert_eq!(max.parse::<BlockDirective>().unwrap().day_count, MAX_DAY_COUNT);

        let over = format!("dayView 2024-11-08 {}", MAX_DAY_COUNT + 1);
        assert!(over.parse::<BlockDirective>().is_err());
        assert!("dayView 2024-11-08 4000000000".parse::<BlockDirective>().is_err());
    }

    #[test]
    fn unknown_command_is_named() {
        let err = "summary 2024-11-08".parse::<BlockDirective>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCommand(ref c) if c == "summary"));

        let err = "dayView 2024-13-01".parse::<BlockDirective>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn huge_day_count_yields_usage_placeholder() {
        let output = render_block("dayView 2024-11-08 4000000000", &Config::default()).await;
        assert_eq!(output.text(), USAGE);
    }

    #[tokio::test]
    async fn invalid_directive_yields_usage_placeholder() {
        let output = render_block("summary", &Config::default()).await;
        assert!(!output.is_chart());
        assert_eq!(output.text(), USAGE);
    }
}

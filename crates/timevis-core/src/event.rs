//! Calendar event records as stored in the month files.
//!
//! Timestamps use the store's wire format `"YYYY MM DD HH mm"` and are
//! parsed at the deserialization boundary, so the layout engine only ever
//! sees well-formed values.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StampError;

/// Minutes in one day column.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A naive wall-clock timestamp in `"YYYY MM DD HH mm"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventStamp(NaiveDateTime);

impl EventStamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Build from individual fields; `None` when they are not a real instant.
    pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Minutes since midnight of the stamp's own day.
    pub fn minute_of_day(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Clock label `HH:mm`.
    pub fn clock(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl FromStr for EventStamp {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(StampError::FieldCount {
                input: s.to_string(),
                found: fields.len(),
            });
        }

        let mut numbers = [0u32; 5];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| StampError::NotANumber {
                input: s.to_string(),
                field: field.to_string(),
            })?;
        }

        let [year, month, day, hour, minute] = numbers;
        let year = i32::try_from(year).map_err(|_| StampError::OutOfRange(s.to_string()))?;
        Self::from_parts(year, month, day, hour, minute)
            .ok_or_else(|| StampError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for EventStamp {
    type Error = StampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventStamp> for String {
    fn from(stamp: EventStamp) -> Self {
        stamp.to_string()
    }
}

impl fmt::Display for EventStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y %m %d %H %M"))
    }
}

/// A single event from the month store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: EventStamp,
    pub end: EventStamp,
    /// Category key into the palette
    pub calendar: String,
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        start: EventStamp,
        end: EventStamp,
        calendar: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            calendar: calendar.into(),
        }
    }

    /// Whether the event starts or ends on `day`.
    pub fn touches(&self, day: NaiveDate) -> bool {
        self.start.date() == day || self.end.date() == day
    }

    /// Raw clock range, e.g. `09:00 - 10:30`.
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start.clock(), self.end.clock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_format() {
        let stamp: EventStamp = "2024 11 08 13 13".parse().unwrap();
        assert_eq!(stamp.date(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        assert_eq!(stamp.minute_of_day(), 13 * 60 + 13);
        assert_eq!(stamp.clock(), "13:13");
    }

    #[test]
    fn accepts_unpadded_fields() {
        let stamp: EventStamp = "2024 1 5 7 3".parse().unwrap();
        assert_eq!(stamp.to_string(), "2024 01 05 07 03");
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = "2024-11-08 13:13".parse::<EventStamp>().unwrap_err();
        assert!(matches!(err, StampError::FieldCount { found: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = "2024 11 xx 13 13".parse::<EventStamp>().unwrap_err();
        assert!(matches!(err, StampError::NotANumber { .. }));
    }

    #[test]
    fn rejects_impossible_date() {
        let err = "2024 02 30 10 00".parse::<EventStamp>().unwrap_err();
        assert_eq!(err, StampError::OutOfRange("2024 02 30 10 00".to_string()));
    }

    #[test]
    fn deserializes_event_json() {
        let json = r#"{"title":"Lunch","end":"2024 11 08 13 36","calendar":"Life","start":"2024 11 08 13 13"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Lunch");
        assert_eq!(event.calendar, "Life");
        assert_eq!(event.time_range_label(), "13:13 - 13:36");

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["start"], "2024 11 08 13 13");
    }

    #[test]
    fn malformed_stamp_fails_deserialization() {
        let json = r#"{"title":"x","start":"2024 11 08","end":"2024 11 08 13 36","calendar":"Life"}"#;
        assert!(serde_json::from_str::<CalendarEvent>(json).is_err());
    }

    #[test]
    fn touches_start_or_end_day() {
        let event = CalendarEvent::new(
            "Night",
            "2024 11 08 23 30".parse().unwrap(),
            "2024 11 09 00 30".parse().unwrap(),
            "Sleep",
        );
        assert!(event.touches(NaiveDate::from_ymd_opt(2024, 11, 8).unwrap()));
        assert!(event.touches(NaiveDate::from_ymd_opt(2024, 11, 9).unwrap()));
        assert!(!event.touches(NaiveDate::from_ymd_opt(2024, 11, 10).unwrap()));
    }
}

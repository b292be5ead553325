//! Per-day event selection and clipping.
//!
//! An event is drawn in every day column it starts or ends in. Inside a
//! column its start and end are clipped to `[0, 1440]`, so an event that
//! crosses midnight shows up as two independent fragments.

use chrono::{Days, NaiveDate};

use crate::event::{CalendarEvent, EventStamp, MINUTES_PER_DAY};

/// An event clipped to one day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFragment<'a> {
    pub event: &'a CalendarEvent,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl<'a> DayFragment<'a> {
    pub fn clip(event: &'a CalendarEvent, day: NaiveDate) -> Self {
        Self {
            event,
            start_minutes: clip_minutes(&event.start, day),
            end_minutes: clip_minutes(&event.end, day),
        }
    }

    pub fn duration(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// Nothing left to draw after clipping.
    pub fn is_empty(&self) -> bool {
        self.duration() == 0
    }

    /// Half-open time intersection.
    pub fn intersects(&self, other: &DayFragment<'_>) -> bool {
        other.start_minutes < self.end_minutes && self.start_minutes < other.end_minutes
    }
}

/// Minute offset of `stamp` inside the column for `day`.
///
/// Stamps on a later date pin to the end of the day, earlier ones to the
/// start.
pub fn clip_minutes(stamp: &EventStamp, day: NaiveDate) -> u32 {
    let date = stamp.date();
    if date == day {
        stamp.minute_of_day()
    } else if date > day {
        MINUTES_PER_DAY
    } else {
        0
    }
}

/// Fragments for `day`, stably sorted by clipped start.
///
/// Zero-length fragments are kept; callers decide whether to drop them.
pub fn fragments_for_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<DayFragment<'_>> {
    let mut fragments: Vec<_> = events
        .iter()
        .filter(|event| event.touches(day))
        .map(|event| DayFragment::clip(event, day))
        .collect();
    fragments.sort_by_key(|f| f.start_minutes);
    fragments
}

/// Events that start or end on any of `count` days from `first`.
pub fn events_in_range(events: &[CalendarEvent], first: NaiveDate, count: u32) -> Vec<CalendarEvent> {
    let last = first
        .checked_add_days(Days::new(u64::from(count.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX);
    let in_range = |day: NaiveDate| count > 0 && first <= day && day <= last;
    events
        .iter()
        .filter(|event| in_range(event.start.date()) || in_range(event.end.date()))
        .cloned()
        .collect()
}

/// `count` consecutive days starting at `first`.
pub fn day_range(first: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(title, start.parse().unwrap(), end.parse().unwrap(), "Life")
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn midnight_crossing_splits_into_two_fragments() {
        let events = vec![event("Night", "2024 11 08 23 30", "2024 11 09 00 30")];

        let first = fragments_for_day(&events, day(2024, 11, 8));
        assert_eq!(first.len(), 1);
        assert_eq!((first[0].start_minutes, first[0].end_minutes), (1410, 1440));
        assert_eq!(first[0].duration(), 30);

        let second = fragments_for_day(&events, day(2024, 11, 9));
        assert_eq!((second[0].start_minutes, second[0].end_minutes), (0, 30));
    }

    #[test]
    fn month_boundary_uses_real_dates() {
        let events = vec![event("Party", "2024 11 30 23 00", "2024 12 01 01 00")];
        let nov = fragments_for_day(&events, day(2024, 11, 30));
        assert_eq!((nov[0].start_minutes, nov[0].end_minutes), (1380, 1440));
        let dec = fragments_for_day(&events, day(2024, 12, 1));
        assert_eq!((dec[0].start_minutes, dec[0].end_minutes), (0, 60));
    }

    #[test]
    fn excludes_events_on_other_days() {
        let events = vec![
            event("Yesterday", "2024 11 07 10 00", "2024 11 07 11 00"),
            event("Today", "2024 11 08 10 00", "2024 11 08 11 00"),
        ];
        let today = fragments_for_day(&events, day(2024, 11, 8));
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].event.title, "Today");
    }

    #[test]
    fn sort_is_stable_for_equal_starts() {
        let events = vec![
            event("Late", "2024 11 08 12 00", "2024 11 08 13 00"),
            event("A", "2024 11 08 09 00", "2024 11 08 10 00"),
            event("B", "2024 11 08 09 00", "2024 11 08 09 30"),
        ];
        let titles: Vec<_> = fragments_for_day(&events, day(2024, 11, 8))
            .iter()
            .map(|f| f.event.title.as_str())
            .collect();
        assert_eq!(titles, ["A", "B", "Late"]);
    }

    #[test]
    fn back_to_back_fragments_do_not_intersect() {
        let events = vec![
            event("A", "2024 11 08 09 00", "2024 11 08 10 00"),
            event("B", "2024 11 08 10 00", "2024 11 08 11 00"),
        ];
        let f = fragments_for_day(&events, day(2024, 11, 8));
        assert!(!f[0].intersects(&f[1]));
        assert!(!f[1].intersects(&f[0]));
    }

    #[test]
    fn range_selection_keeps_touching_events() {
        let events = vec![
            event("Before", "2024 11 06 10 00", "2024 11 06 11 00"),
            event("Inside", "2024 11 09 10 00", "2024 11 09 11 00"),
            event("Into", "2024 11 07 23 00", "2024 11 08 01 00"),
            event("After", "2024 11 11 10 00", "2024 11 11 11 00"),
        ];
        let titles: Vec<_> = events_in_range(&events, day(2024, 11, 8), 3)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["Inside", "Into"]);
    }

    #[test]
    fn range_selection_handles_extreme_counts() {
        let events = vec![event("Inside", "2024 11 09 10 00", "2024 11 09 11 00")];
        assert_eq!(events_in_range(&events, day(2024, 11, 8), u32::MAX).len(), 1);
        assert!(events_in_range(&events, day(2024, 11, 8), 0).is_empty());
    }

    #[test]
    fn day_range_crosses_months() {
        let days: Vec<_> = day_range(day(2024, 11, 29), 3).collect();
        assert_eq!(days, [day(2024, 11, 29), day(2024, 11, 30), day(2024, 12, 1)]);
    }
}

//! Integration tests for the timeline layout engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use timevis_core::surface::{CharMetrics, TextMeasure, TextStyle};
use timevis_core::timeline::{fragments_for_day, LabelFitter, ELLIPSIS};
use timevis_core::{
    CalendarEvent, CategoryPalette, Color, LayoutConfig, RecordingSurface, Theme, TimeScale,
    TimelineRenderer,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

fn event(title: &str, start: &str, end: &str, calendar: &str) -> CalendarEvent {
    CalendarEvent::new(title, start.parse().unwrap(), end.parse().unwrap(), calendar)
}

fn renderer() -> TimelineRenderer {
    let palette = CategoryPalette::new()
        .with("Work", Color::rgb(0x3a, 0x9c, 0x85))
        .with("Life", Color::rgb(0xa4, 0xe0, 0xaf));
    TimelineRenderer::new(LayoutConfig::default(), Theme::default(), palette)
}

fn sample_week() -> Vec<CalendarEvent> {
    vec![
        event("Standup", "2024 11 08 09 00", "2024 11 08 09 15", "Work"),
        event("Design review", "2024 11 08 10 00", "2024 11 08 11 00", "Work"),
        event("Pairing", "2024 11 08 10 00", "2024 11 08 11 30", "Work"),
        event("Lunch", "2024 11 08 12 00", "2024 11 08 13 00", "Life"),
        event("Night shift", "2024 11 08 23 30", "2024 11 09 00 30", "Work"),
        event("Gym", "2024 11 09 18 00", "2024 11 09 19 30", "Life"),
        event("Unsorted", "2024 11 10 08 00", "2024 11 10 09 00", "Misc"),
    ]
}

#[test]
fn midnight_event_is_clipped_per_day() {
    let events = vec![event("Night", "2024 11 08 23 30", "2024 11 09 00 30", "Work")];

    let first = fragments_for_day(&events, day(8));
    assert_eq!((first[0].start_minutes, first[0].end_minutes), (1410, 1440));

    let second = fragments_for_day(&events, day(9));
    assert_eq!((second[0].start_minutes, second[0].end_minutes), (0, 30));

    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&events, day(8), 2, &mut surface).unwrap();
    assert_eq!(layout.days[0].blocks[0].duration(), 30);
    assert_eq!(layout.days[1].blocks[0].start_minutes, 0);
    assert_eq!(layout.days[1].blocks[0].end_minutes, 30);
}

#[test]
fn identical_events_are_staggered() {
    let events = vec![
        event("First", "2024 11 08 10 00", "2024 11 08 11 00", "Work"),
        event("Second", "2024 11 08 10 00", "2024 11 08 11 00", "Work"),
    ];
    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&events, day(8), 1, &mut surface).unwrap();
    let blocks = &layout.days[0].blocks;

    assert_eq!(blocks[0].title, "First");
    assert_eq!(blocks[1].title, "Second");
    assert!(blocks[1].placement.width < blocks[0].placement.width);
    assert!(blocks[1].placement.offset > 0.0);
    assert_eq!(blocks[0].placement.offset, 0.0);
}

#[test]
fn back_to_back_events_are_not_flagged() {
    let events = vec![
        event("Nine", "2024 11 08 09 00", "2024 11 08 10 00", "Work"),
        event("Ten", "2024 11 08 10 00", "2024 11 08 11 00", "Work"),
    ];
    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&events, day(8), 1, &mut surface).unwrap();
    for block in &layout.days[0].blocks {
        assert_eq!(block.placement.offset, 0.0);
        assert_eq!(block.placement.column, 0);
    }
}

#[test]
fn zero_length_fragment_does_not_shift_later_events() {
    let with_empty = vec![
        event("Ends at midnight", "2024 11 08 20 00", "2024 11 09 00 00", "Work"),
        event("Early", "2024 11 09 00 00", "2024 11 09 01 00", "Work"),
        event("Also early", "2024 11 09 00 00", "2024 11 09 01 00", "Life"),
    ];
    let without_empty = with_empty[1..].to_vec();

    let mut surface = RecordingSurface::new();
    let a = renderer().render(&with_empty, day(9), 1, &mut surface).unwrap();
    let b = renderer().render(&without_empty, day(9), 1, &mut surface).unwrap();

    assert_eq!(a.days[0].dropped, 1);
    assert_eq!(a.days[0].blocks, b.days[0].blocks);
    assert!(!a.days[0].blocks.iter().any(|blk| blk.title == "Ends at midnight"));
}

#[test]
fn renders_are_deterministic() {
    let events = sample_week();
    let mut first = RecordingSurface::new();
    let mut second = RecordingSurface::new();

    let a = renderer().render(&events, day(8), 3, &mut first).unwrap();
    let b = renderer().render(&events, day(8), 3, &mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.primitives(), second.primitives());
}

#[test]
fn rerendering_a_surface_replaces_its_content() {
    let events = sample_week();
    let mut surface = RecordingSurface::new();
    renderer().render(&events, day(8), 3, &mut surface).unwrap();
    let count = surface.primitives().len();
    renderer().render(&events, day(8), 3, &mut surface).unwrap();
    assert_eq!(surface.primitives().len(), count);
}

#[test]
fn blocks_stay_inside_their_day_column() {
    let mut events = sample_week();
    for i in 0..8 {
        events.push(event(&format!("Crowd {i}"), "2024 11 08 14 00", "2024 11 08 15 00", "Work"));
    }
    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&events, day(8), 3, &mut surface).unwrap();

    for column in &layout.days {
        for block in &column.blocks {
            assert!(block.rect.x >= column.x);
            assert!(block.rect.right() <= column.x + layout.column_width + 1e-9);
            assert!(block.rect.width >= LayoutConfig::default().min_block_width);
            assert!(block.rect.bottom() <= layout.height);
        }
    }
}

#[test]
fn unknown_category_still_renders() {
    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&sample_week(), day(10), 1, &mut surface).unwrap();
    assert_eq!(layout.days[0].blocks.len(), 1);
    assert!(surface.texts().any(|t| t == "Unsorted"));
}

#[test]
fn layout_serializes_for_inspection() {
    let mut surface = RecordingSurface::new();
    let layout = renderer().render(&sample_week(), day(8), 1, &mut surface).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["days"][0]["date"], "2024-11-08");
    assert_eq!(json["days"][0]["blocks"][0]["title"], "Standup");
    assert_eq!(json["days"][0]["blocks"][0]["time_range"], "09:00 - 09:15");
}

proptest! {
    #[test]
    fn pixel_y_is_strictly_monotonic(a in 0u32..=1440, b in 0u32..=1440, height in 100.0f64..5000.0) {
        prop_assume!(a < b);
        let scale = TimeScale::new(height);
        prop_assert!(scale.pixel_y(f64::from(a)) < scale.pixel_y(f64::from(b)));
        prop_assert_eq!(scale.pixel_y(0.0), 0.0);
        prop_assert!((scale.pixel_y(1440.0) - height).abs() < 1e-9);
    }

    #[test]
    fn fitted_labels_fit_and_are_stable(text in "[a-zA-Z 游戏和社媒]{0,40}", max_width in 0.0f64..300.0) {
        let metrics = CharMetrics::default();
        let fitter = LabelFitter::new(&metrics);
        let style = TextStyle::new(12.0, Color::WHITE).bold();

        let fitted = fitter.fit(&text, &style, max_width);
        prop_assert!(fitted.is_empty() || metrics.measure_text(&fitted, &style) <= max_width);
        prop_assert_eq!(fitter.fit(&fitted, &style, max_width), fitted.clone());

        if fitted != text {
            prop_assert!(fitted.is_empty() || fitted.ends_with(ELLIPSIS));
            prop_assert!(fitted.chars().count() <= text.chars().count());
        }
    }

    #[test]
    fn narrowing_never_lengthens_labels(text in "[a-z]{1,30}", wide in 10.0f64..200.0, shrink in 0.0f64..10.0) {
        let metrics = CharMetrics::default();
        let fitter = LabelFitter::new(&metrics);
        let style = TextStyle::new(10.0, Color::WHITE);
        let at_wide = fitter.fit(&text, &style, wide);
        let at_narrow = fitter.fit(&text, &style, wide - shrink);
        prop_assert!(at_narrow.chars().count() <= at_wide.chars().count());
    }
}

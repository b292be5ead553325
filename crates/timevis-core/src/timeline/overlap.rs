//! Horizontal staggering of colliding events.
//!
//! Events are processed in start order. Each earlier event that visually
//! overlaps the current one pushes it one step to the right and narrows it
//! by the same step. This is a greedy cascade, not a minimum column
//! packing: three or more mutually overlapping events can use more steps
//! than strictly needed, but the result only depends on the input order.

use serde::{Deserialize, Serialize};

use super::filter::DayFragment;
use super::scale::TimeScale;

/// Horizontal placement of one event inside its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Number of overlapping predecessors
    pub column: u32,
    /// Offset from the left edge of the block area
    pub offset: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OverlapResolver {
    scale: TimeScale,
    /// Width of an event with no overlapping predecessors
    full_width: f64,
    /// Shift per overlapping predecessor
    step: f64,
    /// Narrowest block the cascade may produce
    min_width: f64,
}

impl OverlapResolver {
    pub fn new(scale: TimeScale, full_width: f64, step: f64) -> Self {
        Self {
            scale,
            full_width,
            step,
            min_width: 0.0,
        }
    }

    /// Floor block widths at `min_width`, keeping blocks inside the column.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width.max(0.0);
        self
    }

    /// Whether `a` and `b` intersect in time and their titles, drawn at
    /// their block tops, would collide vertically.
    pub fn visually_overlaps(&self, a: &DayFragment<'_>, b: &DayFragment<'_>) -> bool {
        if !a.intersects(b) {
            return false;
        }
        let gap = (self.scale.pixel_y(f64::from(a.start_minutes))
            - self.scale.pixel_y(f64::from(b.start_minutes)))
        .abs();
        gap < self.scale.label_font_size(a.duration()) + self.scale.label_font_size(b.duration())
    }

    /// Placements for `fragments`, which must be in start order.
    pub fn resolve(&self, fragments: &[DayFragment<'_>]) -> Vec<Placement> {
        fragments
            .iter()
            .enumerate()
            .map(|(i, current)| {
                let column = fragments[..i]
                    .iter()
                    .filter(|earlier| self.visually_overlaps(current, earlier))
                    .count() as u32;
                self.place(column)
            })
            .collect()
    }

    fn place(&self, column: u32) -> Placement {
        let shift = f64::from(column) * self.step;
        let width = self.full_width - shift;
        if width >= self.min_width {
            return Placement {
                column,
                offset: shift,
                width,
            };
        }

        tracing::warn!(
            column,
            width,
            min_width = self.min_width,
            "overlap cascade exceeded column width; flooring block"
        );
        Placement {
            column,
            offset: shift.min((self.full_width - self.min_width).max(0.0)),
            width: self.min_width,
        }
    }
}

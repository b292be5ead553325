//! Month-keyed JSON event files.
//!
//! Each calendar month lives in `<root>/<events_dir>/YYYY-MM.json` as a JSON
//! array of events. Reads go through `tokio::fs`; everything after the read
//! is synchronous.

use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::event::CalendarEvent;
use crate::timeline::{day_range, MAX_DAY_COUNT};

#[derive(Debug, Clone)]
pub struct EventStore {
    root: PathBuf,
    events_dir: PathBuf,
}

impl EventStore {
    pub fn new(root: impl Into<PathBuf>, events_dir: impl AsRef<Path>) -> Self {
        Self {
            root: root.into(),
            events_dir: events_dir.as_ref().to_path_buf(),
        }
    }

    /// `YYYY-MM` key of the file holding `date`.
    pub fn month_key(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    /// Month file path relative to the root, as shown to users.
    pub fn relative_month_path(&self, date: NaiveDate) -> PathBuf {
        self.events_dir.join(format!("{}.json", Self::month_key(date)))
    }

    pub fn month_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(self.relative_month_path(date))
    }

    /// Read and parse the month file containing `date`.
    ///
    /// # Errors
    /// `Missing` when the file does not exist, `Read` on IO failure, and
    /// `Parse` when the content is not an event array.
    pub async fn load_month(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>, StoreError> {
        let path = self.month_path(date);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::Missing { path });
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        match serde_json::from_str::<Vec<CalendarEvent>>(&content) {
            Ok(events) => {
                tracing::debug!(path = %path.display(), events = events.len(), "loaded month file");
                Ok(events)
            }
            Err(source) => Err(StoreError::Parse { path, source }),
        }
    }

    /// Events for a render of `day_count` days starting at `first_day`.
    ///
    /// The month of `first_day` must exist. Other months touched by the
    /// range, including the one holding the day before `first_day` (for
    /// events that cross midnight into the range), are read when present.
    /// Ranges longer than [`MAX_DAY_COUNT`] only scan that many days.
    ///
    /// # Errors
    /// See [`load_month`](Self::load_month); a missing secondary month is
    /// not an error.
    pub async fn load_range(
        &self,
        first_day: NaiveDate,
        day_count: u32,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        let mut events = self.load_month(first_day).await?;

        let mut months: Vec<NaiveDate> = first_day
            .pred_opt()
            .into_iter()
            .chain(day_range(first_day, day_count.clamp(1, MAX_DAY_COUNT)))
            .map(first_of_month)
            .collect();
        months.dedup();

        let primary = first_of_month(first_day);
        for month in months.into_iter().filter(|m| *m != primary) {
            match self.load_month(month).await {
                Ok(more) => events.extend(more),
                Err(StoreError::Missing { path }) => {
                    tracing::debug!(path = %path.display(), "no file for adjacent month");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(events)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

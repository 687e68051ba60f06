//! Contested Territory event calendar.
//!
//! Events run for a fixed number of days and start every two event lengths. The start times
//! drifted a few times over the years, so the calendar is anchored on a table of epochs:
//! each epoch names the first event it covers and the moment that event started.

use chrono::{DateTime, Duration, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Length of an event in days.
pub const EVENT_DURATION_DAYS: i64 = 7;

/// Epoch table used in production, as `(first event, unix start)`.
const DEFAULT_EPOCHS: [(i64, i64); 3] = [(0, 0), (1, 1_660_075_200), (26, 1_690_927_200)];

/// Breakpoint of the epoch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch {
    /// Number of the first event starting at this epoch.
    pub event: i64,
    /// Unix timestamp at which that event started.
    pub start: i64,
}

/// Maps wall-clock time to event numbers, event periods and days within an event.
///
/// All methods are pure for a given epoch table.
#[derive(Debug, Clone)]
pub struct EventCalendar {
    /// Sorted by start, never empty.
    epochs: Vec<Epoch>,
    duration_days: i64,
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS
                .iter()
                .map(|&(event, start)| Epoch { event, start })
                .collect(),
            duration_days: EVENT_DURATION_DAYS,
        }
    }
}

impl EventCalendar {
    /// Creates a calendar from an epoch table.
    ///
    /// # Returns
    /// - `Some(EventCalendar)` - Calendar over the sorted table
    /// - `None` - The table is empty or the duration is not positive
    pub fn new(mut epochs: Vec<Epoch>, duration_days: i64) -> Option<Self> {
        if epochs.is_empty() || duration_days <= 0 {
            return None;
        }
        epochs.sort_by_key(|epoch| epoch.start);

        Some(Self {
            epochs,
            duration_days,
        })
    }

    /// Length of one event.
    pub fn event_duration(&self) -> Duration {
        Duration::days(self.duration_days)
    }

    /// Returns the number of the event running at `time`.
    ///
    /// With `breakpoint_on_event_start` the number changes when an event starts, so the break
    /// after an event still belongs to it. Without it the number changes when an event ends,
    /// so the break belongs to the upcoming event.
    pub fn event_number_at(&self, time: DateTime<Utc>, breakpoint_on_event_start: bool) -> i64 {
        let t = time.timestamp();
        let next = self.epochs.partition_point(|epoch| epoch.start <= t);
        let epoch = self.epochs[next.saturating_sub(1)];

        let mut start = epoch.start;
        if !breakpoint_on_event_start {
            start -= self.duration_days * SECONDS_PER_DAY;
        }

        let days = (t - start).div_euclid(SECONDS_PER_DAY);
        let number = days.div_euclid(2 * self.duration_days) + epoch.event;

        match self.epochs.get(next) {
            Some(next_epoch) => number.min(next_epoch.event - 1),
            None => number,
        }
    }

    /// Returns the half-open `[start, end)` window of an event.
    pub fn period_for_event(&self, event: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let epoch = self
            .epochs
            .iter()
            .rev()
            .find(|epoch| epoch.event <= event)
            .unwrap_or(&self.epochs[0]);

        let offset_days = 2 * self.duration_days * (event - epoch.event);
        let start = DateTime::UNIX_EPOCH
            + Duration::seconds(epoch.start)
            + Duration::days(offset_days);

        (start, start + self.event_duration())
    }

    /// Returns the window of the event `time` belongs to, breaking on event start.
    pub fn period_for_time(&self, time: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        self.period_for_event(self.event_number_at(time, true))
    }

    /// Returns the 1-indexed day of the event at `time`.
    ///
    /// Values above the event duration mean the event is over and `time` falls in the break.
    pub fn day_within_period(&self, time: DateTime<Utc>) -> i64 {
        let (start, _) = self.period_for_time(time);
        (time - start).num_seconds().div_euclid(SECONDS_PER_DAY) + 1
    }
}

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Days covered by the default range, counted back from today.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Calendar interval, both ends inclusive, serialized as `YYYY-MM-DD`.
///
/// `start <= end` is not enforced here; the backend decides what an inverted
/// range means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `today - days ..= today`
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today - Duration::days(days),
            end: today,
        }
    }

    pub fn default_for(today: NaiveDate) -> Self {
        Self::last_days(today, DEFAULT_LOOKBACK_DAYS)
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Two generations of the dashboard date range.
///
/// The date picker edits `draft` freely; only [`DateRangeStore::commit`] moves
/// the draft into `applied`, and only `applied` is ever used as a trigger key
/// for network fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeStore {
    draft: DateRange,
    applied: DateRange,
}

impl DateRangeStore {
    pub fn new(today: NaiveDate) -> Self {
        let range = DateRange::default_for(today);
        Self {
            draft: range,
            applied: range,
        }
    }

    pub fn draft(&self) -> DateRange {
        self.draft
    }

    pub fn applied(&self) -> DateRange {
        self.applied
    }

    pub fn set_draft_start(&mut self, date: NaiveDate) {
        self.draft.start = date;
    }

    pub fn set_draft_end(&mut self, date: NaiveDate) {
        self.draft.end = date;
    }

    /// True when the picker shows something other than what is applied.
    pub fn has_pending_edits(&self) -> bool {
        self.draft != self.applied
    }

    /// Copies the draft into the applied range. Returns whether the applied
    /// range changed, so committing twice is a no-op the second time.
    pub fn commit(&mut self) -> bool {
        let changed = self.applied != self.draft;
        if changed {
            debug!(from = %self.applied, to = %self.draft, "Applying date range");
        }
        self.applied = self.draft;
        changed
    }

    /// Recomputes the default range and overwrites both generations.
    pub fn reset(&mut self, today: NaiveDate) {
        let range = DateRange::default_for(today);
        debug!(range = %range, "Resetting date range to default");
        self.draft = range;
        self.applied = range;
    }
}

//! Upcoming-workload histogram.
//!
//! # Invariants
//! - Bucket `n` (0..=6) holds items due exactly `n` days from today; bucket 7
//!   holds everything due 7 or more days out.
//! - Day distance is the integer calendar-day difference, never fractional.
//! - Items due before today are not counted.

use crate::model::item::Item;
use crate::model::priority::Priority;
use crate::model::record::shift_date;
use chrono::NaiveDate;

/// Number of day buckets; the last one is open-ended.
pub const HISTOGRAM_BUCKETS: usize = 8;

/// Per-priority item counts inside one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    counts: [usize; 3],
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        self.counts[priority.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn add(&mut self, priority: Priority) {
        self.counts[priority.index()] += 1;
    }
}

/// Item counts per day bucket and priority, relative to one "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadHistogram {
    today: NaiveDate,
    buckets: [PriorityCounts; HISTOGRAM_BUCKETS],
}

impl WorkloadHistogram {
    /// Aggregates `items` (normally the upcoming deadline window).
    pub fn from_items<'a>(today: NaiveDate, items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut buckets = [PriorityCounts::default(); HISTOGRAM_BUCKETS];
        for item in items {
            if let Some(index) = bucket_index(item.days_until_deadline(today)) {
                buckets[index].add(item.priority);
            }
        }
        Self { today, buckets }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn buckets(&self) -> &[PriorityCounts; HISTOGRAM_BUCKETS] {
        &self.buckets
    }

    /// First date covered by bucket `index`.
    pub fn bucket_date(&self, index: usize) -> Option<NaiveDate> {
        if index >= HISTOGRAM_BUCKETS {
            return None;
        }
        // `index` is below HISTOGRAM_BUCKETS.
        shift_date(self.today, index as i64).ok()
    }

    /// Whether bucket `index` also covers every later date.
    pub fn is_open_ended(index: usize) -> bool {
        index == HISTOGRAM_BUCKETS - 1
    }
}

/// Maps a day distance to its bucket. `None` for past deadlines.
pub fn bucket_index(days_from_today: i64) -> Option<usize> {
    if days_from_today < 0 {
        return None;
    }
    let last = HISTOGRAM_BUCKETS - 1;
    Some(usize::try_from(days_from_today).map_or(last, |days| days.min(last)))
}

//! Date-keyed ranked output of a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ScoredTrend;

/// Ranked trends persisted for one calendar day.
///
/// Trends stay sorted by descending score; equal scores keep the order in
/// which they were merged.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use trendscout_core::DailySnapshot;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
/// let snapshot = DailySnapshot::new(date);
/// assert!(snapshot.trends.is_empty());
/// assert_eq!(DailySnapshot::file_name(date), "trends_2026-03-14.json");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Calendar day the snapshot covers, serialised as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Trends ordered by descending score.
    pub trends: Vec<ScoredTrend>,
}

impl DailySnapshot {
    /// Create an empty snapshot for `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            trends: Vec::new(),
        }
    }

    /// Append trends and restore descending score order.
    ///
    /// Existing entries are never replaced or deduplicated: a keyword merged
    /// from two categories appears twice.
    pub fn merge<I>(&mut self, trends: I)
    where
        I: IntoIterator<Item = ScoredTrend>,
    {
        self.trends.extend(trends);
        sort_by_score(&mut self.trends);
    }

    /// File name used to persist the snapshot for `date`.
    #[must_use]
    pub fn file_name(date: NaiveDate) -> String {
        format!("trends_{}.json", date.format("%Y-%m-%d"))
    }
}

/// Stable sort by descending score.
pub fn sort_by_score(trends: &mut [ScoredTrend]) {
    trends.sort_by(|left, right| right.score.cmp(&left.score));
}

//! Progress of one category through the pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Step a category has reached.
///
/// Categories advance `Pending → Fetching → Filtering → Scoring →
/// (Enriching) → Persisting → Done`; `Failed` is reachable from any step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryStage {
    /// Not started yet.
    Pending,
    /// Waiting on the trend source for raw trends.
    Fetching,
    /// Applying the regime check and the noise filter.
    Filtering,
    /// Computing composite scores.
    Scoring,
    /// Re-scoring the kept trends with interest series.
    Enriching,
    /// Merging results into the daily snapshot.
    Persisting,
    /// Finished, with or without trends.
    Done,
    /// Stopped by an error, a panic or the deadline.
    Failed,
}

impl CategoryStage {
    const ORDER: [Self; 8] = [
        Self::Pending,
        Self::Fetching,
        Self::Filtering,
        Self::Scoring,
        Self::Enriching,
        Self::Persisting,
        Self::Done,
        Self::Failed,
    ];

    /// Return the stage as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Filtering => "filtering",
            Self::Scoring => "scoring",
            Self::Enriching => "enriching",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    const fn code(self) -> u8 {
        self as u8
    }

    fn from_code(code: u8) -> Self {
        Self::ORDER
            .get(usize::from(code))
            .copied()
            .unwrap_or(Self::Failed)
    }
}

impl std::fmt::Display for CategoryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage shared between a running unit and its supervisor.
///
/// The unit advances the stage; the supervisor reads it to report where a
/// timed-out unit was stuck.
#[derive(Debug, Clone)]
pub struct StageTracker(Arc<AtomicU8>);

impl StageTracker {
    /// Create a tracker at [`CategoryStage::Pending`].
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicU8::new(CategoryStage::Pending.code())))
    }

    /// Record that the unit has reached `stage`.
    pub fn advance(&self, stage: CategoryStage) {
        self.0.store(stage.code(), Ordering::SeqCst);
    }

    /// Stage most recently recorded.
    #[must_use]
    pub fn current(&self) -> CategoryStage {
        CategoryStage::from_code(self.0.load(Ordering::SeqCst))
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

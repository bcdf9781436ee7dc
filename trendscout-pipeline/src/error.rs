//! Error types raised by the pipeline.

use std::time::Duration;

use thiserror::Error;
use trendscout_core::Category;
use trendscout_data::SnapshotError;
use trendscout_data::source::SourceError;

use crate::CategoryStage;

/// Reasons a single category produced no results.
///
/// These never abort a run: the supervisor records them against the
/// category and moves on.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// The trend source could not serve the category.
    #[error("trend source failed for {category}")]
    Source {
        /// Affected category.
        category: Category,
        /// Source error from the trend source.
        #[source]
        source: SourceError,
    },
    /// The unit of work panicked.
    #[error("{category} panicked: {message}")]
    Panicked {
        /// Affected category.
        category: Category,
        /// Panic payload, when it was a string.
        message: String,
    },
    /// The unit was cancelled before it finished.
    #[error("{category} was cancelled")]
    Cancelled {
        /// Affected category.
        category: Category,
    },
    /// The unit missed its wall-clock budget and was aborted.
    #[error("{category} timed out after {budget:?} while {stage}")]
    TimedOut {
        /// Affected category.
        category: Category,
        /// Stage the unit had reached when it was aborted.
        stage: CategoryStage,
        /// Budget that was exceeded.
        budget: Duration,
    },
}

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// `top_n` was zero.
    #[error("top_n must be at least 1")]
    InvalidTopN,
    /// The per-category budget was zero.
    #[error("category timeout must be positive")]
    ZeroTimeout,
    /// The daily snapshot could not be read or written.
    #[error("failed to persist {category}: {source}")]
    Snapshot {
        /// Category whose results were being persisted.
        category: Category,
        /// Source error from the snapshot store.
        #[source]
        source: SnapshotError,
    },
    /// The persistence task did not complete.
    #[error("persistence of {category} was interrupted: {message}")]
    PersistInterrupted {
        /// Category whose results were being persisted.
        category: Category,
        /// Join failure description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn timeouts_report_sub_second_budgets() {
        let err = CategoryError::TimedOut {
            category: Category::Health,
            stage: CategoryStage::Fetching,
            budget: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "health timed out after 200ms while fetching");
    }
}

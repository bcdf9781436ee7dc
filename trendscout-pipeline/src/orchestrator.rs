//! Supervisor running each category as an isolated, deadline-bound task.
//!
//! Categories run one after another. Each is spawned onto the runtime with
//! its own copies of the source handle, scorer and settings, then awaited
//! under the configured budget. A unit that misses the budget is aborted and
//! given a short grace period for its future, and every request it holds, to
//! be dropped before the next category starts. A unit still running after
//! the grace period is blocking its thread; it is abandoned and its results
//! are never persisted. Errors and panics stop at the category boundary and
//! become a [`CategoryOutcome`]; only snapshot failures end the run.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use tokio::task::JoinError;
use trendscout_core::{Category, ScoredTrend};
use trendscout_data::SnapshotStore;
use trendscout_data::source::TrendSource;
use trendscout_scorer::TrendScorer;

use crate::unit::CategoryUnit;
use crate::{CategoryError, CategoryStage, PipelineConfig, PipelineError, StageTracker};

/// How long an aborted unit may take to stop before it is abandoned.
const ABORT_GRACE: Duration = Duration::from_millis(250);

/// How a category finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStatus {
    /// Trends were scored and persisted.
    Done,
    /// The category ran cleanly but produced nothing to persist.
    Empty,
    /// The unit returned an error or panicked.
    Failed(String),
    /// The unit was aborted at its deadline.
    TimedOut {
        /// Stage the unit had reached.
        stage: CategoryStage,
    },
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => f.write_str("ok"),
            Self::Empty => f.write_str("empty"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::TimedOut { stage } => write!(f, "timed out while {stage}"),
        }
    }
}

/// Result of one category within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOutcome {
    /// Category processed.
    pub category: Category,
    /// How it finished.
    pub status: CategoryStatus,
    /// Trends persisted for the category, highest score first.
    pub trends: Vec<ScoredTrend>,
}

impl CategoryOutcome {
    const fn without_trends(category: Category, status: CategoryStatus) -> Self {
        Self {
            category,
            status,
            trends: Vec::new(),
        }
    }

    /// Number of trends persisted.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.trends.len()
    }

    /// Mean composite score, or `None` when nothing was persisted.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "mean of composite scores")]
    pub fn average_score(&self) -> Option<f64> {
        let count = u32::try_from(self.trends.len()).ok().filter(|n| *n > 0)?;
        let total: u32 = self.trends.iter().map(|trend| u32::from(trend.score)).sum();
        Some(f64::from(total) / f64::from(count))
    }

    /// Highest-scoring keyword.
    #[must_use]
    pub fn top_keyword(&self) -> Option<&str> {
        self.trends.first().map(|trend| trend.keyword.as_str())
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Day the run wrote to.
    pub date: NaiveDate,
    /// Snapshot file for that day.
    pub snapshot_path: Utf8PathBuf,
    /// One entry per requested category, in processing order.
    pub outcomes: Vec<CategoryOutcome>,
}

impl RunReport {
    /// Total trends persisted by the run.
    #[must_use]
    pub fn persisted(&self) -> usize {
        self.outcomes.iter().map(CategoryOutcome::count).sum()
    }
}

/// Runs categories against a trend source and persists their results.
pub struct Orchestrator {
    source: Arc<dyn TrendSource>,
    scorer: TrendScorer,
    store: SnapshotStore,
    config: PipelineConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("source", &self.source.describe())
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Build an orchestrator.
    ///
    /// # Errors
    /// Returns [`PipelineError`] when `config` fails validation.
    pub fn new(
        source: Arc<dyn TrendSource>,
        scorer: TrendScorer,
        store: SnapshotStore,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            source,
            scorer,
            store,
            config: config.validate()?,
        })
    }

    /// Settings applied to every category.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process `categories` in order and merge their results into the
    /// snapshot for `date`.
    ///
    /// # Errors
    /// Returns [`PipelineError`] when the snapshot cannot be read or
    /// written. Category failures and timeouts are reported in the
    /// [`RunReport`] instead.
    pub async fn run(
        &self,
        categories: &[Category],
        date: NaiveDate,
    ) -> Result<RunReport, PipelineError> {
        log::info!(
            "running {} categories against {} ({} regime, top {})",
            categories.len(),
            self.source.describe(),
            self.config.regime,
            self.config.top_n
        );
        let mut outcomes = Vec::with_capacity(categories.len());
        for &category in categories {
            outcomes.push(self.run_category(category, date).await?);
        }
        Ok(RunReport {
            date,
            snapshot_path: self.store.path_for(date),
            outcomes,
        })
    }

    async fn run_category(
        &self,
        category: Category,
        date: NaiveDate,
    ) -> Result<CategoryOutcome, PipelineError> {
        let tracker = StageTracker::new();
        let unit = CategoryUnit {
            category,
            source: Arc::clone(&self.source),
            scorer: self.scorer.clone(),
            config: self.config,
            tracker: tracker.clone(),
        };
        let budget = self.config.category_timeout;
        let mut handle = tokio::spawn(unit.run());

        let Ok(joined) = tokio::time::timeout(budget, &mut handle).await else {
            let stage = tracker.current();
            handle.abort();
            if tokio::time::timeout(ABORT_GRACE, handle).await.is_err() {
                log::warn!(
                    "{category}: unit did not stop within {ABORT_GRACE:?} of its abort; abandoning it"
                );
            }
            let error = CategoryError::TimedOut {
                category,
                stage,
                budget,
            };
            log::warn!("{error}; contributing no trends");
            tracker.advance(CategoryStage::Failed);
            return Ok(CategoryOutcome::without_trends(
                category,
                CategoryStatus::TimedOut { stage },
            ));
        };

        let trends = match joined.map_err(|err| join_failure(category, err)) {
            Ok(Ok(trends)) => trends,
            Ok(Err(error)) | Err(error) => {
                log::error!("{error}: {}", source_chain(&error));
                tracker.advance(CategoryStage::Failed);
                return Ok(CategoryOutcome::without_trends(
                    category,
                    CategoryStatus::Failed(describe(&error)),
                ));
            }
        };
        if trends.is_empty() {
            tracker.advance(CategoryStage::Done);
            return Ok(CategoryOutcome::without_trends(
                category,
                CategoryStatus::Empty,
            ));
        }

        tracker.advance(CategoryStage::Persisting);
        self.persist(category, date, trends.clone()).await?;
        tracker.advance(CategoryStage::Done);
        log::info!("{category}: persisted {} trends", trends.len());
        Ok(CategoryOutcome {
            category,
            status: CategoryStatus::Done,
            trends,
        })
    }

    async fn persist(
        &self,
        category: Category,
        date: NaiveDate,
        trends: Vec<ScoredTrend>,
    ) -> Result<(), PipelineError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.merge(date, trends))
            .await
            .map_err(|err| PipelineError::PersistInterrupted {
                category,
                message: err.to_string(),
            })?
            .map(drop)
            .map_err(|source| PipelineError::Snapshot { category, source })
    }
}

fn join_failure(category: Category, err: JoinError) -> CategoryError {
    match err.try_into_panic() {
        Ok(payload) => CategoryError::Panicked {
            category,
            message: panic_message(payload.as_ref()),
        },
        Err(_) => CategoryError::Cancelled { category },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

/// Short reason for the summary table.
fn describe(error: &CategoryError) -> String {
    match error {
        CategoryError::Source { source, .. } => source.to_string(),
        CategoryError::Panicked { message, .. } => format!("panicked: {message}"),
        CategoryError::Cancelled { .. } => "cancelled".to_owned(),
        CategoryError::TimedOut { stage, .. } => format!("timed out while {stage}"),
    }
}

fn source_chain(error: &dyn std::error::Error) -> String {
    let mut parts = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    if parts.is_empty() {
        "no further detail".to_owned()
    } else {
        parts.join(": ")
    }
}

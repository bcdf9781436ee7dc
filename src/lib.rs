//! Facade crate for the Trendscout pipeline.
//!
//! This crate re-exports the domain types and the scorer, and exposes the
//! trend sources, snapshot store and orchestrator behind feature flags.

#![forbid(unsafe_code)]

pub use trendscout_core::{
    Category, DailySnapshot, RawScores, RawTrend, Rejection, RuleSet, RuleSetError, ScoredTrend,
    ScoringRegime, Tier, TrendSignal, Velocity, buildability, is_buildable,
};
pub use trendscout_scorer::{ScoreWeights, TrendScorer, WeightsError};

#[cfg(feature = "data")]
pub use trendscout_data::source::{FileTrendSource, HttpTrendSource, SourceError, TrendSource};
#[cfg(feature = "data")]
pub use trendscout_data::{SnapshotError, SnapshotStore};

#[cfg(feature = "pipeline")]
pub use trendscout_pipeline::{
    CategoryOutcome, CategoryStatus, Orchestrator, PipelineConfig, PipelineError, RunReport,
};

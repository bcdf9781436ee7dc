//! Category orchestration for Trendscout.
//!
//! A run walks the requested categories in order. Each category is an
//! isolated task that fetches raw trends from a
//! [`TrendSource`](trendscout_data::source::TrendSource), drops records the
//! run cannot score, keeps the best `top_n` and optionally re-scores them
//! with interest series. The supervisor enforces a wall-clock budget per
//! category, turns failures into [`CategoryOutcome`]s and merges results
//! into the daily snapshot one category at a time.

#![forbid(unsafe_code)]

mod config;
mod error;
mod orchestrator;
mod stage;
mod summary;
mod unit;

pub use config::{DEFAULT_CATEGORY_TIMEOUT, DEFAULT_TOP_N, PipelineConfig};
pub use error::{CategoryError, PipelineError};
pub use orchestrator::{CategoryOutcome, CategoryStatus, Orchestrator, RunReport};
pub use stage::{CategoryStage, StageTracker};
pub use summary::write_summary;
pub use unit::{FilterReport, filter_trends, rank_trends};

//! Trend sources feeding the pipeline.
//!
//! A [`TrendSource`] discovers raw trends for a category and looks up daily
//! interest series for keywords. Two implementations ship with the crate:
//! - [`HttpTrendSource`] queries a trends bridge service over HTTP.
//! - [`FileTrendSource`] replays records exported to a directory.
//!
//! Upstream hiccups are absorbed inside the source: a failed or slow batch is
//! logged and skipped, so callers see partial results rather than errors.
//! [`SourceError`] is reserved for failures that make the source unusable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use trendscout_core::{Category, RawTrend};

mod error;
mod file;
mod http;
mod seeds;
mod wire;

pub use error::SourceError;
pub use file::{FileTrendSource, INTEREST_FILE_NAME};
pub use http::{
    DEFAULT_BATCH_PAUSE, DEFAULT_MAX_KEYWORDS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
    HttpTrendSource, HttpTrendSourceConfig,
};
pub use seeds::category_seeds;

/// Interest series keyed by keyword.
pub type InterestMap = BTreeMap<String, Vec<f64>>;

/// Collaborator producing raw trends and interest series.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Short label used in log lines.
    fn describe(&self) -> String;

    /// Discover raw trends for `category`.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the source cannot be used at all.
    async fn discover(&self, category: Category) -> Result<Vec<RawTrend>, SourceError>;

    /// Fetch daily interest series for `keywords`.
    ///
    /// Keywords without data are absent from the returned map.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the source cannot be used at all.
    async fn interest(&self, keywords: &[String]) -> Result<InterestMap, SourceError>;
}

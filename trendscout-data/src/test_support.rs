//! Test utilities for trend sources.
//!
//! [`StubTrendSource`] returns pre-configured trends and series without
//! touching the network, and can be told to fail, stall, block or panic for
//! a category so orchestration failure paths can be exercised.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use trendscout_core::{Category, RawTrend};

use crate::source::{InterestMap, SourceError, TrendSource};

/// How the stub behaves for one category.
#[derive(Debug, Clone)]
enum Behaviour {
    Fail(String),
    Stall,
    Block(Duration),
    Panic,
}

/// Deterministic [`TrendSource`] for tests.
///
/// # Example
///
/// ```
/// use trendscout_core::{Category, RawTrend};
/// use trendscout_data::source::TrendSource;
/// use trendscout_data::test_support::StubTrendSource;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let source = StubTrendSource::new().with_trends(
///     Category::Finance,
///     vec![RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0)],
/// );
/// let trends = source.discover(Category::Finance).await.expect("stub succeeds");
/// assert_eq!(trends.len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubTrendSource {
    trends: BTreeMap<Category, Vec<RawTrend>>,
    series: InterestMap,
    behaviours: BTreeMap<Category, Behaviour>,
    discover_calls: Arc<AtomicUsize>,
    interest_calls: Arc<AtomicUsize>,
    stall_released: Arc<AtomicBool>,
}

impl StubTrendSource {
    /// Create a stub with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `trends` when `category` is discovered.
    #[must_use]
    pub fn with_trends(mut self, category: Category, trends: Vec<RawTrend>) -> Self {
        self.trends.insert(category, trends);
        self
    }

    /// Return `series` for `keyword` from interest lookups.
    #[must_use]
    pub fn with_series(mut self, keyword: impl Into<String>, series: Vec<f64>) -> Self {
        self.series.insert(keyword.into(), series);
        self
    }

    /// Fail discovery of `category` with [`SourceError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, category: Category, message: impl Into<String>) -> Self {
        self.behaviours
            .insert(category, Behaviour::Fail(message.into()));
        self
    }

    /// Never complete discovery of `category`.
    #[must_use]
    pub fn stalling(mut self, category: Category) -> Self {
        self.behaviours.insert(category, Behaviour::Stall);
        self
    }

    /// Block the calling thread for `duration` while discovering `category`.
    ///
    /// The discovery future never yields, so an abort cannot land until the
    /// sleep ends.
    #[must_use]
    pub fn blocking(mut self, category: Category, duration: Duration) -> Self {
        self.behaviours.insert(category, Behaviour::Block(duration));
        self
    }

    /// Panic while discovering `category`.
    #[must_use]
    pub fn panicking(mut self, category: Category) -> Self {
        self.behaviours.insert(category, Behaviour::Panic);
        self
    }

    /// Number of discovery calls made so far.
    #[must_use]
    pub fn discover_calls(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }

    /// Number of interest lookups made so far.
    #[must_use]
    pub fn interest_calls(&self) -> usize {
        self.interest_calls.load(Ordering::SeqCst)
    }

    /// Whether a stalled discovery has been dropped by its caller.
    #[must_use]
    pub fn stall_released(&self) -> bool {
        self.stall_released.load(Ordering::SeqCst)
    }
}

/// Flags the stub when a stalled future is dropped.
struct ReleaseOnDrop(Arc<AtomicBool>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

fn explode(category: Category) -> ! {
    panic!("stub source panicked while discovering {category}");
}

#[async_trait]
impl TrendSource for StubTrendSource {
    fn describe(&self) -> String {
        "stub".to_owned()
    }

    async fn discover(&self, category: Category) -> Result<Vec<RawTrend>, SourceError> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviours.get(&category) {
            Some(Behaviour::Fail(message)) => Err(SourceError::Unavailable {
                category,
                message: message.clone(),
            }),
            Some(Behaviour::Stall) => {
                let _guard = ReleaseOnDrop(Arc::clone(&self.stall_released));
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
            Some(Behaviour::Block(duration)) => {
                std::thread::sleep(*duration);
                Ok(Vec::new())
            }
            Some(Behaviour::Panic) => explode(category),
            None => Ok(self.trends.get(&category).cloned().unwrap_or_default()),
        }
    }

    async fn interest(&self, keywords: &[String]) -> Result<InterestMap, SourceError> {
        self.interest_calls.fetch_add(1, Ordering::SeqCst);
        Ok(keywords
            .iter()
            .filter_map(|keyword| {
                self.series
                    .get(keyword)
                    .map(|series| (keyword.clone(), series.clone()))
            })
            .collect())
    }
}

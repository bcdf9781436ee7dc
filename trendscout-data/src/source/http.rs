//! HTTP trend source backed by a trends bridge service.
//!
//! The bridge exposes two endpoints:
//! - `GET {base}/related?q=<seed>&q=<seed>` returning
//!   `{"rising": {"<seed>": [{"query": "..."}]}}`.
//! - `GET {base}/interest?q=<keyword>&q=...` returning
//!   `{"series": {"<keyword>": [..]}}`.
//!
//! Discovery sends the category's seeds in pairs, keeps the top rising
//! queries per seed, drops headline-shaped garbage and caps the keyword list
//! before fetching interest series in batches of five. Each call carries its
//! own timeout; a failed batch is logged and skipped.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use trendscout_core::Category;
//! use trendscout_data::source::{HttpTrendSource, HttpTrendSourceConfig, TrendSource};
//!
//! # async fn demo() -> Result<(), trendscout_data::source::SourceError> {
//! let config = HttpTrendSourceConfig::new("http://localhost:8300")
//!     .with_timeout(Duration::from_secs(10));
//! let source = HttpTrendSource::with_config(config)?;
//! let trends = source.discover(Category::Finance).await?;
//! # let _ = trends;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use trendscout_core::{Category, DEFAULT_MAX_KEYWORD_CHARS, RawTrend};
use url::Url;

use super::wire::{InterestResponse, RelatedResponse};
use super::{InterestMap, SourceError, TrendSource, category_seeds};

/// Default user agent for bridge requests.
pub const DEFAULT_USER_AGENT: &str = "trendscout/0.1";
/// Default per-call timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Default cap on keywords discovered per category.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
/// Default pause between consecutive batches.
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_secs(2);

const SEED_BATCH: usize = 2;
const RISING_PER_SEED: usize = 5;
const INTEREST_BATCH: usize = 5;

/// Configuration for [`HttpTrendSource`].
#[derive(Debug, Clone)]
pub struct HttpTrendSourceConfig {
    /// Base URL of the bridge service.
    pub base_url: String,
    /// Budget for each request.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Keywords kept per category after garbage filtering.
    pub max_keywords: usize,
    /// Pause between batches to stay clear of upstream rate limits.
    pub batch_pause: Duration,
}

impl Default for HttpTrendSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8300".to_owned(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }
}

impl HttpTrendSourceConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the keyword cap.
    #[must_use]
    pub const fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    /// Set the pause between batches.
    #[must_use]
    pub const fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }
}

/// Trend source querying the bridge service.
#[derive(Debug, Clone)]
pub struct HttpTrendSource {
    client: Client,
    base_url: Url,
    config: HttpTrendSourceConfig,
}

impl HttpTrendSource {
    /// Create a source for `base_url` with default settings.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the URL is invalid or the client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_config(HttpTrendSourceConfig::new(base_url))
    }

    /// Create a source from explicit configuration.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the URL is invalid or the client fails to
    /// build.
    pub fn with_config(config: HttpTrendSourceConfig) -> Result<Self, SourceError> {
        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|source| SourceError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|source| SourceError::HttpClient { source })?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Build an endpoint URL carrying one `q` parameter per term.
    fn endpoint<S: AsRef<str>>(&self, path: &str, terms: &[S]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
        url.set_path(&joined);
        url.query_pairs_mut()
            .clear()
            .extend_pairs(terms.iter().map(|term| ("q", term.as_ref())));
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        let label = url.to_string();
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| self.convert_reqwest_error(&err, &label))?
                .error_for_status()
                .map_err(|err| self.convert_reqwest_error(&err, &label))?;
            response
                .json::<T>()
                .await
                .map_err(|source| SourceError::Decode {
                    url: label.clone(),
                    source,
                })
        };
        tokio::time::timeout(self.config.timeout, request)
            .await
            .unwrap_or_else(|_| {
                Err(SourceError::Timeout {
                    url: label.clone(),
                    timeout: self.config.timeout,
                })
            })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> SourceError {
        if error.is_timeout() {
            return SourceError::Timeout {
                url: url.to_owned(),
                timeout: self.config.timeout,
            };
        }
        if let Some(status) = error.status() {
            return SourceError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }
        SourceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    async fn pause(&self, first: bool) {
        if !first && !self.config.batch_pause.is_zero() {
            tokio::time::sleep(self.config.batch_pause).await;
        }
    }

    async fn rising_keywords(&self, category: Category) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();
        for (index, batch) in category_seeds(category).chunks(SEED_BATCH).enumerate() {
            self.pause(index == 0).await;
            let url = self.endpoint("related", batch);
            match self.fetch::<RelatedResponse>(url).await {
                Ok(response) => collect_rising(&response, batch, &mut keywords),
                Err(err) => log::warn!("related queries for {category} {batch:?} skipped: {err}"),
            }
        }
        keywords
    }
}

#[async_trait]
impl TrendSource for HttpTrendSource {
    fn describe(&self) -> String {
        format!("http {}", self.base_url)
    }

    async fn discover(&self, category: Category) -> Result<Vec<RawTrend>, SourceError> {
        let rising = self.rising_keywords(category).await;
        let found = rising.len();
        let keywords: Vec<String> = rising
            .into_iter()
            .filter(|keyword| is_usable(keyword))
            .take(self.config.max_keywords)
            .collect();
        if keywords.is_empty() {
            log::info!("no usable rising keywords for {category} ({found} before filtering)");
            return Ok(Vec::new());
        }
        log::debug!("{category}: {} of {found} rising keywords kept", keywords.len());

        let mut series = self.interest(&keywords).await?;
        Ok(keywords
            .into_iter()
            .filter_map(|keyword| {
                let points = series.remove(&keyword)?;
                Some(RawTrend::series(keyword, category, points))
            })
            .collect())
    }

    async fn interest(&self, keywords: &[String]) -> Result<InterestMap, SourceError> {
        let mut found = InterestMap::new();
        for (index, batch) in keywords.chunks(INTEREST_BATCH).enumerate() {
            self.pause(index == 0).await;
            let url = self.endpoint("interest", batch);
            match self.fetch::<InterestResponse>(url).await {
                Ok(response) => {
                    found.extend(
                        response
                            .series
                            .into_iter()
                            .filter(|(keyword, points)| {
                                !points.is_empty() && batch.contains(keyword)
                            }),
                    );
                }
                Err(err) => log::warn!("interest series for {batch:?} skipped: {err}"),
            }
        }
        Ok(found)
    }
}

fn collect_rising(response: &RelatedResponse, seeds: &[&str], keywords: &mut BTreeSet<String>) {
    for seed in seeds {
        let Some(queries) = response.rising.get(*seed) else {
            continue;
        };
        keywords.extend(
            queries
                .iter()
                .take(RISING_PER_SEED)
                .map(|entry| entry.query.trim().to_owned())
                .filter(|query| !query.is_empty()),
        );
    }
}

/// Reject headline and quiz artefacts before spending requests on them.
fn is_usable(keyword: &str) -> bool {
    keyword.chars().count() <= DEFAULT_MAX_KEYWORD_CHARS
        && !keyword.contains("__")
        && !keyword.ends_with('.')
        && !keyword.ends_with('?')
}

//! Scoring engine for Trendscout.
//!
//! Raw trends arrive in one of two shapes and each has its own scoring
//! regime:
//! - **Metadata** records carry a search-volume estimate and a growth
//!   percentage. Growth, volume and buildability come from the record;
//!   freshness comes from an optional enrichment series.
//! - **Series** records carry a daily interest series from which velocity,
//!   volume and freshness are derived. Low-interest, brand and over-broad
//!   keywords are skipped before scoring.
//!
//! Each regime combines its four sub-scores with a validated
//! [`ScoreWeights`] table into a `0..=100` composite held by
//! [`ScoredTrend`](trendscout_core::ScoredTrend), keeping the unrounded
//! sub-scores for auditing.
//!
//! # Examples
//!
//! ```
//! use trendscout_core::{Category, RawTrend};
//! use trendscout_scorer::TrendScorer;
//!
//! let scorer = TrendScorer::default();
//! let mut series = vec![20.0; 7];
//! series.extend([40.0; 7]);
//! let trend = RawTrend::series("habit tracker app", Category::Productivity, series);
//! let scored = scorer.score_trend(&trend, None).expect("interest is above the floor");
//! assert_eq!(scored.score, 73);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod scorer;
mod signals;
mod weights;

pub use error::WeightsError;
pub use scorer::{DEFAULT_INTEREST_FLOOR, TrendScorer};
pub use signals::{
    DEFAULT_FRESHNESS, EMPTY_SERIES_FRESHNESS, GROWTH_CEILING_PCT, GrowthSignal,
    VELOCITY_MIN_POINTS, VolumeSignal, WINDOW_DAYS, freshness_from_series, growth_from_pct,
    recent_interest, velocity_from_series, volume_from_metadata, volume_from_series,
};
pub use weights::{ScoreWeights, WEIGHT_TOLERANCE};

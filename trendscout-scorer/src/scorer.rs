//! Composite scorer turning raw trends into ranked records.
#![forbid(unsafe_code)]

use std::sync::Arc;

use trendscout_core::{RawScores, RawTrend, RuleSet, ScoredTrend, ScoringRegime, TrendSignal};

use crate::signals::{
    DEFAULT_FRESHNESS, WINDOW_DAYS, freshness_from_series, growth_from_pct, recent_interest,
    velocity_from_series, volume_from_metadata, volume_from_series,
};
use crate::{ScoreWeights, WeightsError};

/// Series whose recent mean falls below this value are not scored.
pub const DEFAULT_INTEREST_FLOOR: f64 = 15.0;

/// Scores raw trends with a rule set and one weight table per regime.
///
/// The scorer is cheap to clone: the rule set is shared.
///
/// # Examples
/// ```
/// use trendscout_core::{Category, RawTrend, Tier, Velocity};
/// use trendscout_scorer::TrendScorer;
///
/// let scorer = TrendScorer::default();
/// let trend = RawTrend::metadata("invoice generator tool", Category::Finance, 120_000, 300.0);
/// let scored = scorer.score_trend(&trend, None).expect("metadata trends always score");
/// assert_eq!(scored.score, 59);
/// assert_eq!(scored.velocity, Velocity::Rising);
/// assert_eq!(scored.buildability, Tier::High);
/// ```
#[derive(Debug, Clone)]
pub struct TrendScorer {
    rules: Arc<RuleSet>,
    metadata_weights: ScoreWeights,
    series_weights: ScoreWeights,
    interest_floor: f64,
}

impl TrendScorer {
    /// Build a scorer around `rules` with the default weight tables.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self::from_shared(Arc::new(rules))
    }

    /// Build a scorer around an already shared rule set.
    #[must_use]
    pub const fn from_shared(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            metadata_weights: ScoreWeights::METADATA,
            series_weights: ScoreWeights::SERIES,
            interest_floor: DEFAULT_INTEREST_FLOOR,
        }
    }

    /// Replace the weight table used for `regime`.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when `weights` fail validation.
    pub fn with_weights(
        mut self,
        regime: ScoringRegime,
        weights: ScoreWeights,
    ) -> Result<Self, WeightsError> {
        let validated = weights.validate()?;
        match regime {
            ScoringRegime::Metadata => self.metadata_weights = validated,
            ScoringRegime::Series => self.series_weights = validated,
        }
        Ok(self)
    }

    /// Replace the minimum recent interest required for series records.
    #[must_use]
    pub const fn with_interest_floor(mut self, floor: f64) -> Self {
        self.interest_floor = floor;
        self
    }

    /// Rule set consulted for buildability and the series brand check.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Weight table applied to `regime`.
    #[must_use]
    pub const fn weights(&self, regime: ScoringRegime) -> ScoreWeights {
        match regime {
            ScoringRegime::Metadata => self.metadata_weights,
            ScoringRegime::Series => self.series_weights,
        }
    }

    /// Score one trend.
    ///
    /// Metadata records always score. They are not checked against the
    /// brand and generic lists, so callers run [`RuleSet::classify`] first.
    /// `enrichment` supplies an interest series used for freshness when it
    /// has at least seven points.
    ///
    /// Series records are scored from their own series and `enrichment` is
    /// ignored. They return `None` when recent interest is below the floor
    /// or the keyword names a brand or an over-broad term.
    #[must_use]
    pub fn score_trend(&self, trend: &RawTrend, enrichment: Option<&[f64]>) -> Option<ScoredTrend> {
        match &trend.signal {
            TrendSignal::Metadata { volume, growth_pct } => {
                Some(self.score_metadata(trend, *volume, *growth_pct, enrichment))
            }
            TrendSignal::Series { interest_series } => self.score_series(trend, interest_series),
        }
    }

    fn score_metadata(
        &self,
        trend: &RawTrend,
        volume: u64,
        growth_pct: f64,
        enrichment: Option<&[f64]>,
    ) -> ScoredTrend {
        let growth = growth_from_pct(growth_pct);
        let volume_signal = volume_from_metadata(volume);
        let build = self.rules.buildability(&trend.keyword);
        let freshness = enrichment
            .filter(|series| series.len() >= WINDOW_DAYS)
            .map_or(DEFAULT_FRESHNESS, freshness_from_series);
        let composite = self.metadata_weights.combine(
            growth.score,
            volume_signal.score,
            build.score,
            freshness,
        );
        ScoredTrend {
            keyword: trend.keyword.clone(),
            score: to_score(composite),
            velocity: growth.velocity,
            volume: volume_signal.tier,
            buildability: build.tier,
            category: trend.category,
            raw: RawScores {
                regime: ScoringRegime::Metadata,
                growth_score: growth.score,
                volume_score: volume_signal.score,
                buildability_score: build.score,
                freshness_score: freshness,
                upstream_volume: Some(volume),
                upstream_growth_pct: Some(growth_pct),
            },
        }
    }

    fn score_series(&self, trend: &RawTrend, series: &[f64]) -> Option<ScoredTrend> {
        let recent = recent_interest(series);
        if recent < self.interest_floor {
            log::debug!(
                "skipping '{}': recent interest {recent:.1} below floor {}",
                trend.keyword,
                self.interest_floor
            );
            return None;
        }
        let lowered = trend.keyword.to_lowercase();
        if self.rules.matches_brand(&lowered) || self.rules.matches_generic(&lowered) {
            log::debug!("skipping '{}': brand or generic keyword", trend.keyword);
            return None;
        }
        let velocity = velocity_from_series(series);
        let volume_signal = volume_from_series(series);
        let build = self.rules.buildability(&trend.keyword);
        let freshness = freshness_from_series(series);
        let composite = self.series_weights.combine(
            velocity.score,
            volume_signal.score,
            build.score,
            freshness,
        );
        Some(ScoredTrend {
            keyword: trend.keyword.clone(),
            score: to_score(composite),
            velocity: velocity.velocity,
            volume: volume_signal.tier,
            buildability: build.tier,
            category: trend.category,
            raw: RawScores {
                regime: ScoringRegime::Series,
                growth_score: velocity.score,
                volume_score: volume_signal.score,
                buildability_score: build.score,
                freshness_score: freshness,
                upstream_volume: None,
                upstream_growth_pct: None,
            },
        })
    }
}

impl Default for TrendScorer {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the composite is rounded and clamped to 0..=100 before the cast"
)]
fn to_score(composite: f64) -> u8 {
    composite.round().clamp(0.0, 100.0) as u8
}

//! Weight tables combining the four sub-scores.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use trendscout_core::ScoringRegime;

use crate::WeightsError;

/// Allowed distance between the weight total and `1.0`.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Relative weighting of the four signals in the composite score.
///
/// In the series regime `growth` weights the velocity sub-score.
///
/// # Examples
/// ```
/// use trendscout_core::ScoringRegime;
/// use trendscout_scorer::ScoreWeights;
///
/// let weights = ScoreWeights::for_regime(ScoringRegime::Series);
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the growth or velocity sub-score.
    pub growth: f64,
    /// Weight of the volume sub-score.
    pub volume: f64,
    /// Weight of the buildability sub-score.
    pub buildability: f64,
    /// Weight of the freshness sub-score.
    pub freshness: f64,
}

impl ScoreWeights {
    /// Weights used when trends carry volume and growth metadata.
    pub const METADATA: Self = Self {
        growth: 0.35,
        volume: 0.20,
        buildability: 0.25,
        freshness: 0.20,
    };

    /// Weights used when trends carry a daily interest series.
    pub const SERIES: Self = Self {
        growth: 0.40,
        volume: 0.15,
        buildability: 0.25,
        freshness: 0.20,
    };

    /// Default table for `regime`.
    #[must_use]
    pub const fn for_regime(regime: ScoringRegime) -> Self {
        match regime {
            ScoringRegime::Metadata => Self::METADATA,
            ScoringRegime::Series => Self::SERIES,
        }
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when a weight is not finite, is negative, or
    /// the total differs from `1.0` by more than [`WEIGHT_TOLERANCE`].
    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums the weights and measures the distance from one"
    )]
    pub fn validate(self) -> Result<Self, WeightsError> {
        for (component, value) in self.components() {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { component });
            }
            if value < 0.0 {
                return Err(WeightsError::Negative { component, value });
            }
        }
        let total = self.growth + self.volume + self.buildability + self.freshness;
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(WeightsError::BadTotal { total });
        }
        Ok(self)
    }

    const fn components(self) -> [(&'static str, f64); 4] {
        [
            ("growth", self.growth),
            ("volume", self.volume),
            ("buildability", self.buildability),
            ("freshness", self.freshness),
        ]
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the composite score is a weighted sum"
    )]
    pub(crate) fn combine(self, growth: f64, volume: f64, buildability: f64, freshness: f64) -> f64 {
        self.growth * growth
            + self.volume * volume
            + self.buildability * buildability
            + self.freshness * freshness
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::METADATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScoringRegime::Metadata)]
    #[case(ScoringRegime::Series)]
    fn default_tables_are_valid(#[case] regime: ScoringRegime) {
        assert!(ScoreWeights::for_regime(regime).validate().is_ok());
    }

    #[rstest]
    fn rejects_totals_away_from_one() {
        let err = ScoreWeights {
            growth: 0.5,
            volume: 0.5,
            buildability: 0.5,
            freshness: 0.0,
        }
        .validate()
        .expect_err("total of 1.5 should be rejected");
        assert!(matches!(err, WeightsError::BadTotal { .. }));
    }

    #[rstest]
    fn rejects_negative_weights() {
        let err = ScoreWeights {
            growth: 1.2,
            volume: -0.2,
            buildability: 0.0,
            freshness: 0.0,
        }
        .validate()
        .expect_err("negative weight should be rejected");
        assert!(matches!(
            err,
            WeightsError::Negative {
                component: "volume",
                ..
            }
        ));
    }

    #[rstest]
    fn rejects_non_finite_weights() {
        let err = ScoreWeights {
            growth: f64::NAN,
            ..ScoreWeights::METADATA
        }
        .validate()
        .expect_err("NaN weight should be rejected");
        assert_eq!(err, WeightsError::NonFinite { component: "growth" });
    }

    #[rstest]
    fn deserialises_from_json() {
        let weights: ScoreWeights = serde_json::from_str(
            r#"{"growth":0.4,"volume":0.15,"buildability":0.25,"freshness":0.2}"#,
        )
        .expect("parse weights");
        assert_eq!(weights, ScoreWeights::SERIES);
    }
}

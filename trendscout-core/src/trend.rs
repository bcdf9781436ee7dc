//! Raw trend records produced by trend sources.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Which weight table and sub-scorer set a signal is scored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringRegime {
    /// Volume and growth percentage reported by the discovery source.
    #[default]
    Metadata,
    /// A daily interest series, most recent point last.
    Series,
}

impl ScoringRegime {
    /// Return the regime as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Series => "series",
        }
    }
}

impl std::fmt::Display for ScoringRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScoringRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metadata" => Ok(Self::Metadata),
            "series" => Ok(Self::Series),
            _ => Err(format!("unknown scoring regime '{s}'")),
        }
    }
}

/// Signal data attached to a trend.
///
/// On the wire the variant is inferred from the fields present: a record with
/// `volume` and `growth_pct` is metadata, one with `interest_series` is a
/// series record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendSignal {
    /// Search volume estimate and growth percentage.
    Metadata {
        /// Absolute search volume estimate.
        volume: u64,
        /// Reported growth in percent.
        growth_pct: f64,
    },
    /// Daily interest on a `0..=100` scale.
    Series {
        /// One point per day, most recent last.
        interest_series: Vec<f64>,
    },
}

impl TrendSignal {
    /// Regime this signal is scored with.
    #[must_use]
    pub const fn regime(&self) -> ScoringRegime {
        match self {
            Self::Metadata { .. } => ScoringRegime::Metadata,
            Self::Series { .. } => ScoringRegime::Series,
        }
    }
}

/// A trending keyword reported for one category.
///
/// # Examples
/// ```
/// use trendscout_core::{Category, RawTrend, ScoringRegime};
///
/// let trend = RawTrend::metadata("invoice generator tool", Category::Finance, 120_000, 300.0);
/// assert_eq!(trend.signal.regime(), ScoringRegime::Metadata);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrend {
    /// The search keyword as reported upstream.
    pub keyword: String,
    /// Category the keyword was discovered under.
    pub category: Category,
    /// Signal data used for scoring.
    #[serde(flatten)]
    pub signal: TrendSignal,
}

impl RawTrend {
    /// Build a metadata record.
    #[must_use]
    pub fn metadata(
        keyword: impl Into<String>,
        category: Category,
        volume: u64,
        growth_pct: f64,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            category,
            signal: TrendSignal::Metadata { volume, growth_pct },
        }
    }

    /// Build a series record.
    #[must_use]
    pub fn series(keyword: impl Into<String>, category: Category, interest_series: Vec<f64>) -> Self {
        Self {
            keyword: keyword.into(),
            category,
            signal: TrendSignal::Series { interest_series },
        }
    }

    /// Interest series carried by the record, if any.
    #[must_use]
    pub fn interest_series(&self) -> Option<&[f64]> {
        match &self.signal {
            TrendSignal::Series { interest_series } => Some(interest_series.as_slice()),
            TrendSignal::Metadata { .. } => None,
        }
    }
}

//! Scored trend records and their categorical labels.

use serde::{Deserialize, Serialize};

use crate::{Category, ScoringRegime};

/// Direction of recent change in interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    /// Interest is growing.
    Rising,
    /// Interest is roughly flat.
    Steady,
    /// Interest is falling away.
    Declining,
}

impl Velocity {
    /// Return the label as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Steady => "steady",
            Self::Declining => "declining",
        }
    }
}

impl std::fmt::Display for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-level label shared by the volume and buildability scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Upper bucket.
    High,
    /// Middle bucket.
    Medium,
    /// Lower bucket.
    Low,
}

impl Tier {
    /// Return the label as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrounded component scores kept for auditing a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScores {
    /// Weight table the composite was computed with.
    pub regime: ScoringRegime,
    /// Growth (metadata) or velocity (series) sub-score, `0..=100`.
    pub growth_score: f64,
    /// Volume sub-score, `0..=100`.
    pub volume_score: f64,
    /// Buildability sub-score, `0..=100`.
    pub buildability_score: f64,
    /// Freshness sub-score, `0..=100`.
    pub freshness_score: f64,
    /// Search volume reported upstream, for metadata records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_volume: Option<u64>,
    /// Growth percentage reported upstream, for metadata records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_growth_pct: Option<f64>,
}

/// The canonical output record for one trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrend {
    /// Keyword as reported upstream.
    pub keyword: String,
    /// Composite score in `0..=100`.
    pub score: u8,
    /// Direction of recent change.
    pub velocity: Velocity,
    /// Search volume bucket.
    pub volume: Tier,
    /// Shippability bucket.
    pub buildability: Tier,
    /// Category the keyword was discovered under.
    pub category: Category,
    /// Component scores before weighting and rounding.
    pub raw: RawScores,
}

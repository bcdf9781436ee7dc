//! Individual signal scorers.
//!
//! Each scorer maps one facet of a trend onto `0.0..=100.0` together with the
//! categorical label reported alongside the composite score.
#![forbid(unsafe_code)]

use trendscout_core::{Tier, Velocity};

/// Growth percentage mapped to a full score.
pub const GROWTH_CEILING_PCT: f64 = 1500.0;
/// Series points required before velocity is measured.
pub const VELOCITY_MIN_POINTS: usize = 14;
/// Days in each velocity window and in the recent-interest window.
pub const WINDOW_DAYS: usize = 7;
/// Freshness assumed when no usable series is available.
pub const DEFAULT_FRESHNESS: f64 = 85.0;
/// Freshness of an empty series.
pub const EMPTY_SERIES_FRESHNESS: f64 = 50.0;

const NEUTRAL_VELOCITY: f64 = 50.0;
const RISING_GROWTH_PCT: f64 = 200.0;
const STEADY_GROWTH_PCT: f64 = 50.0;
const RISING_DELTA_PCT: f64 = 20.0;
const DELTA_FLOOR_PCT: f64 = -100.0;
const DELTA_CEILING_PCT: f64 = 200.0;

/// Growth or velocity sub-score with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSignal {
    /// Sub-score in `0.0..=100.0`.
    pub score: f64,
    /// Direction of travel.
    pub velocity: Velocity,
}

/// Volume sub-score with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSignal {
    /// Sub-score in `0.0..=100.0`.
    pub score: f64,
    /// Volume tier.
    pub tier: Tier,
}

/// Map an upstream growth percentage onto `0.0..=100.0`.
///
/// The percentage is clamped to `0..=1500` and the result rounded to one
/// decimal place. The label is taken from the unclamped percentage.
///
/// # Examples
/// ```
/// use trendscout_core::Velocity;
/// use trendscout_scorer::growth_from_pct;
///
/// let growth = growth_from_pct(300.0);
/// assert!((growth.score - 20.0).abs() < f64::EPSILON);
/// assert_eq!(growth.velocity, Velocity::Rising);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "growth is rescaled onto the sub-score range"
)]
pub fn growth_from_pct(growth_pct: f64) -> GrowthSignal {
    let pct = if growth_pct.is_nan() { 0.0 } else { growth_pct };
    let clamped = pct.clamp(0.0, GROWTH_CEILING_PCT);
    let score = round_to_tenth(clamped / GROWTH_CEILING_PCT * 100.0);
    let velocity = if pct >= RISING_GROWTH_PCT {
        Velocity::Rising
    } else if pct >= STEADY_GROWTH_PCT {
        Velocity::Steady
    } else {
        Velocity::Declining
    };
    GrowthSignal { score, velocity }
}

/// Compare the last seven days of interest with the seven before.
///
/// Series shorter than fourteen points score a neutral `50.0`/steady.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "velocity is a percentage change between two window means"
)]
pub fn velocity_from_series(series: &[f64]) -> GrowthSignal {
    let neutral = GrowthSignal {
        score: NEUTRAL_VELOCITY,
        velocity: Velocity::Steady,
    };
    if series.len() < VELOCITY_MIN_POINTS {
        return neutral;
    }
    let split = series.len() - WINDOW_DAYS;
    let (Some(prior_window), Some(recent_window)) = (
        series.get(split - WINDOW_DAYS..split),
        series.get(split..),
    ) else {
        return neutral;
    };
    let recent = mean(recent_window);
    let prior = mean(prior_window);
    let delta_pct = if prior == 0.0 {
        if recent > 0.0 { DELTA_CEILING_PCT } else { 0.0 }
    } else {
        (recent - prior) / prior * 100.0
    };
    let clamped = delta_pct.clamp(DELTA_FLOOR_PCT, DELTA_CEILING_PCT);
    let velocity = if delta_pct > RISING_DELTA_PCT {
        Velocity::Rising
    } else if delta_pct < -RISING_DELTA_PCT {
        Velocity::Declining
    } else {
        Velocity::Steady
    };
    GrowthSignal {
        score: (clamped - DELTA_FLOOR_PCT) / 3.0,
        velocity,
    }
}

/// Bucket an upstream search-volume estimate.
#[must_use]
pub const fn volume_from_metadata(volume: u64) -> VolumeSignal {
    let (score, tier) = match volume {
        500_000.. => (100.0, Tier::High),
        100_000.. => (75.0, Tier::High),
        50_000.. => (60.0, Tier::Medium),
        10_000.. => (40.0, Tier::Medium),
        1_000.. => (20.0, Tier::Low),
        _ => (5.0, Tier::Low),
    };
    VolumeSignal { score, tier }
}

/// Score volume from the peak of a relative interest series.
#[must_use]
pub fn volume_from_series(series: &[f64]) -> VolumeSignal {
    let score = peak(series).map_or(0.0, |(_, value)| value.clamp(0.0, 100.0));
    let tier = if score >= 60.0 {
        Tier::High
    } else if score >= 30.0 {
        Tier::Medium
    } else {
        Tier::Low
    };
    VolumeSignal { score, tier }
}

/// Score how recently a series peaked.
///
/// The peak is the first occurrence of the maximum value. An empty series
/// scores `50.0`.
#[must_use]
pub fn freshness_from_series(series: &[f64]) -> f64 {
    let Some((peak_index, _)) = peak(series) else {
        return EMPTY_SERIES_FRESHNESS;
    };
    match series.len() - 1 - peak_index {
        0..=7 => 100.0,
        8..=14 => 65.0,
        15..=21 => 35.0,
        _ => 10.0,
    }
}

/// Mean of the last seven points, or of the whole series when shorter.
#[must_use]
pub fn recent_interest(series: &[f64]) -> f64 {
    let start = series.len().saturating_sub(WINDOW_DAYS);
    series.get(start..).map_or(0.0, mean)
}

/// Index and value of the first maximum, skipping NaN points.
fn peak(series: &[f64]) -> Option<(usize, f64)> {
    series
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, value)| !value.is_nan())
        .fold(None, |best, (index, value)| match best {
            Some((_, current)) if current >= value => best,
            _ => Some((index, value)),
        })
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "window means divide a small sum by its length"
)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding to one decimal scales by ten"
)]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

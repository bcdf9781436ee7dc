//! Shippability heuristic based on substring matches.

use crate::rules::{RuleSet, builtin_rules, contains_any};
use crate::Tier;

/// Score given to keywords matching a low-signal term.
pub const LOW_BUILDABILITY_SCORE: f64 = 20.0;
/// Score given to keywords with no signal either way.
pub const MEDIUM_BUILDABILITY_SCORE: f64 = 50.0;
/// Score given to keywords matching a high-signal term.
pub const HIGH_BUILDABILITY_SCORE: f64 = 80.0;

/// Buildability sub-score and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buildability {
    /// One of 20, 50 or 80.
    pub score: f64,
    /// Label matching the score.
    pub tier: Tier,
}

impl RuleSet {
    /// Estimate how quickly a solo developer could ship against `keyword`.
    ///
    /// Low-signal terms are checked first, so a keyword matching both lists
    /// is scored low.
    #[must_use]
    pub fn buildability(&self, keyword: &str) -> Buildability {
        let lowered = keyword.to_lowercase();
        if contains_any(&lowered, &self.low_buildability) {
            Buildability {
                score: LOW_BUILDABILITY_SCORE,
                tier: Tier::Low,
            }
        } else if contains_any(&lowered, &self.high_buildability) {
            Buildability {
                score: HIGH_BUILDABILITY_SCORE,
                tier: Tier::High,
            }
        } else {
            Buildability {
                score: MEDIUM_BUILDABILITY_SCORE,
                tier: Tier::Medium,
            }
        }
    }
}

/// Estimate buildability with the built-in rules.
///
/// # Examples
/// ```
/// use trendscout_core::{Tier, buildability};
///
/// assert_eq!(buildability("invoice generator tool").tier, Tier::High);
/// assert_eq!(buildability("stock tracker").tier, Tier::Low);
/// ```
#[must_use]
pub fn buildability(keyword: &str) -> Buildability {
    builtin_rules().buildability(keyword)
}

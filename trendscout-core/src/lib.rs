//! Core domain types for the Trendscout pipeline.
//!
//! The crate defines the records flowing through a run (raw trends in,
//! scored trends and daily snapshots out) together with the keyword rules
//! that decide which trends are worth scoring:
//! - [`RuleSet`] holds the versioned word lists, loaded from JSON or taken
//!   from the built-in defaults.
//! - [`RuleSet::classify`] is the noise filter; [`is_buildable`] applies it
//!   with the built-in rules.
//! - [`RuleSet::buildability`] maps a keyword to a low, medium or high
//!   shippability tier.
//!
//! Everything here is pure: no I/O, no shared mutable state.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod buildability;
mod category;
mod filter;
mod rules;
mod scored;
mod snapshot;
mod trend;

pub use buildability::{
    Buildability, HIGH_BUILDABILITY_SCORE, LOW_BUILDABILITY_SCORE, MEDIUM_BUILDABILITY_SCORE,
    buildability,
};
pub use category::Category;
pub use filter::{Rejection, is_buildable};
pub use rules::{
    DEFAULT_MAX_KEYWORD_CHARS, RULES_VERSION, RuleSet, RuleSetError, builtin_rules,
};
pub use scored::{RawScores, ScoredTrend, Tier, Velocity};
pub use snapshot::{DailySnapshot, sort_by_score};
pub use trend::{RawTrend, ScoringRegime, TrendSignal};

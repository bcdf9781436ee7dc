//! Behavioural coverage for the composite trend scorer.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use trendscout_core::{Category, RawTrend, ScoredTrend, Velocity};
use trendscout_scorer::TrendScorer;

/// Shared state for the scoring scenarios.
#[derive(Default)]
pub struct ScoringWorld {
    scorer: RefCell<Option<TrendScorer>>,
    result: RefCell<Option<Option<ScoredTrend>>>,
}

impl ScoringWorld {
    fn score(&self, trend: &RawTrend, enrichment: Option<&[f64]>) {
        let binding = self.scorer.borrow();
        let scorer = binding
            .as_ref()
            .unwrap_or_else(|| panic!("scorer must be configured"));
        *self.result.borrow_mut() = Some(scorer.score_trend(trend, enrichment));
    }

    fn scored(&self) -> ScoredTrend {
        self.result
            .borrow()
            .clone()
            .flatten()
            .unwrap_or_else(|| panic!("a scored trend should be recorded"))
    }
}

#[fixture]
/// Fresh scenario state.
pub fn world() -> ScoringWorld {
    ScoringWorld::default()
}

fn invoice_trend() -> RawTrend {
    RawTrend::metadata("invoice generator tool", Category::Finance, 120_000, 300.0)
}

#[given("the default trend scorer")]
fn default_scorer(world: &ScoringWorld) {
    *world.scorer.borrow_mut() = Some(TrendScorer::default());
}

#[when("I score an invoice generator trend with strong growth")]
fn score_invoice(world: &ScoringWorld) {
    world.score(&invoice_trend(), None);
}

#[when("I score an invoice generator trend with a month-old peak")]
fn score_invoice_stale(world: &ScoringWorld) {
    let mut series = vec![100.0];
    series.extend([10.0; 29]);
    world.score(&invoice_trend(), Some(&series));
}

#[when("I score a series trend whose recent interest is below the floor")]
fn score_quiet_series(world: &ScoringWorld) {
    let trend = RawTrend::series("habit tracker app", Category::Productivity, vec![3.0; 14]);
    world.score(&trend, None);
}

#[then("the composite score is 59")]
fn composite_59(world: &ScoringWorld) {
    assert_eq!(world.scored().score, 59);
}

#[then("the composite score is 44")]
fn composite_44(world: &ScoringWorld) {
    assert_eq!(world.scored().score, 44);
}

#[then("the velocity label is rising")]
fn rising(world: &ScoringWorld) {
    assert_eq!(world.scored().velocity, Velocity::Rising);
}

#[then("the freshness sub-score is 10")]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point values"
)]
fn freshness_10(world: &ScoringWorld) {
    let freshness = world.scored().raw.freshness_score;
    assert!((freshness - 10.0).abs() < f64::EPSILON, "got {freshness}");
}

#[then("no scored trend is produced")]
fn nothing_scored(world: &ScoringWorld) {
    assert_eq!(*world.result.borrow(), Some(None));
}

#[scenario(path = "tests/features/trend_scoring.feature", index = 0)]
fn metadata_trend_scores(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trend_scoring.feature", index = 1)]
fn stale_enrichment_lowers_freshness(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trend_scoring.feature", index = 2)]
fn quiet_series_is_skipped(world: ScoringWorld) {
    let _ = world;
}

//! One category's fetch, filter, score and enrich steps.

use std::collections::BTreeMap;
use std::sync::Arc;

use trendscout_core::{Category, RawTrend, Rejection, ScoredTrend, ScoringRegime};
use trendscout_data::source::TrendSource;
use trendscout_scorer::TrendScorer;

use crate::{CategoryError, CategoryStage, PipelineConfig, StageTracker};

/// Counts of records removed before scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Records in the other regime's shape.
    pub wrong_regime: usize,
    /// Records reported under a different category.
    pub wrong_category: usize,
    /// Records rejected by the noise filter, by reason.
    pub rejected: BTreeMap<Rejection, usize>,
}

impl FilterReport {
    /// Total records removed.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.wrong_regime + self.wrong_category + self.rejected.values().sum::<usize>()
    }

    fn describe_rejections(&self) -> String {
        self.rejected
            .iter()
            .map(|(reason, count)| format!("{reason}={count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Drop records the run cannot score and return the rest with a report.
///
/// Records must be in the run's regime, belong to `category` and survive the
/// noise filter.
#[must_use]
pub fn filter_trends(
    scorer: &TrendScorer,
    regime: ScoringRegime,
    category: Category,
    trends: Vec<RawTrend>,
) -> (Vec<RawTrend>, FilterReport) {
    let mut report = FilterReport::default();
    let kept = trends
        .into_iter()
        .filter(|trend| {
            if trend.signal.regime() != regime {
                report.wrong_regime += 1;
                return false;
            }
            if trend.category != category {
                report.wrong_category += 1;
                return false;
            }
            match scorer.rules().classify(&trend.keyword) {
                Ok(()) => true,
                Err(reason) => {
                    log::debug!("{category}: dropping '{}' ({reason})", trend.keyword);
                    *report.rejected.entry(reason).or_default() += 1;
                    false
                }
            }
        })
        .collect();
    (kept, report)
}

/// Score `trends` and keep the `top_n` best, highest first.
///
/// Equal scores keep discovery order.
#[must_use]
pub fn rank_trends(
    scorer: &TrendScorer,
    trends: Vec<RawTrend>,
    top_n: usize,
) -> Vec<(RawTrend, ScoredTrend)> {
    let mut ranked: Vec<(RawTrend, ScoredTrend)> = trends
        .into_iter()
        .filter_map(|trend| {
            let scored = scorer.score_trend(&trend, None)?;
            Some((trend, scored))
        })
        .collect();
    ranked.sort_by(|left, right| right.1.score.cmp(&left.1.score));
    ranked.truncate(top_n);
    ranked
}

/// Everything one category's task needs, owned.
pub(crate) struct CategoryUnit {
    pub(crate) category: Category,
    pub(crate) source: Arc<dyn TrendSource>,
    pub(crate) scorer: TrendScorer,
    pub(crate) config: PipelineConfig,
    pub(crate) tracker: StageTracker,
}

impl CategoryUnit {
    /// Run the category up to, but not including, persistence.
    pub(crate) async fn run(self) -> Result<Vec<ScoredTrend>, CategoryError> {
        let Self {
            category,
            source,
            scorer,
            config,
            tracker,
        } = self;

        tracker.advance(CategoryStage::Fetching);
        let discovered = source
            .discover(category)
            .await
            .map_err(|err| CategoryError::Source {
                category,
                source: err,
            })?;
        if discovered.is_empty() {
            log::info!("{category}: no trends discovered");
            return Ok(Vec::new());
        }
        let found = discovered.len();

        tracker.advance(CategoryStage::Filtering);
        let (kept, report) = filter_trends(&scorer, config.regime, category, discovered);
        if report.wrong_regime > 0 {
            log::warn!(
                "{category}: dropped {} records not in the {} regime",
                report.wrong_regime,
                config.regime
            );
        }
        if report.wrong_category > 0 {
            log::warn!(
                "{category}: dropped {} records reported under another category",
                report.wrong_category
            );
        }
        log::info!(
            "{category}: {} of {found} trends passed the noise filter [{}]",
            kept.len(),
            report.describe_rejections()
        );
        if kept.is_empty() {
            return Ok(Vec::new());
        }

        tracker.advance(CategoryStage::Scoring);
        let ranked = rank_trends(&scorer, kept, config.top_n);
        if ranked.is_empty() {
            log::info!("{category}: no trends cleared the interest floor");
            return Ok(Vec::new());
        }

        if !config.enriches() {
            return Ok(ranked.into_iter().map(|(_, scored)| scored).collect());
        }
        tracker.advance(CategoryStage::Enriching);
        Ok(enrich(source.as_ref(), &scorer, category, ranked).await)
    }
}

/// Re-score kept trends with interest series and re-sort.
///
/// A failed lookup keeps the first-pass scores, as does a keyword with no
/// series.
async fn enrich(
    source: &dyn TrendSource,
    scorer: &TrendScorer,
    category: Category,
    ranked: Vec<(RawTrend, ScoredTrend)>,
) -> Vec<ScoredTrend> {
    let keywords: Vec<String> = ranked.iter().map(|(raw, _)| raw.keyword.clone()).collect();
    let series = match source.interest(&keywords).await {
        Ok(series) => series,
        Err(err) => {
            log::warn!("{category}: interest lookup failed, keeping first-pass scores: {err}");
            return ranked.into_iter().map(|(_, scored)| scored).collect();
        }
    };
    log::debug!(
        "{category}: enriching {} of {} trends",
        series.len(),
        keywords.len()
    );
    let mut rescored: Vec<ScoredTrend> = ranked
        .into_iter()
        .map(|(raw, first)| {
            series
                .get(&raw.keyword)
                .and_then(|points| scorer.score_trend(&raw, Some(points)))
                .unwrap_or(first)
        })
        .collect();
    trendscout_core::sort_by_score(&mut rescored);
    rescored
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use trendscout_data::test_support::StubTrendSource;

    #[fixture]
    fn scorer() -> TrendScorer {
        TrendScorer::default()
    }

    fn unit(source: StubTrendSource, config: PipelineConfig) -> CategoryUnit {
        CategoryUnit {
            category: Category::Finance,
            source: Arc::new(source),
            scorer: TrendScorer::default(),
            config,
            tracker: StageTracker::new(),
        }
    }

    #[rstest]
    fn filter_drops_wrong_regime_category_and_noise(scorer: TrendScorer) {
        let trends = vec![
            RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0),
            RawTrend::series("budget tracker app", Category::Finance, vec![40.0; 14]),
            RawTrend::metadata("habit tracker", Category::Productivity, 20_000, 250.0),
            RawTrend::metadata("ChatGPT prompt helper", Category::Finance, 20_000, 250.0),
            RawTrend::metadata("jane doe", Category::Finance, 20_000, 250.0),
        ];
        let (kept, report) =
            filter_trends(&scorer, ScoringRegime::Metadata, Category::Finance, trends);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].keyword, "receipt scanner");
        assert_eq!(report.wrong_regime, 1);
        assert_eq!(report.wrong_category, 1);
        assert_eq!(report.rejected.get(&Rejection::Brand), Some(&1));
        assert_eq!(report.rejected.get(&Rejection::PersonName), Some(&1));
        assert_eq!(report.dropped(), 4);
    }

    #[rstest]
    fn metadata_brand_keywords_never_reach_scoring(scorer: TrendScorer) {
        let branded = RawTrend::metadata(
            "notion template tracker",
            Category::Productivity,
            20_000,
            250.0,
        );
        assert!(scorer.score_trend(&branded, None).is_some());

        let (kept, report) = filter_trends(
            &scorer,
            ScoringRegime::Metadata,
            Category::Productivity,
            vec![branded],
        );
        assert!(kept.is_empty());
        assert_eq!(report.rejected.get(&Rejection::Brand), Some(&1));
        assert!(rank_trends(&scorer, kept, 15).is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn metadata_brand_keywords_are_dropped_by_the_unit() {
        let source = StubTrendSource::new().with_trends(
            Category::Finance,
            vec![
                RawTrend::metadata("paypal invoice tool", Category::Finance, 90_000, 300.0),
                RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0),
            ],
        );
        let scored = unit(source, PipelineConfig::default().with_enrichment(false))
            .run()
            .await
            .expect("unit succeeds");

        let keywords: Vec<&str> = scored.iter().map(|trend| trend.keyword.as_str()).collect();
        assert_eq!(keywords, ["receipt scanner"]);
    }

    #[rstest]
    fn ranking_keeps_top_n_in_score_order(scorer: TrendScorer) {
        let trends = vec![
            RawTrend::metadata("receipt scanner", Category::Finance, 500, 10.0),
            RawTrend::metadata("invoice generator tool", Category::Finance, 120_000, 300.0),
            RawTrend::metadata("budget tracker app", Category::Finance, 20_000, 120.0),
        ];
        let ranked = rank_trends(&scorer, trends, 2);

        let keywords: Vec<&str> = ranked.iter().map(|(raw, _)| raw.keyword.as_str()).collect();
        assert_eq!(keywords, ["invoice generator tool", "budget tracker app"]);
        assert!(ranked[0].1.score >= ranked[1].1.score);
    }

    #[rstest]
    fn ranking_skips_series_below_the_floor(scorer: TrendScorer) {
        let trends = vec![
            RawTrend::series("quiet tracker", Category::Finance, vec![5.0; 14]),
            RawTrend::series("loud tracker app", Category::Finance, vec![60.0; 14]),
        ];
        let ranked = rank_trends(&scorer, trends, 15);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].1.keyword, "loud tracker app");
    }

    #[rstest]
    #[tokio::test]
    async fn enrichment_rescoring_uses_series_freshness() {
        let trend = RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0);
        let mut stale = vec![80.0; 7];
        stale.extend([10.0; 7]);
        let source = StubTrendSource::new()
            .with_trends(Category::Finance, vec![trend.clone()])
            .with_series("receipt scanner", stale.clone());
        let unit = unit(source.clone(), PipelineConfig::default());

        let scored = unit.run().await.expect("unit succeeds");

        let expected = TrendScorer::default()
            .score_trend(&trend, Some(&stale))
            .expect("metadata trends always score");
        assert_eq!(scored, vec![expected]);
        assert_eq!(source.interest_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    #[expect(clippy::float_arithmetic, reason = "compare freshness")]
    async fn disabled_enrichment_skips_interest_lookups() {
        let trend = RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0);
        let source = StubTrendSource::new()
            .with_trends(Category::Finance, vec![trend])
            .with_series("receipt scanner", vec![10.0; 14]);
        let unit = unit(source.clone(), PipelineConfig::default().with_enrichment(false));

        let scored = unit.run().await.expect("unit succeeds");

        assert_eq!(scored.len(), 1);
        assert!((scored[0].raw.freshness_score - 85.0).abs() < f64::EPSILON);
        assert_eq!(source.interest_calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn source_errors_name_the_category() {
        let source = StubTrendSource::new().failing(Category::Finance, "rate limited");
        let err = unit(source, PipelineConfig::default())
            .run()
            .await
            .expect_err("discovery fails");
        assert!(matches!(
            err,
            CategoryError::Source {
                category: Category::Finance,
                ..
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn tracker_reports_last_stage_reached() {
        let trend = RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0);
        let source = StubTrendSource::new().with_trends(Category::Finance, vec![trend]);
        let unit = unit(source, PipelineConfig::default());
        let tracker = unit.tracker.clone();

        unit.run().await.expect("unit succeeds");
        assert_eq!(tracker.current(), CategoryStage::Enriching);
    }
}

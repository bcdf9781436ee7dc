//! `run` command: one daily pass over the tracked categories.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use trendscout_core::{Category, RuleSet, ScoringRegime};
use trendscout_data::SnapshotStore;
use trendscout_data::source::{
    DEFAULT_REQUEST_TIMEOUT, FileTrendSource, HttpTrendSource, HttpTrendSourceConfig, TrendSource,
};
use trendscout_pipeline::{
    DEFAULT_CATEGORY_TIMEOUT, DEFAULT_TOP_N, Orchestrator, PipelineConfig, RunReport,
    write_summary,
};
use trendscout_scorer::TrendScorer;

use crate::{
    ARG_CATEGORIES, ARG_CATEGORY_TIMEOUT, ARG_DATE, ARG_NO_SERIES, ARG_OUTPUT_DIR, ARG_REGIME,
    ARG_REQUEST_TIMEOUT, ARG_RULES, ARG_SOURCE_DIR, ARG_SOURCE_URL, ARG_TOP, CliError,
    ENV_SOURCE_URL,
};

/// Output directory used when none is configured.
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "output";

/// CLI arguments for the `run` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Discover trending keywords per category, drop noise, score \
                 the rest and merge the ranked results into today's snapshot. \
                 Values can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Run the daily trend pipeline"
)]
#[ortho_config(prefix = "TRENDSCOUT")]
pub(crate) struct RunArgs {
    /// Comma-separated categories to process (default: all).
    #[arg(long = ARG_CATEGORIES, value_name = "list")]
    #[serde(default)]
    pub(crate) categories: Option<String>,
    /// Base URL of the trends bridge.
    #[arg(long = ARG_SOURCE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) source_url: Option<String>,
    /// Directory holding `{category}.json` trend fixtures.
    #[arg(long = ARG_SOURCE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) source_dir: Option<Utf8PathBuf>,
    /// Directory receiving the daily snapshot files.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// JSON rule document replacing the built-in keyword rules.
    #[arg(long = ARG_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) rules: Option<Utf8PathBuf>,
    /// Scoring regime (`metadata` or `series`).
    #[arg(long = ARG_REGIME, value_name = "regime")]
    #[serde(default)]
    pub(crate) regime: Option<ScoringRegime>,
    /// Trends kept per category.
    #[arg(long = ARG_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
    /// Skip re-scoring kept trends with interest series.
    #[arg(long = ARG_NO_SERIES)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) no_series: bool,
    /// Wall-clock budget per category, in seconds.
    #[arg(long = ARG_CATEGORY_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) category_timeout_secs: Option<u64>,
    /// Budget for a single request to the trends bridge, in seconds.
    #[arg(long = ARG_REQUEST_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) request_timeout_secs: Option<u64>,
    /// Snapshot day (default: today, local time).
    #[arg(long = ARG_DATE, value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

impl RunArgs {
    pub(crate) fn into_config(self) -> Result<RunConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RunConfig::try_from(merged)
    }
}

/// Where raw trends come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceSpec {
    /// Live trends bridge.
    Http {
        base_url: String,
        request_timeout: Duration,
    },
    /// Pre-recorded trend files.
    Directory(Utf8PathBuf),
}

impl SourceSpec {
    /// Bridges only serve interest series; recorded files carry metadata.
    const fn default_regime(&self) -> ScoringRegime {
        match self {
            Self::Http { .. } => ScoringRegime::Series,
            Self::Directory(_) => ScoringRegime::Metadata,
        }
    }
}

/// Resolved `run` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) categories: Vec<Category>,
    pub(crate) source: SourceSpec,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) rules: Option<Utf8PathBuf>,
    pub(crate) pipeline: PipelineConfig,
    pub(crate) date: NaiveDate,
}

impl TryFrom<RunArgs> for RunConfig {
    type Error = CliError;

    fn try_from(args: RunArgs) -> Result<Self, Self::Error> {
        let request_timeout = match args.request_timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidSetting {
                    field: ARG_REQUEST_TIMEOUT,
                    reason: "must be at least one second",
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_REQUEST_TIMEOUT,
        };
        let source = match (args.source_url, args.source_dir) {
            (Some(base_url), None) => SourceSpec::Http {
                base_url,
                request_timeout,
            },
            (None, Some(dir)) => SourceSpec::Directory(dir),
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingSources {
                    url_flag: ARG_SOURCE_URL,
                    dir_flag: ARG_SOURCE_DIR,
                });
            }
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_SOURCE_URL,
                    env: ENV_SOURCE_URL,
                });
            }
        };
        let categories = match args.categories.as_deref() {
            Some(list) => parse_categories(list)?,
            None => Category::ALL.to_vec(),
        };
        let pipeline = PipelineConfig::default()
            .with_regime(args.regime.unwrap_or_else(|| source.default_regime()))
            .with_top_n(args.top.unwrap_or(DEFAULT_TOP_N))
            .with_enrichment(!args.no_series)
            .with_category_timeout(
                args.category_timeout_secs
                    .map_or(DEFAULT_CATEGORY_TIMEOUT, Duration::from_secs),
            )
            .validate()?;

        Ok(Self {
            categories,
            source,
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            rules: args.rules,
            pipeline,
            date: args
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        })
    }
}

/// Parse a comma-separated category list, dropping blanks and repeats.
pub(crate) fn parse_categories(list: &str) -> Result<Vec<Category>, CliError> {
    let mut categories = Vec::new();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let category: Category = name.parse().map_err(CliError::UnknownCategory)?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    if categories.is_empty() {
        return Err(CliError::InvalidSetting {
            field: ARG_CATEGORIES,
            reason: "names no categories",
        });
    }
    Ok(categories)
}

/// Load the rule document at `path`, or the built-in rules.
pub(crate) fn load_rules(path: Option<&Utf8Path>) -> Result<RuleSet, CliError> {
    let Some(path) = path else {
        return Ok(RuleSet::builtin());
    };
    let read_error = |source| CliError::ReadRules {
        path: path.to_path_buf(),
        source,
    };
    if !trendscout_fs::file_is_file(path).map_err(read_error)? {
        return Err(CliError::RulesNotFile {
            path: path.to_path_buf(),
        });
    }
    let json = trendscout_fs::read_utf8_file(path).map_err(read_error)?;
    let rules = RuleSet::from_json_str(&json).map_err(|source| CliError::InvalidRules {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded keyword rules from {path}");
    Ok(rules)
}

/// Builds the trend source for a run.
pub(crate) trait SourceBuilder {
    fn build(&self, source: &SourceSpec) -> Result<Arc<dyn TrendSource>, CliError>;
}

pub(crate) struct DefaultSourceBuilder;

impl SourceBuilder for DefaultSourceBuilder {
    fn build(&self, source: &SourceSpec) -> Result<Arc<dyn TrendSource>, CliError> {
        match source {
            SourceSpec::Http {
                base_url,
                request_timeout,
            } => {
                let config =
                    HttpTrendSourceConfig::new(base_url.clone()).with_timeout(*request_timeout);
                Ok(Arc::new(HttpTrendSource::with_config(config)?))
            }
            SourceSpec::Directory(dir) => Ok(Arc::new(FileTrendSource::new(dir.clone())?)),
        }
    }
}

pub(crate) fn run_daily(args: RunArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let mut stdout = std::io::stdout().lock();
    runtime
        .block_on(run_with(&config, &DefaultSourceBuilder, &mut stdout))
        .map(drop)
}

/// Execute a resolved run and write the summary to `writer`.
pub(crate) async fn run_with(
    config: &RunConfig,
    builder: &dyn SourceBuilder,
    writer: &mut dyn Write,
) -> Result<RunReport, CliError> {
    let rules = load_rules(config.rules.as_deref())?;
    let source = builder.build(&config.source)?;
    let orchestrator = Orchestrator::new(
        source,
        TrendScorer::new(rules),
        SnapshotStore::new(config.output_dir.clone()),
        config.pipeline,
    )?;
    let report = orchestrator.run(&config.categories, config.date).await?;
    write_summary(&report, writer).map_err(CliError::WriteSummary)?;
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RunConfig, CliError> {
    let merged = RunArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RunConfig::try_from(merged)
}

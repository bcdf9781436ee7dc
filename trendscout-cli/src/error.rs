//! Error types emitted by the Trendscout CLI.
//!
//! Category failures never reach this type: the pipeline reports them in
//! its run summary. Everything here ends the process with a non-zero
//! status.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use trendscout_core::RuleSetError;
use trendscout_data::source::SourceError;
use trendscout_pipeline::PipelineError;

/// Errors emitted by the Trendscout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Both trend sources were configured.
    #[error("--{url_flag} and --{dir_flag} are mutually exclusive")]
    ConflictingSources {
        url_flag: &'static str,
        dir_flag: &'static str,
    },
    /// A category name did not match any tracked category.
    #[error("{0}")]
    UnknownCategory(String),
    /// A numeric option was out of range.
    #[error("invalid --{field}: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },
    /// The rule file could not be read.
    #[error("failed to read rules at {path:?}: {source}")]
    ReadRules {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The rule path exists but is not a regular file.
    #[error("rules path {path:?} is not a file")]
    RulesNotFile { path: Utf8PathBuf },
    /// The rule file was not a valid rule document.
    #[error("invalid rules in {path:?}: {source}")]
    InvalidRules {
        path: Utf8PathBuf,
        #[source]
        source: RuleSetError,
    },
    /// The trend source could not be constructed.
    #[error("failed to set up the trend source: {0}")]
    Source(#[from] SourceError),
    /// The run could not be completed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// The async runtime could not be started.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Writing the run summary failed.
    #[error("failed to write run summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}

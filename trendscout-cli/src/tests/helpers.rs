//! Test helpers for building trend fixture directories and stub sources.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use tempfile::TempDir;
use trendscout_core::{Category, RawTrend};
use trendscout_data::source::TrendSource;
use trendscout_data::test_support::StubTrendSource;

use crate::CliError;
use crate::run::{SourceBuilder, SourceSpec};

pub(super) fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &str) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Temporary workspace with a trend fixture directory and an output
/// directory.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        std::fs::create_dir(root.join("trends")).expect("create trends dir");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn trends_dir(&self) -> Utf8PathBuf {
        self.root.join("trends")
    }

    pub(super) fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("output")
    }

    pub(super) fn write_category(&self, category: Category, trends: &[RawTrend]) {
        let json = serde_json::to_string(trends).expect("serialise trends");
        write_utf8(&self.trends_dir().join(format!("{category}.json")), &json);
    }
}

pub(super) fn finance_trends() -> Vec<RawTrend> {
    vec![
        RawTrend::metadata("invoice generator tool", Category::Finance, 120_000, 300.0),
        RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0),
        RawTrend::metadata("Netflix price hike", Category::Finance, 900_000, 800.0),
    ]
}

/// Hands out a shared [`StubTrendSource`] regardless of the configured source.
pub(super) struct StubBuilder(pub(super) StubTrendSource);

impl SourceBuilder for StubBuilder {
    fn build(&self, _source: &SourceSpec) -> Result<Arc<dyn TrendSource>, CliError> {
        Ok(Arc::new(self.0.clone()))
    }
}

//! Trend source replaying records exported to a directory.
//!
//! Layout:
//! - `{dir}/{category}.json` holds a JSON array of raw trends. A missing file
//!   means the category had nothing to report.
//! - `{dir}/interest.json` maps keywords to daily interest series.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use trendscout_core::{Category, RawTrend};
use trendscout_fs::{dir_exists, read_optional};

use super::{InterestMap, SourceError, TrendSource};

/// File holding interest series inside a source directory.
pub const INTEREST_FILE_NAME: &str = "interest.json";

/// Trend source reading JSON exports from a directory.
///
/// # Examples
///
/// ```no_run
/// use trendscout_core::Category;
/// use trendscout_data::source::{FileTrendSource, TrendSource};
///
/// # async fn demo() -> Result<(), trendscout_data::source::SourceError> {
/// let source = FileTrendSource::new("exports/2026-10-19")?;
/// let trends = source.discover(Category::Health).await?;
/// # let _ = trends;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileTrendSource {
    dir: Utf8PathBuf,
}

impl FileTrendSource {
    /// Create a source reading from `dir`.
    ///
    /// # Errors
    /// Returns [`SourceError::MissingDirectory`] when `dir` is not an existing
    /// directory.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Result<Self, SourceError> {
        let dir = dir.into();
        let exists = dir_exists(&dir).map_err(|source| SourceError::Read {
            path: dir.clone(),
            source,
        })?;
        if !exists {
            return Err(SourceError::MissingDirectory { path: dir });
        }
        Ok(Self { dir })
    }

    /// Directory the source reads from.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of the export for `category`.
    #[must_use]
    pub fn category_path(&self, category: Category) -> Utf8PathBuf {
        self.dir.join(format!("{category}.json"))
    }

    /// Path of the interest series export.
    #[must_use]
    pub fn interest_path(&self) -> Utf8PathBuf {
        self.dir.join(INTEREST_FILE_NAME)
    }
}

#[async_trait]
impl TrendSource for FileTrendSource {
    fn describe(&self) -> String {
        format!("directory {}", self.dir)
    }

    async fn discover(&self, category: Category) -> Result<Vec<RawTrend>, SourceError> {
        let path = self.category_path(category);
        let Some(trends) = load_json::<Vec<RawTrend>>(path.clone()).await? else {
            log::info!("no export for {category} at {path}");
            return Ok(Vec::new());
        };
        if let Some(stray) = trends.iter().find(|trend| trend.category != category) {
            return Err(SourceError::CategoryMismatch {
                path,
                keyword: stray.keyword.clone(),
                expected: category,
                found: stray.category,
            });
        }
        Ok(trends)
    }

    async fn interest(&self, keywords: &[String]) -> Result<InterestMap, SourceError> {
        let Some(mut all) = load_json::<InterestMap>(self.interest_path()).await? else {
            return Ok(InterestMap::new());
        };
        all.retain(|keyword, points| !points.is_empty() && keywords.contains(keyword));
        Ok(all)
    }
}

/// Read and parse a JSON file off the async executor.
async fn load_json<T>(path: Utf8PathBuf) -> Result<Option<T>, SourceError>
where
    T: DeserializeOwned + Send + 'static,
{
    let label = path.clone();
    tokio::task::spawn_blocking(move || {
        let Some(contents) = read_optional(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?
        else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| SourceError::Parse { path, source })
    })
    .await
    .unwrap_or_else(|err| {
        Err(SourceError::Read {
            path: label,
            source: io::Error::other(err),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn export_dir() -> (TempDir, FileTrendSource) {
        let temp = TempDir::new().expect("tempdir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 temp dir");
        let source = FileTrendSource::new(dir).expect("source should open");
        (temp, source)
    }

    fn write(source: &FileTrendSource, name: &str, contents: &str) {
        std::fs::write(source.dir().join(name).as_std_path(), contents).expect("write fixture");
    }

    #[rstest]
    #[tokio::test]
    async fn reads_category_exports(export_dir: (TempDir, FileTrendSource)) {
        let (_temp, source) = export_dir;
        write(
            &source,
            "finance.json",
            r#"[{"keyword":"receipt scanner","category":"finance","volume":20000,"growth_pct":250.0}]"#,
        );

        let trends = source.discover(Category::Finance).await.expect("discover");

        assert_eq!(
            trends,
            vec![RawTrend::metadata("receipt scanner", Category::Finance, 20_000, 250.0)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_export_is_empty(export_dir: (TempDir, FileTrendSource)) {
        let (_temp, source) = export_dir;
        let trends = source.discover(Category::Health).await.expect("discover");
        assert!(trends.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_export_is_an_error(export_dir: (TempDir, FileTrendSource)) {
        let (_temp, source) = export_dir;
        write(&source, "health.json", "[{");
        let err = source
            .discover(Category::Health)
            .await
            .expect_err("malformed JSON should fail");
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn records_from_other_categories_are_refused(export_dir: (TempDir, FileTrendSource)) {
        let (_temp, source) = export_dir;
        write(
            &source,
            "health.json",
            r#"[{"keyword":"sleep tracker app","category":"finance","interest_series":[1.0]}]"#,
        );
        let err = source
            .discover(Category::Health)
            .await
            .expect_err("mismatched category should fail");
        assert!(matches!(
            err,
            SourceError::CategoryMismatch {
                found: Category::Finance,
                ..
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn interest_is_limited_to_requested_keywords(export_dir: (TempDir, FileTrendSource)) {
        let (_temp, source) = export_dir;
        write(
            &source,
            INTEREST_FILE_NAME,
            r#"{"receipt scanner":[1.0,2.0],"habit tracker":[3.0],"empty":[]}"#,
        );

        let series = source
            .interest(&["receipt scanner".to_owned(), "empty".to_owned()])
            .await
            .expect("interest");

        assert_eq!(series.len(), 1);
        assert_eq!(series.get("receipt scanner"), Some(&vec![1.0, 2.0]));
    }

    #[rstest]
    fn missing_directory_is_rejected() {
        let err = FileTrendSource::new("/definitely/not/here").expect_err("should fail");
        assert!(matches!(err, SourceError::MissingDirectory { .. }));
    }
}

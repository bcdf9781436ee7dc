//! Read-merge-write persistence of daily snapshots.
//!
//! One file per calendar day lives under the output directory, named
//! `trends_{YYYY-MM-DD}.json`. The first write of the day creates it; later
//! writes read it back, append and re-sort. A file that cannot be parsed is
//! never overwritten.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use thiserror::Error;
use trendscout_core::{DailySnapshot, ScoredTrend};
use trendscout_fs::{read_optional, write_replacing};

/// Errors raised while reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading the existing snapshot failed.
    #[error("failed to read snapshot {path}")]
    Read {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// The existing snapshot is not valid snapshot JSON.
    #[error("snapshot {path} is corrupt; refusing to overwrite it")]
    Corrupt {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The existing snapshot belongs to another day.
    #[error("snapshot {path} is dated {found}, expected {expected}")]
    DateMismatch {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Day the file name refers to.
        expected: NaiveDate,
        /// Day recorded inside the file.
        found: NaiveDate,
    },
    /// Serialising the merged snapshot failed.
    #[error("failed to serialise snapshot for {path}")]
    Serialise {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the merged snapshot failed.
    #[error("failed to write snapshot {path}")]
    Write {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
}

/// Daily snapshot files under one output directory.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use trendscout_data::SnapshotStore;
///
/// let store = SnapshotStore::new("output");
/// let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
/// assert_eq!(store.path_for(date).as_str(), "output/trends_2026-10-19.json");
/// let existing = store.load(date)?;
/// # let _ = existing;
/// # Ok::<(), trendscout_data::SnapshotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    output_dir: Utf8PathBuf,
}

impl SnapshotStore {
    /// Create a store writing under `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    /// Path of the snapshot for `date`.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> Utf8PathBuf {
        self.output_dir.join(DailySnapshot::file_name(date))
    }

    /// Load the snapshot for `date`, if one has been written.
    ///
    /// # Errors
    /// Returns [`SnapshotError::Corrupt`] or [`SnapshotError::DateMismatch`]
    /// when the file exists but cannot be trusted, and
    /// [`SnapshotError::Read`] on I/O failures.
    pub fn load(&self, date: NaiveDate) -> Result<Option<DailySnapshot>, SnapshotError> {
        let path = self.path_for(date);
        let Some(contents) = read_optional(&path).map_err(|source| SnapshotError::Read {
            path: path.clone(),
            source,
        })?
        else {
            return Ok(None);
        };
        let snapshot: DailySnapshot =
            serde_json::from_str(&contents).map_err(|source| SnapshotError::Corrupt {
                path: path.clone(),
                source,
            })?;
        if snapshot.date != date {
            return Err(SnapshotError::DateMismatch {
                path,
                expected: date,
                found: snapshot.date,
            });
        }
        Ok(Some(snapshot))
    }

    /// Merge `trends` into the snapshot for `date` and write it back.
    ///
    /// Returns the snapshot as written. Merging nothing leaves the file
    /// untouched.
    ///
    /// # Errors
    /// Propagates [`SnapshotStore::load`] failures and reports serialisation
    /// or write failures. The existing file is left as it was on error.
    pub fn merge(
        &self,
        date: NaiveDate,
        trends: Vec<ScoredTrend>,
    ) -> Result<DailySnapshot, SnapshotError> {
        let mut snapshot = self
            .load(date)?
            .unwrap_or_else(|| DailySnapshot::new(date));
        if trends.is_empty() {
            return Ok(snapshot);
        }
        let added = trends.len();
        snapshot.merge(trends);

        let path = self.path_for(date);
        let rendered =
            serde_json::to_string_pretty(&snapshot).map_err(|source| SnapshotError::Serialise {
                path: path.clone(),
                source,
            })?;
        write_replacing(&path, &rendered).map_err(|source| SnapshotError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!(
            "wrote {added} trends to {path} ({} total)",
            snapshot.trends.len()
        );
        Ok(snapshot)
    }
}

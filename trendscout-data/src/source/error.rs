//! Error types raised by trend sources.

use std::io;
use std::time::Duration;

use camino::Utf8PathBuf;

use thiserror::Error;
use trendscout_core::Category;

/// Errors raised while constructing or querying a trend source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The configured base URL could not be parsed.
    #[error("invalid source URL '{url}'")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Source error from `url`.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Source error from `reqwest`.
        #[source]
        source: reqwest::Error,
    },
    /// A request did not complete within its budget.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Request URL.
        url: String,
        /// Budget that was exceeded.
        timeout: Duration,
    },
    /// The service answered with an error status.
    #[error("request to {url} failed with status {status}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}")]
    Decode {
        /// Request URL.
        url: String,
        /// Source error from `reqwest`.
        #[source]
        source: reqwest::Error,
    },
    /// A source directory is missing or is not a directory.
    #[error("source directory {path} does not exist")]
    MissingDirectory {
        /// Configured directory.
        path: Utf8PathBuf,
    },
    /// Reading a source file failed.
    #[error("failed to read {path}")]
    Read {
        /// File path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// A source file did not contain the expected JSON.
    #[error("failed to parse {path}")]
    Parse {
        /// File path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A record listed under one category claimed another.
    #[error("{path} lists '{keyword}' under {found}, expected {expected}")]
    CategoryMismatch {
        /// File path.
        path: Utf8PathBuf,
        /// Offending keyword.
        keyword: String,
        /// Category the file belongs to.
        expected: Category,
        /// Category the record declared.
        found: Category,
    },
    /// The source refused to serve a category.
    #[error("source unavailable for {category}: {message}")]
    Unavailable {
        /// Affected category.
        category: Category,
        /// Reason reported by the source.
        message: String,
    },
}

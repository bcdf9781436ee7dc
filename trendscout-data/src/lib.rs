//! Data access for the Trendscout pipeline.
//!
//! Responsibilities:
//! - Define the [`TrendSource`](source::TrendSource) collaborator and ship
//!   HTTP and file-backed implementations.
//! - Persist daily snapshots through [`SnapshotStore`].
//!
//! Boundaries:
//! - Do not encode scoring or filtering rules (those live in
//!   `trendscout-core` and `trendscout-scorer`).
//! - Keep blocking file I/O off async executors.
//!
//! Invariants:
//! - Upstream failures degrade to partial results; only unusable sources
//!   raise errors.
//! - A snapshot that cannot be parsed is never overwritten.

pub mod source;
mod snapshot;

#[doc(hidden)]
pub mod test_support;

pub use snapshot::{SnapshotError, SnapshotStore};

//! Shared test harness modules for the Trendscout CLI.

mod helpers;

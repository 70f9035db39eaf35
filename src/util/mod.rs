//! Shared utilities for `sweep_stats`.

pub mod progress;

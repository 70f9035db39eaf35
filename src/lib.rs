//! `sweep_stats` - aggregation and significance testing of repeated
//! stochastic-optimizer benchmark traces.
//!
//! Repetitions of one run key are loaded through a [`storage::Repository`],
//! aligned onto a fixed evaluation grid with explicit absent cells, and
//! reduced to summary curves, cross-sweep points, nonparametric test results
//! and a runtime cost model. See the [`analysis`] module.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod output;
pub mod storage;
pub mod util;

pub use error::{ErrorCode, Result, StructuredError, SweepError};

//! Output formatting for `sweep_stats`.
//!
//! Supports plain line-oriented text, machine-parseable JSON, and CSV for
//! both the record files and exported curves. Rich tables live in
//! [`crate::output`]. Results go to stdout with diagnostics on stderr.
//!
//! # Output Types
//!
//! Every document carries the algorithm's display name and chart color so an
//! external renderer needs no lookup of its own:
//! - [`CurveDocument`] - Summary curve of one run key (curve)
//! - [`SweepDocument`] - Terminal values across a sweep (dims/shifts)
//! - [`ComparisonDocument`] - Significance tests (compare)
//! - [`CostDocument`] - Runtime cost model (times)

pub mod csv;
mod output;
mod text;

pub use output::{
    AlgorithmTag, ComparisonDocument, CostDocument, CostEntry, CurveDocument, SweepDocument,
};
pub use text::{
    ABSENT, axis_label, comparison_title, config_rows, cost_title, curve_sample_indices,
    curve_title, fit_summary, format_comparison, format_config, format_cost, format_curve,
    format_optional, format_sweep, format_value, method_label, sweep_title,
};

//! Aggregation, alignment and statistics engine.
//!
//! Every operation here is a pure transformation from loaded records to a new
//! immutable result. Storage is only reached through [`Repository`].
//!
//! [`Repository`]: crate::storage::Repository

pub mod align;
pub mod dist;
pub mod loader;
pub mod regression;
pub mod significance;
pub mod stats;
pub mod summary;
pub mod sweep;

pub use align::{AlignedGrid, DEFAULT_CAP, align};
pub use loader::{load, load_many, load_many_with_progress};
pub use regression::{
    CostReport, DimensionStats, RegressionResult, cost_report, fit_cost_model, linregress,
    summary_stats, timing_keys,
};
pub use significance::{
    ComparisonGroup, ComparisonReport, GroupComparison, GroupSample, Method, TestKind, TestResult,
    compare, compare_groups, mann_whitney_u, rank_sum, signed_rank,
};
pub use summary::{Quantiles, SummaryCurve, SummaryPoint, summarize};
pub use sweep::{
    SweepAxis, SweepPoint, aggregate, dims_points, run_sweep, shift_points, shifted_benchmark,
};

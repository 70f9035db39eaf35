//! Cross-sweep aggregator: one point per sweep value from terminal values.

use super::align::align;
use super::loader::load_many_with_progress;
use super::stats::{percentile_sorted, sorted};
use crate::error::Result;
use crate::model::{RepetitionSet, RunKey};
use crate::storage::Repository;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::info;

/// Axis a sweep varies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    Dimensionality,
    Shift,
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimensionality => write!(f, "dims"),
            Self::Shift => write!(f, "shift"),
        }
    }
}

/// Median of the terminal values with asymmetric extents to min and max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub sweep_value: f64,
    /// Repetitions that reached the terminal evaluation.
    pub n: usize,
    pub median: Option<f64>,
    /// `median - min`
    pub err_lo: Option<f64>,
    /// `max - median`
    pub err_hi: Option<f64>,
}

impl SweepPoint {
    /// Build a point from raw terminal values; `correction` is subtracted
    /// from every value before any order statistic is taken.
    #[must_use]
    pub fn from_terminal_values(sweep_value: f64, values: &[f64], correction: f64) -> Self {
        let corrected: Vec<f64> = values.iter().map(|v| v - correction).collect();
        let sorted = sorted(&corrected);
        let median = percentile_sorted(&sorted, 50.0);
        let lo = percentile_sorted(&sorted, 0.0);
        let hi = percentile_sorted(&sorted, 100.0);

        Self {
            sweep_value,
            n: sorted.len(),
            median,
            err_lo: median.zip(lo).map(|(m, lo)| m - lo),
            err_hi: median.zip(hi).map(|(m, hi)| hi - m),
        }
    }
}

/// Aggregate already-loaded sets, one point per entry, in caller order.
#[must_use]
pub fn aggregate(sets: &[(f64, RepetitionSet)], cap: usize, correction: f64) -> Vec<SweepPoint> {
    sets.iter()
        .map(|(sweep_value, set)| {
            let terminal: Vec<f64> = align(set, cap)
                .terminal_values()
                .into_iter()
                .map(|(_, v)| v)
                .collect();
            SweepPoint::from_terminal_values(*sweep_value, &terminal, correction)
        })
        .collect()
}

/// Sweep points over a dimensionality range of `base`.
#[must_use]
pub fn dims_points(base: &RunKey, dims: RangeInclusive<u32>) -> Vec<(f64, RunKey)> {
    dims.map(|d| (f64::from(d), base.with_dims(d))).collect()
}

/// Benchmark id of a shifted variant.
///
/// `pattern` may use `{bench}` and `{value}`; shift `0` is the base function.
#[must_use]
pub fn shifted_benchmark(pattern: &str, benchmark: &str, shift: f64) -> String {
    if shift == 0.0 {
        return benchmark.to_string();
    }
    pattern
        .replace("{bench}", benchmark)
        .replace("{value}", &shift.to_string())
}

/// Sweep points over shift magnitudes of `base`.
#[must_use]
pub fn shift_points(base: &RunKey, shifts: &[f64], pattern: &str) -> Vec<(f64, RunKey)> {
    shifts
        .iter()
        .map(|&shift| {
            let benchmark = shifted_benchmark(pattern, &base.benchmark, shift);
            (shift, base.with_benchmark(benchmark))
        })
        .collect()
}

/// Load every sweep point in parallel and aggregate.
///
/// # Errors
///
/// Fails on the first sweep point whose runs are missing or unreadable.
pub fn run_sweep<R, F>(
    repo: &R,
    points: &[(f64, RunKey)],
    cap: usize,
    correction: f64,
    on_loaded: F,
) -> Result<Vec<SweepPoint>>
where
    R: Repository + ?Sized,
    F: Fn() + Sync,
{
    let keys: Vec<RunKey> = points.iter().map(|(_, key)| key.clone()).collect();
    let sets = load_many_with_progress(repo, &keys, on_loaded)?;
    let labelled: Vec<(f64, RepetitionSet)> = points
        .iter()
        .map(|(value, _)| *value)
        .zip(sets)
        .collect();

    let result = aggregate(&labelled, cap, correction);
    info!(points = result.len(), cap, correction, "Aggregated sweep");
    Ok(result)
}

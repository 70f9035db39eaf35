//! Cost regression: elapsed wall-clock time against dimensionality.

use super::dist::student_t_two_sided;
use super::stats::{mean, population_std};
use crate::error::{Result, SweepError};
use crate::model::{Algorithm, RunKey, TimingSample};
use crate::storage::Repository;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use tracing::{debug, info};

const TINY: f64 = 1.0e-20;

/// Mean and spread of elapsed seconds at one dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionStats {
    pub dims: u32,
    pub n: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Ordinary least squares fit of `y ~ x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Two-sided p-value for a zero slope.
    pub p_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    pub intercept_stderr: f64,
    pub n: usize,
}

/// Per-dimensionality mean and population std, ascending by dims.
#[must_use]
pub fn summary_stats(samples: &[TimingSample]) -> Vec<DimensionStats> {
    let mut by_dims: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        by_dims
            .entry(sample.dims)
            .or_default()
            .push(sample.elapsed_seconds);
    }

    by_dims
        .into_iter()
        .filter_map(|(dims, times)| {
            Some(DimensionStats {
                dims,
                n: times.len(),
                mean: mean(&times)?,
                std: population_std(&times)?,
            })
        })
        .collect()
}

/// Least squares fit with correlation, p-value and standard errors.
///
/// # Errors
///
/// Returns `InvalidInput` on mismatched lengths and `InsufficientData` with
/// fewer than 3 points or when every `x` is identical.
pub fn linregress(xs: &[f64], ys: &[f64]) -> Result<RegressionResult> {
    if xs.len() != ys.len() {
        return Err(SweepError::invalid_input(format!(
            "regression needs equal-length inputs, got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    let n = xs.len();
    if n < 3 {
        return Err(SweepError::InsufficientData {
            reason: format!("regression needs at least 3 samples, got {n}"),
        });
    }

    let nf = n as f64;
    let xmean = xs.iter().sum::<f64>() / nf;
    let ymean = ys.iter().sum::<f64>() / nf;
    let mut ssxm = 0.0;
    let mut ssym = 0.0;
    let mut ssxym = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - xmean;
        let dy = y - ymean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    ssxm /= nf;
    ssym /= nf;
    ssxym /= nf;

    if ssxm == 0.0 {
        return Err(SweepError::InsufficientData {
            reason: "all x values are identical".to_string(),
        });
    }

    let r_den = (ssxm * ssym).sqrt();
    let r = if r_den == 0.0 {
        0.0
    } else {
        (ssxym / r_den).clamp(-1.0, 1.0)
    };

    let slope = ssxym / ssxm;
    let intercept = ymean - slope * xmean;
    let df = nf - 2.0;
    let t = r * (df / ((1.0 - r) * (1.0 + r) + TINY)).sqrt();
    let std_err = ((1.0 - r * r) * ssym / ssxm / df).sqrt();

    Ok(RegressionResult {
        slope,
        intercept,
        r_value: r,
        p_value: student_t_two_sided(t, df),
        std_err,
        intercept_stderr: std_err * (ssxm + xmean * xmean).sqrt(),
        n,
    })
}

/// Fit elapsed seconds against dimensionality over the raw samples.
///
/// # Errors
///
/// Returns `InsufficientData` with fewer than 3 samples or a single
/// dimensionality.
pub fn fit_cost_model(samples: &[TimingSample]) -> Result<RegressionResult> {
    let xs: Vec<f64> = samples.iter().map(|s| f64::from(s.dims)).collect();
    let ys: Vec<f64> = samples.iter().map(|s| s.elapsed_seconds).collect();
    linregress(&xs, &ys)
}

/// Everything the driver shows for one algorithm's timings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub algorithm: Algorithm,
    pub samples: usize,
    pub per_dimension: Vec<DimensionStats>,
    pub regression: RegressionResult,
}

/// Timing keys of one algorithm pooled over benchmarks and a dims range.
#[must_use]
pub fn timing_keys(
    algorithm: Algorithm,
    version: &str,
    benchmarks: &[String],
    dims: RangeInclusive<u32>,
) -> Vec<RunKey> {
    dims.flat_map(|d| {
        benchmarks
            .iter()
            .map(move |bench| RunKey::new(algorithm, bench.as_str(), version, d))
    })
    .collect()
}

/// Read every timing log in parallel and build the cost report.
///
/// # Errors
///
/// Fails on the first unreadable timing log (in key order) or if the pooled
/// samples cannot support a fit.
pub fn cost_report<R, F>(
    repo: &R,
    algorithm: Algorithm,
    keys: &[RunKey],
    on_loaded: F,
) -> Result<CostReport>
where
    R: Repository + ?Sized,
    F: Fn() + Sync,
{
    let logs: Vec<Vec<TimingSample>> = keys
        .par_iter()
        .map(|key| {
            let log = repo.read_timing_log(key);
            on_loaded();
            log
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<_>>()?;

    let samples: Vec<TimingSample> = logs.into_iter().flatten().collect();
    debug!(%algorithm, logs = keys.len(), samples = samples.len(), "Pooled timing samples");

    let regression = fit_cost_model(&samples)?;
    info!(
        %algorithm,
        slope = regression.slope,
        intercept = regression.intercept,
        r = regression.r_value,
        "Fitted cost model"
    );

    Ok(CostReport {
        algorithm,
        samples: samples.len(),
        per_dimension: summary_stats(&samples),
        regression,
    })
}

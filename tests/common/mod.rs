#![allow(dead_code)]

use std::path::Path;
use std::sync::Once;
use std::time::Instant;
use sweep_stats::model::{Algorithm, RunKey, Series, TimingSample};
use sweep_stats::storage::FsRepository;
use tracing::info;

pub mod cli;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        sweep_stats::logging::init_test_logging();
    });
}

pub struct TestLogGuard {
    name: String,
    start: Instant,
}

impl TestLogGuard {
    fn new(name: &str) -> Self {
        init_test_logging();
        info!("{name}: starting");
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        info!(
            "{}: assertions passed (elapsed {:?})",
            self.name,
            self.start.elapsed()
        );
    }
}

pub fn test_log(name: &str) -> TestLogGuard {
    TestLogGuard::new(name)
}

pub fn key(algorithm: Algorithm, benchmark: &str, dims: u32) -> RunKey {
    RunKey::new(algorithm, benchmark, "DEFAULT", dims)
}

/// Write repetitions `1..=runs.len()` of `key` as record files under `root`.
pub fn write_runs(root: &Path, key: &RunKey, runs: &[Vec<f64>]) {
    let repo = FsRepository::new(root);
    for (idx, values) in runs.iter().enumerate() {
        let repetition = u32::try_from(idx + 1).expect("repetition fits u32");
        repo.write_series(key, repetition, &Series::from_best_values(values))
            .expect("write record file");
    }
}

/// Append one timing sample per entry of `elapsed` to `key`'s timing log.
pub fn write_timings(root: &Path, key: &RunKey, elapsed: &[f64]) {
    let repo = FsRepository::new(root);
    for seconds in elapsed {
        let sample = TimingSample {
            algorithm: key.algorithm,
            dims: key.dims,
            elapsed_seconds: *seconds,
            total_evaluations: 10_000,
        };
        repo.append_timing(key, &sample).expect("append timing");
    }
}

/// A decreasing best-so-far trace of `len` evaluations ending at `last`.
pub fn trace(len: usize, start: f64, last: f64) -> Vec<f64> {
    if len == 1 {
        return vec![last];
    }
    let step = (start - last) / (len - 1) as f64;
    let mut values: Vec<f64> = (0..len).map(|i| start - step * i as f64).collect();
    values[len - 1] = last;
    values
}

//! In-memory repository for tests and synthetic sweeps.

use super::Repository;
use crate::error::{Result, SweepError};
use crate::model::{RunKey, Series, TimingSample};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    series: HashMap<RunKey, BTreeMap<u32, Series>>,
    timings: HashMap<RunKey, Vec<TimingSample>>,
}

fn not_found(key: &RunKey) -> SweepError {
    SweepError::NotFound {
        path: PathBuf::from(format!("memory://{key}")),
    }
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_series(&mut self, key: &RunKey, repetition: u32, series: Series) -> &mut Self {
        self.series
            .entry(key.clone())
            .or_default()
            .insert(repetition, series);
        self
    }

    /// Insert repetitions 1..=n from best-so-far value vectors.
    pub fn insert_best_values(&mut self, key: &RunKey, runs: &[Vec<f64>]) -> &mut Self {
        for (idx, values) in runs.iter().enumerate() {
            self.insert_series(key, idx as u32 + 1, Series::from_best_values(values));
        }
        self
    }

    pub fn insert_timing(&mut self, key: &RunKey, sample: TimingSample) -> &mut Self {
        self.timings.entry(key.clone()).or_default().push(sample);
        self
    }
}

impl Repository for MemoryRepository {
    fn list_repetitions(&self, key: &RunKey) -> Result<Vec<u32>> {
        self.series
            .get(key)
            .map(|reps| reps.keys().copied().collect())
            .ok_or_else(|| not_found(key))
    }

    fn read_series(&self, key: &RunKey, repetition: u32) -> Result<Series> {
        self.series
            .get(key)
            .and_then(|reps| reps.get(&repetition))
            .cloned()
            .ok_or_else(|| not_found(key))
    }

    fn read_timing_log(&self, key: &RunKey) -> Result<Vec<TimingSample>> {
        self.timings.get(key).cloned().ok_or_else(|| not_found(key))
    }
}

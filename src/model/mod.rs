//! Core data types for `sweep_stats`.
//!
//! This module defines the types every analysis step is built from:
//! - `Algorithm` - The closed set of compared optimizer families
//! - `RunKey` - Identity of one sweep point
//! - `EvaluationRecord` / `Series` - One repetition's best-so-far trace
//! - `RepetitionSet` - All repetitions sharing a `RunKey`
//! - `TimingSample` - One wall-clock measurement of a finished run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SweepError;

/// Optimizer family that produced a set of traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    Fireworks,
    PlantPropagation,
}

/// Static description of an algorithm: how it is stored and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    /// Directory prefix used by the record writers.
    pub storage_name: &'static str,
    pub display_name: &'static str,
    pub short_name: &'static str,
    /// Hex color handed to the external chart renderer.
    pub color: &'static str,
}

const ALGORITHM_TABLE: [AlgorithmInfo; 2] = [
    AlgorithmInfo {
        algorithm: Algorithm::Fireworks,
        storage_name: "Fireworks",
        display_name: "Fireworks",
        short_name: "fwa",
        color: "#ff7f0e",
    },
    AlgorithmInfo {
        algorithm: Algorithm::PlantPropagation,
        storage_name: "PlantPropagation",
        display_name: "Plant Propagation",
        short_name: "ppa",
        color: "#1f77b4",
    },
];

impl Algorithm {
    /// All algorithms in table order.
    pub const ALL: [Self; 2] = [Self::Fireworks, Self::PlantPropagation];

    #[must_use]
    pub const fn info(self) -> &'static AlgorithmInfo {
        match self {
            Self::Fireworks => &ALGORITHM_TABLE[0],
            Self::PlantPropagation => &ALGORITHM_TABLE[1],
        }
    }

    #[must_use]
    pub const fn storage_name(self) -> &'static str {
        self.info().storage_name
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.info().display_name
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        self.info().color
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_name())
    }
}

impl FromStr for Algorithm {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALGORITHM_TABLE
            .iter()
            .find(|info| {
                info.storage_name.to_lowercase() == wanted
                    || info.display_name.to_lowercase() == wanted
                    || info.short_name == wanted
            })
            .map(|info| info.algorithm)
            .ok_or_else(|| SweepError::InvalidInput {
                reason: format!("unknown algorithm '{s}' (expected fwa or ppa)"),
            })
    }
}

/// Identity of one sweep point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunKey {
    pub algorithm: Algorithm,
    pub benchmark: String,
    pub version: String,
    pub dims: u32,
}

impl RunKey {
    #[must_use]
    pub fn new(
        algorithm: Algorithm,
        benchmark: impl Into<String>,
        version: impl Into<String>,
        dims: u32,
    ) -> Self {
        Self {
            algorithm,
            benchmark: benchmark.into(),
            version: version.into(),
            dims,
        }
    }

    /// Same key, different benchmark. Used to address shifted variants.
    #[must_use]
    pub fn with_benchmark(&self, benchmark: impl Into<String>) -> Self {
        Self {
            benchmark: benchmark.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_dims(&self, dims: u32) -> Self {
        Self {
            dims,
            ..self.clone()
        }
    }
}

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}/{}/{}d",
            self.algorithm, self.version, self.benchmark, self.dims
        )
    }
}

/// One row of a repetition's trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 1-based, strictly increasing within a series.
    pub evaluation: u64,
    pub value: f64,
    /// Running minimum; non-increasing by construction upstream.
    pub best_so_far: f64,
    pub generation: i64,
}

/// Ordered trace of one repetition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub records: Vec<EvaluationRecord>,
}

impl Series {
    #[must_use]
    pub const fn new(records: Vec<EvaluationRecord>) -> Self {
        Self { records }
    }

    /// Build a series from best-so-far values alone; `value` mirrors the
    /// best-so-far and every record is placed in generation 0.
    #[must_use]
    pub fn from_best_values(values: &[f64]) -> Self {
        let records = values
            .iter()
            .enumerate()
            .map(|(idx, &best)| EvaluationRecord {
                evaluation: idx as u64 + 1,
                value: best,
                best_so_far: best,
                generation: 0,
            })
            .collect();
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn best_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.best_so_far)
    }
}

/// All repetitions recorded for one `RunKey`, ordered by repetition id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionSet {
    pub key: RunKey,
    pub repetitions: Vec<(u32, Series)>,
}

impl RepetitionSet {
    #[must_use]
    pub const fn new(key: RunKey, repetitions: Vec<(u32, Series)>) -> Self {
        Self { key, repetitions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.repetitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty()
    }

    /// Length of the longest repetition.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.repetitions
            .iter()
            .map(|(_, series)| series.len())
            .max()
            .unwrap_or(0)
    }
}

/// Wall-clock cost of one finished repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub algorithm: Algorithm,
    pub dims: u32,
    pub elapsed_seconds: f64,
    pub total_evaluations: u64,
}

//! Robust summary engine: per-evaluation median and percentile bands.

use super::align::AlignedGrid;
use super::stats::{percentile_sorted, sorted};
use crate::model::RunKey;
use serde::Serialize;

/// Order statistics of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantiles {
    pub p0: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p100: f64,
}

impl Quantiles {
    /// `None` when there are no values.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        Some(Self {
            p0: percentile_sorted(&sorted, 0.0)?,
            p25: percentile_sorted(&sorted, 25.0)?,
            median: percentile_sorted(&sorted, 50.0)?,
            p75: percentile_sorted(&sorted, 75.0)?,
            p100: percentile_sorted(&sorted, 100.0)?,
        })
    }
}

/// Summary at one evaluation index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryPoint {
    /// 1-based evaluation index.
    pub evaluation: u64,
    /// Repetitions with a value at this index.
    pub n: usize,
    /// Absent when `n == 0`.
    pub quantiles: Option<Quantiles>,
}

/// Per-evaluation summary of one aligned grid, `cap` points long.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCurve {
    pub key: RunKey,
    points: Vec<SummaryPoint>,
}

impl SummaryCurve {
    #[must_use]
    pub fn points(&self) -> &[SummaryPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at a 1-based evaluation index.
    #[must_use]
    pub fn at(&self, evaluation: usize) -> Option<&SummaryPoint> {
        evaluation.checked_sub(1).and_then(|idx| self.points.get(idx))
    }

    /// Point at the evaluation budget.
    #[must_use]
    pub fn terminal(&self) -> Option<&SummaryPoint> {
        self.points.last()
    }

    /// Points that have at least one repetition.
    pub fn present(&self) -> impl Iterator<Item = (&SummaryPoint, Quantiles)> {
        self.points
            .iter()
            .filter_map(|point| point.quantiles.map(|q| (point, q)))
    }
}

/// Summarize every column `1..=cap` of the grid.
///
/// Columns past the grid width, or where every repetition has ended, get
/// `n = 0` and absent quantiles.
#[must_use]
pub fn summarize(grid: &AlignedGrid) -> SummaryCurve {
    let points = (0..grid.cap())
        .map(|column| {
            let values = grid.column_values(column);
            SummaryPoint {
                evaluation: column as u64 + 1,
                n: values.len(),
                quantiles: Quantiles::from_values(&values),
            }
        })
        .collect();

    SummaryCurve {
        key: grid.key.clone(),
        points,
    }
}

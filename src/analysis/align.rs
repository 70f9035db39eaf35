//! Alignment and truncation of ragged repetition sets.
//!
//! Cells are `Option<f64>`: `None` marks an evaluation index past the end of
//! a repetition's trace. Absent cells never take part in any statistic.

use crate::model::{RepetitionSet, RunKey};
use serde::Serialize;
use tracing::debug;

/// Default canonical evaluation budget.
pub const DEFAULT_CAP: usize = 10_000;

/// Repetitions projected onto evaluation columns `1..=width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedGrid {
    pub key: RunKey,
    cap: usize,
    /// One row per repetition (ids parallel to `rows`), each `width` long.
    repetition_ids: Vec<u32>,
    rows: Vec<Vec<Option<f64>>>,
}

/// Align a repetition set's best-so-far traces, truncated to `cap` columns.
///
/// The grid is `min(L, cap)` wide where `L` is the longest repetition.
/// Columns between the grid width and `cap` are treated downstream as having
/// no repetitions at all.
#[must_use]
pub fn align(set: &RepetitionSet, cap: usize) -> AlignedGrid {
    let width = set.max_len().min(cap);

    let rows: Vec<Vec<Option<f64>>> = set
        .repetitions
        .iter()
        .map(|(_, series)| {
            let mut row: Vec<Option<f64>> = series.best_values().take(width).map(Some).collect();
            row.resize(width, None);
            row
        })
        .collect();

    let grid = AlignedGrid {
        key: set.key.clone(),
        cap,
        repetition_ids: set.repetitions.iter().map(|(id, _)| *id).collect(),
        rows,
    };
    debug!(
        key = %grid.key,
        rows = grid.row_count(),
        width = grid.width(),
        missing = grid.missing_cells(),
        "Aligned repetition set"
    );
    grid
}

impl AlignedGrid {
    /// Canonical budget the grid was truncated to.
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Number of populated columns (`<= cap`).
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn repetition_ids(&self) -> &[u32] {
        &self.repetition_ids
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// Cell at 0-based row and column; `None` if absent or out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Present values of a 0-based column. Empty past the grid width.
    #[must_use]
    pub fn column_values(&self, column: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(column).copied().flatten())
            .collect()
    }

    /// Present values of the terminal column (evaluation index `cap`), keyed
    /// by repetition id.
    #[must_use]
    pub fn terminal_values(&self) -> Vec<(u32, f64)> {
        let column = self.cap.saturating_sub(1);
        self.repetition_ids
            .iter()
            .zip(&self.rows)
            .filter_map(|(id, row)| row.get(column).copied().flatten().map(|v| (*id, v)))
            .collect()
    }

    #[must_use]
    pub fn missing_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_none()).count())
            .sum()
    }

    /// New grid with `correction` subtracted from every present cell.
    #[must_use]
    pub fn corrected(&self, correction: f64) -> Self {
        if correction == 0.0 {
            return self.clone();
        }
        Self {
            key: self.key.clone(),
            cap: self.cap,
            repetition_ids: self.repetition_ids.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(|v| v - correction)).collect())
                .collect(),
        }
    }
}

use crate::analysis::{
    CostReport, DimensionStats, GroupComparison, RegressionResult, SummaryCurve, SweepAxis,
    SweepPoint,
};
use crate::model::{Algorithm, RunKey};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// How the external renderer should label and draw an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmTag {
    pub algorithm: Algorithm,
    pub display_name: &'static str,
    pub color: &'static str,
}

impl From<Algorithm> for AlgorithmTag {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            display_name: algorithm.display_name(),
            color: algorithm.color(),
        }
    }
}

/// Summary curve of one run key (`curve`).
#[derive(Debug, Clone, Serialize)]
pub struct CurveDocument {
    pub generated_at: DateTime<Utc>,
    pub key: RunKey,
    pub algorithm: AlgorithmTag,
    pub repetitions: usize,
    pub cap: usize,
    pub correction: f64,
    /// Exported CSV, when `--out` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub curve: SummaryCurve,
}

/// Terminal-value sweep of one algorithm on one benchmark (`dims`, `shifts`).
#[derive(Debug, Clone, Serialize)]
pub struct SweepDocument {
    pub generated_at: DateTime<Utc>,
    pub axis: SweepAxis,
    pub algorithm: AlgorithmTag,
    pub benchmark: String,
    pub version: String,
    /// Fixed dimensionality of a shift sweep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dims: Option<u32>,
    pub cap: usize,
    pub correction: f64,
    pub points: Vec<SweepPoint>,
}

/// Significance tests between two groups (`compare`).
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonDocument {
    pub generated_at: DateTime<Utc>,
    pub algorithm: AlgorithmTag,
    pub cap: usize,
    pub paired: bool,
    #[serde(flatten)]
    pub comparison: GroupComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEntry {
    #[serde(flatten)]
    pub tag: AlgorithmTag,
    pub samples: usize,
    pub per_dimension: Vec<DimensionStats>,
    pub regression: RegressionResult,
}

impl From<CostReport> for CostEntry {
    fn from(report: CostReport) -> Self {
        Self {
            tag: report.algorithm.into(),
            samples: report.samples,
            per_dimension: report.per_dimension,
            regression: report.regression,
        }
    }
}

/// Runtime cost model per algorithm (`times`).
#[derive(Debug, Clone, Serialize)]
pub struct CostDocument {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub benchmarks: Vec<String>,
    pub dims_min: u32,
    pub dims_max: u32,
    pub reports: Vec<CostEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::model::{RepetitionSet, Series};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn algorithm_tag_carries_render_hints() {
        let tag = AlgorithmTag::from(Algorithm::PlantPropagation);
        let json = serde_json::to_value(tag).unwrap();
        assert_eq!(json["algorithm"], "PlantPropagation");
        assert_eq!(json["display_name"], "Plant Propagation");
        assert_eq!(json["color"], "#1f77b4");
    }

    #[test]
    fn sweep_document_serializes_absent_points_as_null() {
        let key = RunKey::new(Algorithm::Fireworks, "sphere", "DEFAULT", 2);
        let set = RepetitionSet::new(key, vec![(1, Series::from_best_values(&[3.0]))]);
        // cap beyond the recorded length leaves the terminal column empty
        let points: Vec<SweepPoint> = aggregate(&[(2.0, set)], 5, 0.0);

        let doc = SweepDocument {
            generated_at: fixed_time(),
            axis: SweepAxis::Dimensionality,
            algorithm: Algorithm::Fireworks.into(),
            benchmark: "sphere".to_string(),
            version: "DEFAULT".to_string(),
            dims: None,
            cap: 5,
            correction: 0.0,
            points,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["axis"], "dimensionality");
        assert!(json.get("dims").is_none());
        assert_eq!(json["points"][0]["n"], 0);
        assert!(json["points"][0]["median"].is_null());
        assert_eq!(json["generated_at"], "2024-05-01T12:00:00Z");
    }
}

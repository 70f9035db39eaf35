//! Plain text formatting for piped or `NO_COLOR` output.
//!
//! One heading line per result followed by indented `key=value` lines, so the
//! output greps well. Absent statistics print as `-`. Titles and cell text
//! are shared with the rich tables in [`crate::output::components`].

use super::output::{ComparisonDocument, CostDocument, CostEntry, CurveDocument, SweepDocument};
use crate::analysis::{Method, SweepAxis, SweepPoint, TestResult};
use crate::config::AnalysisConfig;
use std::fmt::Write as _;

/// Placeholder for an absent statistic.
pub const ABSENT: &str = "-";

/// Fixed notation for moderate magnitudes, scientific otherwise.
#[must_use]
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1.0e-3..1.0e6).contains(&magnitude) {
        format!("{value:.6}")
    } else {
        format!("{value:.4e}")
    }
}

#[must_use]
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT.to_string(), format_value)
}

/// Evaluation indices shown for a curve: 1-2-5 steps per decade, then `cap`.
#[must_use]
pub fn curve_sample_indices(cap: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut decade = 1_usize;
    'outer: loop {
        for step in [1, 2, 5] {
            let idx = decade.saturating_mul(step);
            if idx >= cap {
                break 'outer;
            }
            indices.push(idx);
        }
        decade = decade.saturating_mul(10);
    }
    if cap > 0 {
        indices.push(cap);
    }
    indices
}

#[must_use]
pub fn curve_title(doc: &CurveDocument) -> String {
    format!(
        "{} on {} ({}d, {} repetitions, cap {})",
        doc.algorithm.display_name, doc.key.benchmark, doc.key.dims, doc.repetitions, doc.cap
    )
}

#[must_use]
pub const fn axis_label(axis: SweepAxis) -> &'static str {
    match axis {
        SweepAxis::Dimensionality => "dims",
        SweepAxis::Shift => "shift",
    }
}

#[must_use]
pub fn sweep_title(doc: &SweepDocument) -> String {
    let mut heading = format!(
        "{} on {}: terminal value by {} (cap {})",
        doc.algorithm.display_name,
        doc.benchmark,
        axis_label(doc.axis),
        doc.cap
    );
    if let Some(dims) = doc.dims {
        let _ = write!(heading, ", {dims}d");
    }
    if doc.correction != 0.0 {
        let _ = write!(heading, ", corrected by {}", doc.correction);
    }
    heading
}

#[must_use]
pub fn comparison_title(doc: &ComparisonDocument) -> String {
    let a = &doc.comparison.a;
    let b = &doc.comparison.b;
    format!(
        "{}: {} (n={}) vs {} (n={}), terminal values at {}",
        doc.algorithm.display_name,
        a.group.key,
        a.values.len(),
        b.group.key,
        b.values.len(),
        doc.cap
    )
}

/// Method label of a test, flagged when the result is degenerate.
#[must_use]
pub fn method_label(result: &TestResult) -> String {
    let method = match result.method {
        Method::Exact => "exact",
        Method::Asymptotic => "asymptotic",
    };
    if result.degenerate {
        format!("{method} (degenerate)")
    } else {
        method.to_string()
    }
}

#[must_use]
pub fn cost_title(entry: &CostEntry, benchmarks: usize) -> String {
    format!(
        "{}: elapsed seconds by dims ({} samples over {benchmarks} benchmarks)",
        entry.tag.display_name, entry.samples
    )
}

#[must_use]
pub fn fit_summary(entry: &CostEntry) -> String {
    let fit = &entry.regression;
    format!(
        "time = {} * dims + {}  (r = {}, p = {}, stderr = {}, intercept stderr = {})",
        format_value(fit.slope),
        format_value(fit.intercept),
        format_value(fit.r_value),
        format_value(fit.p_value),
        format_value(fit.std_err),
        format_value(fit.intercept_stderr),
    )
}

/// Resolved settings as display pairs, in `KNOWN_KEYS` order.
#[must_use]
pub fn config_rows(config: &AnalysisConfig) -> Vec<(&'static str, String)> {
    let benchmarks = if config.benchmarks.is_empty() {
        ABSENT.to_string()
    } else {
        config.benchmarks.join(",")
    };
    let workers = if config.workers == 0 {
        "auto".to_string()
    } else {
        config.workers.to_string()
    };

    vec![
        ("data-root", config.data_root.display().to_string()),
        ("version", config.version.clone()),
        ("cap", config.cap.to_string()),
        ("dims.min", config.dims_min.to_string()),
        ("dims.max", config.dims_max.to_string()),
        ("benchmarks", benchmarks),
        ("shift-pattern", config.shift_pattern.clone()),
        ("workers", workers),
    ]
}

#[must_use]
pub fn format_curve(doc: &CurveDocument) -> String {
    let mut out = curve_title(doc);
    out.push('\n');
    for point in curve_sample_indices(doc.cap)
        .into_iter()
        .filter_map(|idx| doc.curve.at(idx))
    {
        let q = point.quantiles;
        let _ = writeln!(
            out,
            "  evaluation {}: n={} median={} p0={} p25={} p75={} p100={}",
            point.evaluation,
            point.n,
            format_optional(q.map(|q| q.median)),
            format_optional(q.map(|q| q.p0)),
            format_optional(q.map(|q| q.p25)),
            format_optional(q.map(|q| q.p75)),
            format_optional(q.map(|q| q.p100)),
        );
    }
    if let Some(path) = &doc.output_path {
        let _ = writeln!(out, "written to {}", path.display());
    }
    out
}

fn sweep_line(axis: SweepAxis, point: &SweepPoint) -> String {
    format!(
        "  {} {}: n={} median={} err_lo={} err_hi={}",
        axis_label(axis),
        point.sweep_value,
        point.n,
        format_optional(point.median),
        format_optional(point.err_lo),
        format_optional(point.err_hi),
    )
}

#[must_use]
pub fn format_sweep(doc: &SweepDocument) -> String {
    let mut out = sweep_title(doc);
    out.push('\n');
    for point in &doc.points {
        let _ = writeln!(out, "{}", sweep_line(doc.axis, point));
    }
    out
}

#[must_use]
pub fn format_comparison(doc: &ComparisonDocument) -> String {
    let mut out = comparison_title(doc);
    out.push('\n');
    for result in doc.comparison.report.tests() {
        let _ = writeln!(
            out,
            "  {}: statistic={} p={} ({})",
            result.kind,
            format_value(result.statistic),
            format_value(result.p_value),
            method_label(result),
        );
    }
    if !doc.paired {
        out.push_str("  signed-rank skipped (unpaired)\n");
    }
    out
}

#[must_use]
pub fn format_cost(doc: &CostDocument) -> String {
    let mut out = String::new();
    for entry in &doc.reports {
        let _ = writeln!(out, "{}", cost_title(entry, doc.benchmarks.len()));
        for row in &entry.per_dimension {
            let _ = writeln!(
                out,
                "  dims {}: n={} mean={} std={}",
                row.dims,
                row.n,
                format_value(row.mean),
                format_value(row.std),
            );
        }
        let _ = writeln!(out, "  fit: {}", fit_summary(entry));
    }
    out
}

#[must_use]
pub fn format_config(config: &AnalysisConfig) -> String {
    config_rows(config)
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}

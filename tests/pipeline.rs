mod common;

use common::{key, test_log, trace, write_runs, write_timings};
use sweep_stats::analysis::{
    ComparisonGroup, Method, align, compare_groups, cost_report, dims_points, load, run_sweep,
    shift_points, summarize, timing_keys,
};
use sweep_stats::model::Algorithm;
use sweep_stats::storage::FsRepository;
use tempfile::TempDir;

const CAP: usize = 50;

#[test]
fn ragged_repetitions_summarize_over_present_values() {
    let _log = test_log("ragged_repetitions_summarize_over_present_values");
    let temp = TempDir::new().expect("tempdir");
    let key = key(Algorithm::PlantPropagation, "sphere", 2);
    write_runs(
        temp.path(),
        &key,
        &[trace(60, 100.0, 1.0), trace(40, 100.0, 2.0), trace(50, 100.0, 3.0)],
    );

    let repo = FsRepository::new(temp.path());
    let grid = align(&load(&repo, &key).expect("load"), CAP);
    assert_eq!(grid.width(), CAP);
    assert_eq!(grid.missing_cells(), 10);

    let curve = summarize(&grid);
    assert_eq!(curve.len(), CAP);
    let first = curve.at(1).expect("first point");
    assert_eq!(first.n, 3);
    assert_eq!(first.quantiles.expect("present").median, 100.0);

    let terminal = curve.terminal().expect("terminal");
    assert_eq!(terminal.n, 2);
    // repetition 1 is truncated at 50 of 60; repetition 3 ends exactly at 50
    let expected_r1 = trace(60, 100.0, 1.0)[CAP - 1];
    let q = terminal.quantiles.expect("present");
    assert_eq!(q.p100, expected_r1.max(3.0));
    assert_eq!(q.p0, expected_r1.min(3.0));
}

#[test]
fn dims_sweep_keeps_caller_order_and_applies_correction() {
    let _log = test_log("dims_sweep_keeps_caller_order_and_applies_correction");
    let temp = TempDir::new().expect("tempdir");
    let base = key(Algorithm::Fireworks, "rosenbrock", 2);
    for dims in 2..=5 {
        let d = f64::from(dims);
        let key = base.with_dims(dims);
        write_runs(
            temp.path(),
            &key,
            &[
                trace(CAP, 500.0, d),
                trace(CAP, 500.0, d + 1.0),
                trace(CAP, 500.0, d + 10.0),
            ],
        );
    }

    let repo = FsRepository::new(temp.path());
    let points = dims_points(&base, 2..=5);
    let raw = run_sweep(&repo, &points, CAP, 0.0, || {}).expect("sweep");
    let corrected = run_sweep(&repo, &points, CAP, 1.0, || {}).expect("sweep");

    assert_eq!(
        raw.iter().map(|p| p.sweep_value).collect::<Vec<_>>(),
        vec![2.0, 3.0, 4.0, 5.0]
    );
    for (r, c) in raw.iter().zip(&corrected) {
        assert_eq!(r.n, 3);
        assert_eq!(r.err_lo, Some(1.0));
        assert_eq!(r.err_hi, Some(9.0));
        assert_eq!(c.median, r.median.map(|m| m - 1.0));
        assert_eq!(c.err_lo, r.err_lo);
        assert_eq!(c.err_hi, r.err_hi);
    }
}

#[test]
fn shift_sweep_reads_shifted_benchmarks() {
    let _log = test_log("shift_sweep_reads_shifted_benchmarks");
    let temp = TempDir::new().expect("tempdir");
    let base = key(Algorithm::PlantPropagation, "ackley", 2);
    for (shift, last) in [(0.0, 1.0), (0.1, 2.0), (1000.0, 30.0)] {
        let points = shift_points(&base, &[shift], "{bench}_shift_{value}");
        write_runs(temp.path(), &points[0].1, &[vec![last], vec![last]]);
    }

    let repo = FsRepository::new(temp.path());
    let points = shift_points(&base, &[0.0, 0.1, 1000.0], "{bench}_shift_{value}");
    let sweep = run_sweep(&repo, &points, 1, 0.0, || {}).expect("sweep");
    let medians: Vec<Option<f64>> = sweep.iter().map(|p| p.median).collect();
    assert_eq!(medians, vec![Some(1.0), Some(2.0), Some(30.0)]);
}

#[test]
fn missing_sweep_point_aborts_the_sweep() {
    let _log = test_log("missing_sweep_point_aborts_the_sweep");
    let temp = TempDir::new().expect("tempdir");
    let base = key(Algorithm::Fireworks, "sphere", 2);
    write_runs(temp.path(), &base, &[vec![1.0]]);

    let repo = FsRepository::new(temp.path());
    let points = dims_points(&base, 2..=3);
    assert!(run_sweep(&repo, &points, 1, 0.0, || {}).is_err());
}

#[test]
fn comparison_groups_are_enumerated_independently() {
    let _log = test_log("comparison_groups_are_enumerated_independently");
    let temp = TempDir::new().expect("tempdir");
    let base = key(Algorithm::Fireworks, "sphere", 2);
    let shifted = base.with_benchmark("sphere_shift_10");
    let runs_a: Vec<Vec<f64>> = (0..10).map(|i| trace(CAP, 90.0, f64::from(i))).collect();
    let runs_b: Vec<Vec<f64>> = (0..10).map(|i| trace(CAP, 90.0, f64::from(i) * 2.0 + 20.0)).collect();
    write_runs(temp.path(), &base, &runs_a);
    write_runs(temp.path(), &shifted, &runs_b);

    let repo = FsRepository::new(temp.path());
    let a = ComparisonGroup::new("base", base);
    let b = ComparisonGroup::new("shifted", shifted);
    let result = compare_groups(&repo, &a, &b, CAP, true).expect("compare");

    assert_eq!(result.b.values[0], 20.0);
    let signed = result.report.signed_rank.expect("paired");
    assert_eq!(signed.method, Method::Exact);
    assert_eq!(signed.statistic, 0.0);
    assert!(signed.p_value < 0.01);
    assert!(result.report.u_test.p_value < 0.01);
}

#[test]
fn identical_groups_are_degenerate_not_errors() {
    let _log = test_log("identical_groups_are_degenerate_not_errors");
    let temp = TempDir::new().expect("tempdir");
    let base = key(Algorithm::PlantPropagation, "sphere", 2);
    let runs: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i)]).collect();
    write_runs(temp.path(), &base, &runs);

    let repo = FsRepository::new(temp.path());
    let group = ComparisonGroup::new("same", base);
    let result = compare_groups(&repo, &group, &group, 1, true).expect("compare");
    let signed = result.report.signed_rank.expect("paired");
    assert!(signed.degenerate);
    assert_eq!(signed.p_value, 1.0);
}

#[test]
fn cost_regression_recovers_slope_from_timing_logs() {
    let _log = test_log("cost_regression_recovers_slope_from_timing_logs");
    let temp = TempDir::new().expect("tempdir");
    let benches = vec!["sphere".to_string(), "ackley".to_string()];
    let keys = timing_keys(Algorithm::PlantPropagation, "DEFAULT", &benches, 2..=100);
    for (idx, key) in keys.iter().enumerate() {
        let d = f64::from(key.dims);
        let jitter = (idx % 7) as f64 * 0.02 - 0.06;
        write_timings(temp.path(), key, &[2.0 * d + jitter, 2.0 * d - jitter]);
    }

    let repo = FsRepository::new(temp.path());
    let report = cost_report(&repo, Algorithm::PlantPropagation, &keys, || {}).expect("report");
    assert_eq!(report.samples, 99 * 2 * 2);
    assert_eq!(report.per_dimension.len(), 99);
    assert_eq!(report.per_dimension[0].dims, 2);
    assert!((report.regression.slope - 2.0).abs() / 2.0 < 0.05);
    assert!(report.regression.r_value > 0.95);
}

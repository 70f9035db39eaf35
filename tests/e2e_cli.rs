mod common;

use common::cli::SweepWorkspace;
use common::{key, test_log, trace};
use predicates::prelude::*;
use std::fs;
use sweep_stats::model::Algorithm;

const CAP: &str = "20";

fn seed_dims(workspace: &SweepWorkspace, algorithm: Algorithm, bench: &str) {
    for dims in 2..=4 {
        let d = f64::from(dims);
        workspace.write_runs(
            &key(algorithm, bench, dims),
            &[trace(20, 50.0, d), trace(20, 50.0, d + 2.0), trace(20, 50.0, d + 4.0)],
        );
    }
}

#[test]
fn e2e_curve_json_and_export() {
    let _log = test_log("e2e_curve_json_and_export");
    let workspace = SweepWorkspace::new();
    seed_dims(&workspace, Algorithm::PlantPropagation, "sphere");

    let run = workspace.run([
        "curve", "--bench", "sphere", "--dims", "2", "--alg", "ppa", "--cap", CAP, "--out",
        "curves", "--json",
    ]);
    assert!(run.status.success(), "curve failed: {}", run.stderr);

    let docs = run.json();
    let doc = &docs[0];
    assert_eq!(doc["algorithm"]["display_name"], "Plant Propagation");
    assert_eq!(doc["algorithm"]["color"], "#1f77b4");
    assert_eq!(doc["repetitions"], 3);
    let points = doc["curve"]["points"].as_array().expect("points");
    assert_eq!(points.len(), 20);
    assert_eq!(points[19]["n"], 3);
    assert_eq!(points[19]["quantiles"]["median"], 4.0);

    let csv = fs::read_to_string(workspace.root.join("curves").join("PlantPropagation_sphere_2d.csv"))
        .expect("exported curve");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("evaluation,n,median,p0,p25,p75,p100"));
    assert_eq!(csv.lines().count(), 21);
}

#[test]
fn e2e_curve_plain_marks_absent_columns() {
    let _log = test_log("e2e_curve_plain_marks_absent_columns");
    let workspace = SweepWorkspace::new();
    workspace.write_runs(&key(Algorithm::Fireworks, "ackley", 2), &[vec![5.0, 4.0], vec![6.0]]);

    let run = workspace.run(["curve", "--bench", "ackley", "--dims", "2", "--alg", "fwa", "--cap", "5"]);
    assert!(run.status.success(), "curve failed: {}", run.stderr);
    let lines: Vec<&str> = run.stdout.lines().collect();
    assert_eq!(lines[0], "Fireworks on ackley (2d, 2 repetitions, cap 5)");
    assert_eq!(
        lines[1],
        "  evaluation 1: n=2 median=5.500000 p0=5.000000 p25=5.250000 p75=5.750000 p100=6.000000"
    );
    assert_eq!(
        lines.last().copied(),
        Some("  evaluation 5: n=0 median=- p0=- p25=- p75=- p100=-")
    );
    assert!(!run.stdout.contains('\u{1b}'), "plain output carries ANSI codes");
}

#[test]
fn e2e_quiet_suppresses_results() {
    let _log = test_log("e2e_quiet_suppresses_results");
    let workspace = SweepWorkspace::new();
    workspace.write_runs(&key(Algorithm::Fireworks, "ackley", 2), &[vec![5.0, 4.0]]);

    let run = workspace.run(["curve", "--bench", "ackley", "--dims", "2", "--alg", "fwa", "--quiet"]);
    assert!(run.status.success(), "curve failed: {}", run.stderr);
    assert!(run.stdout.is_empty());
}

#[test]
fn e2e_dims_sweep() {
    let _log = test_log("e2e_dims_sweep");
    let workspace = SweepWorkspace::new();
    seed_dims(&workspace, Algorithm::Fireworks, "rosenbrock");

    let run = workspace.run([
        "dims", "--bench", "rosenbrock", "--alg", "fwa", "--min-dims", "2", "--max-dims", "4",
        "--cap", CAP, "--correction", "1", "--json",
    ]);
    assert!(run.status.success(), "dims failed: {}", run.stderr);

    let docs = run.json();
    let doc = &docs[0];
    assert_eq!(doc["axis"], "dimensionality");
    assert_eq!(doc["algorithm"]["color"], "#ff7f0e");
    let points = doc["points"].as_array().expect("points");
    assert_eq!(points.len(), 3);
    for (idx, point) in points.iter().enumerate() {
        let d = 2.0 + idx as f64;
        assert_eq!(point["sweep_value"], d);
        assert_eq!(point["median"], d + 2.0 - 1.0);
        assert_eq!(point["err_lo"], 2.0);
        assert_eq!(point["err_hi"], 2.0);
    }
}

#[test]
fn e2e_shift_sweep_uses_configured_pattern() {
    let _log = test_log("e2e_shift_sweep_uses_configured_pattern");
    let workspace = SweepWorkspace::new();
    workspace.write_config("shift-pattern: \"{bench}-s{value}\"\n");
    for (bench, last) in [("schwefel", 1.0), ("schwefel-s10", 3.0)] {
        workspace.write_runs(&key(Algorithm::PlantPropagation, bench, 2), &[vec![last]]);
    }

    let run = workspace.run([
        "shifts", "--bench", "schwefel", "--shift", "0", "10", "--alg", "ppa", "--cap", "1",
        "--json",
    ]);
    assert!(run.status.success(), "shifts failed: {}", run.stderr);
    let docs = run.json();
    let points = docs[0]["points"].as_array().expect("points");
    assert_eq!(points[0]["median"], 1.0);
    assert_eq!(points[1]["median"], 3.0);
    assert_eq!(docs[0]["dims"], 2);
}

#[test]
fn e2e_compare_reports_all_tests() {
    let _log = test_log("e2e_compare_reports_all_tests");
    let workspace = SweepWorkspace::new();
    let runs_a: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i)]).collect();
    let runs_b: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i) * 3.0 + 50.0]).collect();
    workspace.write_runs(&key(Algorithm::Fireworks, "sphere", 2), &runs_a);
    workspace.write_runs(&key(Algorithm::Fireworks, "sphere_shift_100", 2), &runs_b);

    let run = workspace.run([
        "compare", "--alg", "fwa", "--bench", "sphere", "--against", "sphere_shift_100", "--cap",
        "1", "--json",
    ]);
    assert!(run.status.success(), "compare failed: {}", run.stderr);
    let doc = run.json();
    assert_eq!(doc["paired"], true);
    assert_eq!(doc["a"]["values"].as_array().map(Vec::len), Some(10));
    assert_eq!(doc["b"]["group"]["key"]["benchmark"], "sphere_shift_100");
    assert_eq!(doc["report"]["signed_rank"]["kind"], "signed_rank");
    assert_eq!(doc["report"]["signed_rank"]["method"], "exact");
    assert_eq!(doc["report"]["rank_sum"]["kind"], "rank_sum");
    assert_eq!(doc["report"]["u_test"]["statistic"], 0.0);

    let text = workspace.run([
        "compare", "--alg", "fwa", "--bench", "sphere", "--against", "sphere", "--cap", "1",
    ]);
    assert!(text.status.success(), "compare failed: {}", text.stderr);
    assert!(text.stdout.contains("(degenerate)"));
    assert!(text.stderr.contains("same run"));
}

#[test]
fn e2e_times_pools_configured_benchmarks() {
    let _log = test_log("e2e_times_pools_configured_benchmarks");
    let workspace = SweepWorkspace::new();
    workspace.write_config("benchmarks: [sphere, ackley]\ndims:\n  min: 2\n  max: 6\n");
    for bench in ["sphere", "ackley"] {
        for dims in 2..=6 {
            let d = f64::from(dims);
            workspace.write_timings(
                &key(Algorithm::PlantPropagation, bench, dims),
                &[3.0 * d + 1.0, 3.0 * d + 1.0],
            );
        }
    }

    let run = workspace.run(["times", "--alg", "ppa", "--json"]);
    assert!(run.status.success(), "times failed: {}", run.stderr);
    let doc = run.json();
    let report = &doc["reports"][0];
    assert_eq!(report["display_name"], "Plant Propagation");
    assert_eq!(report["samples"], 20);
    assert_eq!(report["per_dimension"].as_array().map(Vec::len), Some(5));
    let slope = report["regression"]["slope"].as_f64().expect("slope");
    assert!((slope - 3.0).abs() < 1e-9);

    let plain = workspace.run(["times", "--alg", "ppa"]);
    assert!(plain.status.success(), "times failed: {}", plain.stderr);
    assert!(plain.stdout.contains("  dims 2: n=4 mean=7.000000 std=0.000000"));
    assert!(plain.stdout.contains("  fit: time = 3.000000 * dims + "));
}

#[test]
fn e2e_times_without_benchmarks_is_config_error() {
    let _log = test_log("e2e_times_without_benchmarks_is_config_error");
    let workspace = SweepWorkspace::new();
    let run = workspace.run(["times", "--json"]);
    assert_eq!(run.status.code(), Some(7));
    assert!(run.stderr.contains("\"code\": \"CONFIG_ERROR\""));
    assert!(run.stderr.contains("--bench"));
}

#[test]
fn e2e_config_precedence() {
    let _log = test_log("e2e_config_precedence");
    let workspace = SweepWorkspace::new();
    workspace.write_config("cap: 300\nversion: YAML\nworkers: 2\n");

    let yaml_only = workspace.run(["config", "--json"]);
    assert!(yaml_only.status.success(), "config failed: {}", yaml_only.stderr);
    let doc = yaml_only.json();
    assert_eq!(doc["cap"], 300);
    assert_eq!(doc["version"], "YAML");
    assert_eq!(doc["workers"], 2);

    let with_env = workspace.run_with_env(
        ["config", "--json", "--version-tag", "CLI"],
        [("SWEEP_STATS_CAP", "400"), ("SWEEP_STATS_VERSION", "ENV")],
    );
    assert!(with_env.status.success(), "config failed: {}", with_env.stderr);
    let doc = with_env.json();
    assert_eq!(doc["cap"], 400);
    assert_eq!(doc["version"], "CLI");
    assert_eq!(doc["dims_min"], 2);

    let plain = workspace.run(["config"]);
    assert!(plain.stdout.lines().any(|line| line == "cap: 300"));
    assert!(plain.stdout.lines().any(|line| line == "workers: 2"));
}

#[test]
fn e2e_invalid_config_value_exits_with_config_code() {
    let _log = test_log("e2e_invalid_config_value_exits_with_config_code");
    let workspace = SweepWorkspace::new();
    let run = workspace.run_with_env(["config"], [("SWEEP_STATS_CAP", "0")]);
    assert_eq!(run.status.code(), Some(7));
    assert!(run.stderr.contains("CONFIG_ERROR"));
}

#[test]
fn e2e_missing_run_exits_with_storage_code() {
    let _log = test_log("e2e_missing_run_exits_with_storage_code");
    let workspace = SweepWorkspace::new();
    let run = workspace.run(["curve", "--bench", "nothing", "--dims", "2", "--alg", "fwa", "--json"]);
    assert_eq!(run.status.code(), Some(2));
    let structured = predicate::str::contains("\"code\": \"NOT_FOUND\"")
        .and(predicate::str::contains("Regenerate"))
        .and(predicate::str::contains("Fireworks_DEFAULT"));
    assert!(structured.eval(&run.stderr), "stderr: {}", run.stderr);
}

#[test]
fn e2e_unknown_algorithm_is_rejected() {
    let _log = test_log("e2e_unknown_algorithm_is_rejected");
    let workspace = SweepWorkspace::new();
    let run = workspace.run(["curve", "--bench", "sphere", "--dims", "2", "--alg", "pso"]);
    assert!(!run.status.success());
    assert!(predicate::str::contains("unknown algorithm 'pso'").eval(&run.stderr));
}

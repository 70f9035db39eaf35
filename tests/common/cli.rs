use super::{write_runs, write_timings};
use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;
use sweep_stats::model::RunKey;
use tempfile::TempDir;

#[derive(Debug)]
pub struct CliRun {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CliRun {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("parse json stdout")
    }
}

/// Project directory holding `sweep-stats.yaml` and a `data/` record tree.
pub struct SweepWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub data_root: PathBuf,
}

impl SweepWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let data_root = root.join("data");
        fs::create_dir_all(&data_root).expect("data dir");
        Self {
            _temp_dir: temp_dir,
            root,
            data_root,
        }
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(self.root.join("sweep-stats.yaml"), yaml).expect("write config");
    }

    pub fn write_runs(&self, key: &RunKey, runs: &[Vec<f64>]) {
        write_runs(&self.data_root, key, runs);
    }

    pub fn write_timings(&self, key: &RunKey, elapsed: &[f64]) {
        write_timings(&self.data_root, key, elapsed);
    }

    pub fn run<I, S>(&self, args: I) -> CliRun
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.run_with_env(args, std::iter::empty::<(&str, &str)>())
    }

    /// Run the binary from the workspace root with `NO_COLOR` set, so human
    /// output takes the plain path.
    pub fn run_with_env<I, S, E, K, V>(&self, args: I, env_vars: E) -> CliRun
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
        E: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let output = Command::new(assert_cmd::cargo::cargo_bin!("sweep-stats"))
            .current_dir(&self.root)
            .args(args)
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "sweep_stats=debug")
            .env("HOME", &self.root)
            .envs(env_vars)
            .output()
            .expect("run sweep-stats");

        CliRun {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

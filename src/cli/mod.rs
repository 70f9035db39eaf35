//! CLI definitions and entry point.

use crate::model::Algorithm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Aggregate and compare repeated optimizer benchmark traces
#[derive(Parser, Debug)]
#[command(name = "sweep-stats", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Root of the record tree (default: data)
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    /// Version tag of the runs to read (default: DEFAULT)
    #[arg(long = "version-tag", global = true)]
    pub version_tag: Option<String>,

    /// Canonical evaluation budget (default: 10000)
    #[arg(long, global = true)]
    pub cap: Option<usize>,

    /// Append JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Median and percentile bands per evaluation
    Curve(CurveArgs),

    /// Terminal values across the dimensionality range
    Dims(DimsArgs),

    /// Terminal values across shift magnitudes
    Shifts(ShiftsArgs),

    /// Nonparametric tests between two groups of terminal values
    Compare(CompareArgs),

    /// Runtime cost per dimensionality and its linear fit
    Times(TimesArgs),

    /// Show the resolved configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    /// Benchmark ids (repeatable)
    #[arg(long = "bench", required = true, num_args = 1..)]
    pub benches: Vec<String>,

    /// Dimensionality
    #[arg(long)]
    pub dims: u32,

    /// Algorithms (fwa, ppa); all when omitted
    #[arg(long = "alg", num_args = 1..)]
    pub algs: Vec<Algorithm>,

    /// Subtracted from every value before summarizing
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub correction: f64,

    /// Write one CSV per curve into this directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DimsArgs {
    /// Benchmark id
    #[arg(long)]
    pub bench: String,

    /// Algorithms (fwa, ppa); all when omitted
    #[arg(long = "alg", num_args = 1..)]
    pub algs: Vec<Algorithm>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub correction: f64,

    /// Lowest dimensionality (default: dims.min)
    #[arg(long)]
    pub min_dims: Option<u32>,

    /// Highest dimensionality (default: dims.max)
    #[arg(long)]
    pub max_dims: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct ShiftsArgs {
    /// Base benchmark id
    #[arg(long)]
    pub bench: String,

    /// Shift magnitudes in plot order (repeatable); 0 is the base benchmark
    #[arg(long = "shift", required = true, num_args = 1.., allow_negative_numbers = true)]
    pub shifts: Vec<f64>,

    #[arg(long, default_value_t = 2)]
    pub dims: u32,

    #[arg(long = "alg", num_args = 1..)]
    pub algs: Vec<Algorithm>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub correction: f64,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Algorithm of both groups
    #[arg(long)]
    pub alg: Algorithm,

    /// Benchmark of the first group
    #[arg(long)]
    pub bench: String,

    /// Benchmark of the second group
    #[arg(long)]
    pub against: String,

    /// Dimensionality of the first group
    #[arg(long, default_value_t = 2)]
    pub dims: u32,

    /// Dimensionality of the second group (default: --dims)
    #[arg(long)]
    pub against_dims: Option<u32>,

    /// Skip the signed-rank test and do not pair repetitions
    #[arg(long)]
    pub unpaired: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TimesArgs {
    /// Algorithms (fwa, ppa); all when omitted
    #[arg(long = "alg", num_args = 1..)]
    pub algs: Vec<Algorithm>,

    /// Benchmarks to pool (default: the configured benchmark list)
    #[arg(long = "bench", num_args = 1..)]
    pub benches: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_curve_with_aliases_and_negative_correction() {
        let cli = Cli::try_parse_from([
            "sweep-stats",
            "curve",
            "--bench",
            "sphere",
            "ackley",
            "--dims",
            "4",
            "--alg",
            "ppa",
            "--correction",
            "-1.5",
            "--json",
        ])
        .expect("parse");
        assert!(cli.json);
        let Commands::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.benches, vec!["sphere", "ackley"]);
        assert_eq!(args.algs, vec![Algorithm::PlantPropagation]);
        assert_eq!(args.correction, -1.5);
    }

    #[test]
    fn parse_rejects_unknown_algorithm() {
        let result = Cli::try_parse_from([
            "sweep-stats",
            "dims",
            "--bench",
            "sphere",
            "--alg",
            "bees",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "sweep-stats",
            "config",
            "--data-root",
            "/tmp/runs",
            "--version-tag",
            "V2",
            "--cap",
            "500",
        ])
        .expect("parse");
        assert_eq!(cli.data_root, Some(PathBuf::from("/tmp/runs")));
        assert_eq!(cli.version_tag.as_deref(), Some("V2"));
        assert_eq!(cli.cap, Some(500));
    }
}

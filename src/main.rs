use clap::Parser;
use std::io::{self, IsTerminal};
use sweep_stats::cli::commands;
use sweep_stats::cli::{Cli, Commands};
use sweep_stats::config::{self, AnalysisConfig};
use sweep_stats::logging::init_logging;
use sweep_stats::output::OutputContext;
use sweep_stats::{StructuredError, SweepError};
use tracing::{debug, warn};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(&cli) {
        handle_error(&e, cli.json);
    }
}

fn run(cli: &Cli) -> sweep_stats::Result<()> {
    let overrides = build_cli_overrides(cli);
    let project_dir = std::env::current_dir()?;
    let layer = config::load_config(&project_dir, &overrides)?;
    let config = AnalysisConfig::from_layer(&layer)?;
    debug!(?config, "Resolved configuration");
    configure_workers(config.workers);

    let ctx = OutputContext::from_flags(cli.json, cli.quiet, cli.no_color);

    match &cli.command {
        Commands::Curve(args) => commands::curve::execute(args, &ctx, &config),
        Commands::Dims(args) => commands::dims::execute(args, &ctx, &config),
        Commands::Shifts(args) => commands::shifts::execute(args, &ctx, &config),
        Commands::Compare(args) => commands::compare::execute(args, &ctx, &config),
        Commands::Times(args) => commands::times::execute(args, &ctx, &config),
        Commands::Config => commands::config::execute(&ctx, &config),
    }
}

/// Size the global rayon pool; `0` keeps rayon's default.
fn configure_workers(workers: usize) {
    if workers == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
    {
        warn!(workers, error = %e, "Could not size worker pool");
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &SweepError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        data_root: cli.data_root.clone(),
        version: cli.version_tag.clone(),
        cap: cli.cap,
    }
}

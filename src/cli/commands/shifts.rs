use super::{emit, resolve_algorithms};
use crate::analysis::{SweepAxis, run_sweep, shift_points};
use crate::cli::ShiftsArgs;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::format::{SweepDocument, format_sweep};
use crate::model::RunKey;
use crate::output::{OutputContext, SweepTable};
use crate::storage::FsRepository;
use crate::util::progress::SweepProgress;
use chrono::Utc;
use tracing::debug;

/// Execute the shifts command.
///
/// # Errors
///
/// Returns an error if any shifted variant has no readable runs.
pub fn execute(args: &ShiftsArgs, ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    let repo = FsRepository::new(&config.data_root);
    let mut docs = Vec::new();
    for alg in resolve_algorithms(&args.algs) {
        let base = RunKey::new(alg, args.bench.as_str(), config.version.as_str(), args.dims);
        let points = shift_points(&base, &args.shifts, &config.shift_pattern);
        for (shift, key) in &points {
            debug!(shift, %key, "Shift sweep point");
        }

        let progress = SweepProgress::new(points.len(), &format!("{} shift sweep", alg.display_name()));
        let result = run_sweep(&repo, &points, config.cap, args.correction, || progress.tick());
        progress.finish_and_clear();

        docs.push(SweepDocument {
            generated_at: Utc::now(),
            axis: SweepAxis::Shift,
            algorithm: alg.into(),
            benchmark: args.bench.clone(),
            version: config.version.clone(),
            dims: Some(args.dims),
            cap: config.cap,
            correction: args.correction,
            points: result?,
        });
    }

    emit(
        ctx,
        docs.as_slice(),
        |docs, ctx| {
            for doc in docs {
                ctx.render(&SweepTable::new(doc, ctx.theme()).build());
            }
        },
        |docs| docs.iter().map(format_sweep).collect::<Vec<_>>().join("\n"),
    )
}

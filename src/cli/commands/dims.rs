use super::{emit, resolve_algorithms};
use crate::analysis::{SweepAxis, dims_points, run_sweep};
use crate::cli::DimsArgs;
use crate::config::AnalysisConfig;
use crate::error::{Result, SweepError};
use crate::format::{SweepDocument, format_sweep};
use crate::model::RunKey;
use crate::output::{OutputContext, SweepTable};
use crate::storage::FsRepository;
use crate::util::progress::SweepProgress;
use chrono::Utc;

/// Execute the dims command.
///
/// # Errors
///
/// Returns an error if the range is empty or any dimensionality in it has no
/// readable runs.
pub fn execute(args: &DimsArgs, ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    let min = args.min_dims.unwrap_or(config.dims_min);
    let max = args.max_dims.unwrap_or(config.dims_max);
    if min > max {
        return Err(SweepError::invalid_input(format!(
            "empty dimensionality range {min}..={max}"
        )));
    }

    let repo = FsRepository::new(&config.data_root);
    let mut docs = Vec::new();
    for alg in resolve_algorithms(&args.algs) {
        let base = RunKey::new(alg, args.bench.as_str(), config.version.as_str(), min);
        let points = dims_points(&base, min..=max);

        let progress = SweepProgress::new(points.len(), &format!("{} dims sweep", alg.display_name()));
        let result = run_sweep(&repo, &points, config.cap, args.correction, || progress.tick());
        progress.finish_and_clear();

        docs.push(SweepDocument {
            generated_at: Utc::now(),
            axis: SweepAxis::Dimensionality,
            algorithm: alg.into(),
            benchmark: args.bench.clone(),
            version: config.version.clone(),
            dims: None,
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

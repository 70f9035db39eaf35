use super::{emit, resolve_algorithms};
use crate::analysis::{cost_report, timing_keys};
use crate::cli::TimesArgs;
use crate::config::AnalysisConfig;
use crate::error::{Result, SweepError};
use crate::format::{CostDocument, format_cost};
use crate::output::{CostTable, OutputContext, fit_panel};
use crate::storage::FsRepository;
use crate::util::progress::SweepProgress;
use chrono::Utc;

/// Execute the times command.
///
/// # Errors
///
/// Returns an error if no benchmarks are configured, a timing log is missing
/// or unreadable, or the pooled samples cannot support a fit.
pub fn execute(args: &TimesArgs, ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    let benchmarks = if args.benches.is_empty() {
        config.benchmarks.clone()
    } else {
        args.benches.clone()
    };
    if benchmarks.is_empty() {
        return Err(SweepError::Config(
            "no benchmarks to pool: pass --bench or set 'benchmarks'".to_string(),
        ));
    }

    let repo = FsRepository::new(&config.data_root);
    let mut reports = Vec::new();
    for alg in resolve_algorithms(&args.algs) {
        let keys = timing_keys(alg, &config.version, &benchmarks, config.dims_range());
        let progress = SweepProgress::new(keys.len(), &format!("{} timing logs", alg.display_name()));
        let report = cost_report(&repo, alg, &keys, || progress.tick());
        progress.finish_and_clear();
        reports.push(report?.into());
    }

    let doc = CostDocument {
        generated_at: Utc::now(),
        version: config.version.clone(),
        benchmarks,
        dims_min: config.dims_min,
        dims_max: config.dims_max,
        reports,
    };
    emit(
        ctx,
        &doc,
        |doc, ctx| {
            let theme = ctx.theme();
            for entry in &doc.reports {
                ctx.render(&CostTable::new(entry, doc.benchmarks.len(), theme).build());
                ctx.render(&fit_panel(entry, theme));
            }
        },
        format_cost,
    )
}

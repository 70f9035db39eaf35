use super::emit;
use crate::analysis::{ComparisonGroup, compare_groups};
use crate::cli::CompareArgs;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::format::{ComparisonDocument, format_comparison};
use crate::model::RunKey;
use crate::output::{OutputContext, comparison_table};
use crate::storage::FsRepository;
use chrono::Utc;

/// Build both comparison groups, each addressed by its own run key.
#[must_use]
pub fn groups(args: &CompareArgs, version: &str) -> (ComparisonGroup, ComparisonGroup) {
    let a = RunKey::new(args.alg, args.bench.as_str(), version, args.dims);
    let b = RunKey::new(
        args.alg,
        args.against.as_str(),
        version,
        args.against_dims.unwrap_or(args.dims),
    );
    (
        ComparisonGroup::new(format!("{}/{}d", a.benchmark, a.dims), a),
        ComparisonGroup::new(format!("{}/{}d", b.benchmark, b.dims), b),
    )
}

/// Execute the compare command.
///
/// # Errors
///
/// Returns an error if either group cannot be loaded or a paired comparison
/// finds different repetition ids.
pub fn execute(args: &CompareArgs, ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    let repo = FsRepository::new(&config.data_root);
    let (a, b) = groups(args, &config.version);
    let paired = !args.unpaired;

    let comparison = compare_groups(&repo, &a, &b, config.cap, paired)?;
    let doc = ComparisonDocument {
        generated_at: Utc::now(),
        algorithm: args.alg.into(),
        cap: config.cap,
        paired,
        comparison,
    };

    emit(
        ctx,
        &doc,
        |doc, ctx| ctx.render(&comparison_table(doc, ctx.theme())),
        format_comparison,
    )
}

use super::{emit, resolve_algorithms};
use crate::analysis::{align, load_many_with_progress, summarize};
use crate::cli::CurveArgs;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::format::{CurveDocument, csv, format_curve};
use crate::model::RunKey;
use crate::output::{CurveTable, OutputContext};
use crate::storage::FsRepository;
use crate::util::progress::SweepProgress;
use chrono::Utc;
use rich_rust::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of an exported curve.
#[must_use]
pub fn curve_file_name(key: &RunKey) -> String {
    format!(
        "{}_{}_{}d.csv",
        key.algorithm.storage_name(),
        key.benchmark,
        key.dims
    )
}

fn export_curve(dir: &Path, doc: &CurveDocument) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(curve_file_name(&doc.key));
    let mut writer = BufWriter::new(File::create(&path)?);
    csv::write_curve(&mut writer, &doc.curve)?;
    writer.flush()?;
    Ok(path)
}

/// Execute the curve command.
///
/// # Errors
///
/// Returns an error if any requested run is missing or unreadable, or an
/// export file cannot be written.
pub fn execute(args: &CurveArgs, ctx: &OutputContext, config: &AnalysisConfig) -> Result<()> {
    let repo = FsRepository::new(&config.data_root);
    let keys: Vec<RunKey> = resolve_algorithms(&args.algs)
        .into_iter()
        .flat_map(|alg| {
            args.benches
                .iter()
                .map(move |bench| RunKey::new(alg, bench.as_str(), config.version.as_str(), args.dims))
        })
        .collect();

    let progress = SweepProgress::new(keys.len(), "Loading runs");
    let sets = load_many_with_progress(&repo, &keys, || progress.tick());
    progress.finish_and_clear();
    let sets = sets?;

    let mut docs = Vec::with_capacity(sets.len());
    for set in &sets {
        let grid = align(set, config.cap).corrected(args.correction);
        let mut doc = CurveDocument {
            generated_at: Utc::now(),
            key: set.key.clone(),
            algorithm: set.key.algorithm.into(),
            repetitions: set.len(),
            cap: config.cap,
            correction: args.correction,
            output_path: None,
            curve: summarize(&grid),
        };
        if let Some(dir) = &args.out {
            let path = export_curve(dir, &doc)?;
            info!(key = %doc.key, path = %path.display(), "Exported curve");
            doc.output_path = Some(path);
        }
        docs.push(doc);
    }

    emit(
        ctx,
        docs.as_slice(),
        |docs, ctx| {
            let theme = ctx.theme();
            for doc in docs {
                ctx.render(&CurveTable::new(doc, theme).build());
                if let Some(path) = &doc.output_path {
                    let line = format!("written to {}", path.display());
                    ctx.render(&Text::styled(&line, theme.dimmed.clone()));
                }
            }
        },
        |docs| docs.iter().map(format_curve).collect::<Vec<_>>().join("\n"),
    )
}

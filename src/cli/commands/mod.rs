//! Subcommand implementations.
//!
//! Each command resolves its run keys from the arguments and the resolved
//! configuration, runs the analysis through an [`FsRepository`], and prints
//! JSON, rich tables or plain text to stdout.
//!
//! [`FsRepository`]: crate::storage::FsRepository

pub mod compare;
pub mod config;
pub mod curve;
pub mod dims;
pub mod shifts;
pub mod times;

use crate::error::Result;
use crate::model::Algorithm;
use crate::output::{OutputContext, OutputMode};
use serde::Serialize;

/// Print a document in the context's mode.
///
/// JSON mode serializes `doc`; rich mode hands it to `rich`, which renders
/// tables; plain mode prints the text from `plain`. Quiet prints nothing.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn emit<T, R, P>(ctx: &OutputContext, doc: &T, rich: R, plain: P) -> Result<()>
where
    T: Serialize + ?Sized,
    R: FnOnce(&T, &OutputContext),
    P: FnOnce(&T) -> String,
{
    match ctx.mode() {
        OutputMode::Json => ctx.json_pretty(doc)?,
        OutputMode::Rich => rich(doc, ctx),
        OutputMode::Plain => ctx.plain(&plain(doc)),
        OutputMode::Quiet => {}
    }
    Ok(())
}

/// Requested algorithms, or all of them when none were named.
#[must_use]
pub fn resolve_algorithms(requested: &[Algorithm]) -> Vec<Algorithm> {
    if requested.is_empty() {
        return Algorithm::ALL.to_vec();
    }
    let mut algorithms = Vec::with_capacity(requested.len());
    for alg in requested {
        if !algorithms.contains(alg) {
            algorithms.push(*alg);
        }
    }
    algorithms
}

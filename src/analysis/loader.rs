//! Series loader: turns a run key into its repetition set.

use crate::error::{Result, SweepError};
use crate::model::{RepetitionSet, RunKey};
use crate::storage::Repository;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Load every repetition recorded for `key`.
///
/// # Errors
///
/// Returns `NotFound` if the key has no repetitions, and propagates the first
/// read or parse failure. There is no partial result.
pub fn load<R: Repository + ?Sized>(repo: &R, key: &RunKey) -> Result<RepetitionSet> {
    let ids = repo.list_repetitions(key)?;
    if ids.is_empty() {
        return Err(SweepError::NotFound {
            path: PathBuf::from(key.to_string()),
        });
    }

    let mut repetitions = Vec::with_capacity(ids.len());
    for id in ids {
        let series = repo.read_series(key, id)?;
        debug!(%key, repetition = id, records = series.len(), "Loaded repetition");
        repetitions.push((id, series));
    }

    Ok(RepetitionSet::new(key.clone(), repetitions))
}

/// Load many keys in parallel, results in `keys` order.
///
/// # Errors
///
/// Returns the first failure in `keys` order.
pub fn load_many<R: Repository + ?Sized>(repo: &R, keys: &[RunKey]) -> Result<Vec<RepetitionSet>> {
    load_many_with_progress(repo, keys, || {})
}

/// Like [`load_many`], calling `on_loaded` once per finished key.
///
/// # Errors
///
/// Returns the first failure in `keys` order.
pub fn load_many_with_progress<R, F>(
    repo: &R,
    keys: &[RunKey],
    on_loaded: F,
) -> Result<Vec<RepetitionSet>>
where
    R: Repository + ?Sized,
    F: Fn() + Sync,
{
    keys.par_iter()
        .map(|key| {
            let set = load(repo, key);
            on_loaded();
            set
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

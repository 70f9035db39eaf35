//! Result addressing: where a run key's records live.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/<algorithm>_<version>/<benchmark>/<dims>d/<repetition>.csv
//! <root>/<algorithm>_<version>/<benchmark>/<dims>d/time.csv
//! ```
//!
//! Everything here is pure path arithmetic; a missing directory surfaces
//! later as `NotFound` from the repository.

use crate::model::RunKey;
use std::path::{Path, PathBuf};

/// Extension of record files and the timing log.
pub const RECORD_EXTENSION: &str = "csv";

/// File stem of the per-key timing log.
pub const TIMING_STEM: &str = "time";

/// Directory holding every repetition of `key`.
#[must_use]
pub fn address(root: &Path, key: &RunKey) -> PathBuf {
    root.join(format!("{}_{}", key.algorithm.storage_name(), key.version))
        .join(&key.benchmark)
        .join(format!("{}d", key.dims))
}

/// Record file of one repetition inside a key's location.
#[must_use]
pub fn repetition_location(location: &Path, repetition: u32) -> PathBuf {
    location.join(format!("{repetition}.{RECORD_EXTENSION}"))
}

/// Timing log inside a key's location.
#[must_use]
pub fn timing_location(location: &Path) -> PathBuf {
    location.join(format!("{TIMING_STEM}.{RECORD_EXTENSION}"))
}

/// Repetition id encoded in a record file name, if it is one.
///
/// Only `<positive integer>.csv` qualifies; the timing log and any other
/// auxiliary file yield `None`.
#[must_use]
pub fn parse_repetition_file(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(RECORD_EXTENSION)?.strip_suffix('.')?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse::<u32>().ok().filter(|id| *id >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Algorithm;

    #[test]
    fn test_address_layout() {
        let key = RunKey::new(Algorithm::PlantPropagation, "ackley", "DEFAULT", 30);
        let location = address(Path::new("data"), &key);
        assert_eq!(location, PathBuf::from("data/PlantPropagation_DEFAULT/ackley/30d"));
        assert_eq!(
            repetition_location(&location, 7),
            PathBuf::from("data/PlantPropagation_DEFAULT/ackley/30d/7.csv")
        );
        assert_eq!(
            timing_location(&location),
            PathBuf::from("data/PlantPropagation_DEFAULT/ackley/30d/time.csv")
        );
    }

    #[test]
    fn test_parse_repetition_file() {
        assert_eq!(parse_repetition_file("1.csv"), Some(1));
        assert_eq!(parse_repetition_file("12.csv"), Some(12));
        assert_eq!(parse_repetition_file("time.csv"), None);
        assert_eq!(parse_repetition_file("0.csv"), None);
        assert_eq!(parse_repetition_file("-3.csv"), None);
        assert_eq!(parse_repetition_file("3.txt"), None);
        assert_eq!(parse_repetition_file(".csv"), None);
        assert_eq!(parse_repetition_file("3csv"), None);
    }
}

//! Filesystem-backed repository over the record tree.

use super::Repository;
use super::layout::{address, parse_repetition_file, repetition_location, timing_location};
use crate::error::{Result, SweepError};
use crate::format::csv;
use crate::model::{RunKey, Series, TimingSample};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Repository rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

fn open_for_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SweepError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SweepError::Io(e)
        }
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl FsRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every repetition of `key`.
    #[must_use]
    pub fn location(&self, key: &RunKey) -> PathBuf {
        address(&self.root, key)
    }

    /// Write one repetition's record file, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_series(&self, key: &RunKey, repetition: u32, series: &Series) -> Result<PathBuf> {
        let path = repetition_location(&self.location(key), repetition);
        ensure_parent(&path)?;

        let mut writer = BufWriter::new(File::create(&path)?);
        csv::write_series(&mut writer, series)?;
        writer.flush()?;

        debug!(path = %path.display(), records = series.len(), "Wrote record file");
        Ok(path)
    }

    /// Append one sample to the key's timing log.
    ///
    /// The header is written whenever the log is created or still empty, so
    /// the log stays well-formed no matter which repetition finishes first.
    /// Concurrent appenders to the same log are not coordinated.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be opened or written.
    pub fn append_timing(&self, key: &RunKey, sample: &TimingSample) -> Result<PathBuf> {
        let path = timing_location(&self.location(key));
        ensure_parent(&path)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let needs_header = file.metadata()?.len() == 0;
        let mut writer = BufWriter::new(file);
        if needs_header {
            csv::write_header(&mut writer, csv::TIMING_FIELDS)?;
        }
        writeln!(writer, "{}", csv::format_timing_row(sample))?;
        writer.flush()?;

        trace!(path = %path.display(), header = needs_header, "Appended timing sample");
        Ok(path)
    }
}

impl Repository for FsRepository {
    fn list_repetitions(&self, key: &RunKey) -> Result<Vec<u32>> {
        let location = self.location(key);
        let entries = fs::read_dir(&location).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SweepError::NotFound {
                    path: location.clone(),
                }
            } else {
                SweepError::Io(e)
            }
        })?;

        let mut repetitions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(parse_repetition_file) {
                repetitions.push(id);
            }
        }
        repetitions.sort_unstable();

        debug!(%key, count = repetitions.len(), "Listed repetitions");
        Ok(repetitions)
    }

    fn read_series(&self, key: &RunKey, repetition: u32) -> Result<Series> {
        let path = repetition_location(&self.location(key), repetition);
        let file = open_for_read(&path)?;
        csv::read_series(&path, BufReader::new(file))
    }

    fn read_timing_log(&self, key: &RunKey) -> Result<Vec<TimingSample>> {
        let path = timing_location(&self.location(key));
        let file = open_for_read(&path)?;
        csv::read_timing_log(&path, BufReader::new(file), key.algorithm, key.dims)
    }
}

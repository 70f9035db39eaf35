//! CSV codec for record files, timing logs and exported curves.
//!
//! Record files and timing logs are plain comma-delimited text with a single
//! header row. Fields are numeric, so no quoting is ever needed; readers trim
//! whitespace around fields so `a, b` and `a,b` headers are equivalent.

use crate::analysis::SummaryCurve;
use crate::error::{Result, SweepError};
use crate::model::{Algorithm, EvaluationRecord, Series, TimingSample};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Columns of a per-repetition record file, in write order.
pub const RECORD_FIELDS: &[&str] = &["evaluation", "value", "curbest", "generation"];

/// Columns of a timing log, in write order.
pub const TIMING_FIELDS: &[&str] = &["Time", "Total_Evaluations"];

/// Columns of an exported summary curve.
pub const CURVE_FIELDS: &[&str] = &["evaluation", "n", "median", "p0", "p25", "p75", "p100"];

/// Split one delimited row into trimmed fields.
#[must_use]
pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Write a header row to the given writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_header<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let header = fields.join(",");
    writeln!(writer, "{header}")
}

fn parse_f64(path: &Path, line: usize, column: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|e| {
        SweepError::parse(path, line, format!("column '{column}': '{raw}': {e}"))
    })
}

/// Integer columns may have been written as floats (`3.0`) by some producers.
fn parse_integral(path: &Path, line: usize, column: &str, raw: &str) -> Result<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    let value = parse_f64(path, line, column, raw)?;
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 9.0e15 {
        Ok(value as i64)
    } else {
        Err(SweepError::parse(
            path,
            line,
            format!("column '{column}': '{raw}' is not an integer"),
        ))
    }
}

fn column_index(path: &Path, header: &[&str], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|field| *field == column)
        .ok_or_else(|| SweepError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Parse a record file into a `Series`.
///
/// `path` is only used for error reporting.
///
/// # Errors
///
/// Returns `MissingColumn` if the header lacks a required column and `Parse`
/// if any field cannot be decoded. An empty file is a `Parse` error.
pub fn read_series<R: BufRead>(path: &Path, reader: R) -> Result<Series> {
    let mut lines = reader.lines().enumerate();

    let header_line = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(SweepError::parse(path, 1, "empty record file")),
        }
    };
    let header = split_row(&header_line);
    let idx_eval = column_index(path, &header, RECORD_FIELDS[0])?;
    let idx_value = column_index(path, &header, RECORD_FIELDS[1])?;
    let idx_best = column_index(path, &header, RECORD_FIELDS[2])?;
    let idx_gen = column_index(path, &header, RECORD_FIELDS[3])?;
    let width = header.len();

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let fields = split_row(&line);
        if fields.len() < width {
            return Err(SweepError::parse(
                path,
                line_no,
                format!("expected {width} fields, found {}", fields.len()),
            ));
        }

        let evaluation = parse_integral(path, line_no, RECORD_FIELDS[0], fields[idx_eval])?;
        let evaluation = u64::try_from(evaluation)
            .ok()
            .filter(|e| *e >= 1)
            .ok_or_else(|| {
                SweepError::parse(path, line_no, format!("evaluation index {evaluation} < 1"))
            })?;

        records.push(EvaluationRecord {
            evaluation,
            value: parse_f64(path, line_no, RECORD_FIELDS[1], fields[idx_value])?,
            best_so_far: parse_f64(path, line_no, RECORD_FIELDS[2], fields[idx_best])?,
            generation: parse_integral(path, line_no, RECORD_FIELDS[3], fields[idx_gen])?,
        });
    }

    Ok(Series::new(records))
}

/// Format a single record as a CSV row.
#[must_use]
pub fn format_record_row(record: &EvaluationRecord) -> String {
    format!(
        "{},{},{},{}",
        record.evaluation, record.value, record.best_so_far, record.generation
    )
}

/// Write a complete record file (header + rows).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_series<W: Write>(writer: &mut W, series: &Series) -> io::Result<()> {
    write_header(writer, RECORD_FIELDS)?;
    for record in &series.records {
        writeln!(writer, "{}", format_record_row(record))?;
    }
    Ok(())
}

/// Parse a timing log.
///
/// Header rows are skipped wherever they appear and a log without any header
/// is accepted: the log is appended to as repetitions finish, so completion
/// order decides where (or whether) the header landed.
///
/// # Errors
///
/// Returns `Parse` if a data row cannot be decoded.
pub fn read_timing_log<R: BufRead>(
    path: &Path,
    reader: R,
    algorithm: Algorithm,
    dims: u32,
) -> Result<Vec<TimingSample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let fields = split_row(&line);
        if line.trim().is_empty() || fields.first() == Some(&TIMING_FIELDS[0]) {
            continue;
        }
        if fields.len() < TIMING_FIELDS.len() {
            return Err(SweepError::parse(
                path,
                line_no,
                format!("expected {} fields, found {}", TIMING_FIELDS.len(), fields.len()),
            ));
        }

        let elapsed_seconds = parse_f64(path, line_no, TIMING_FIELDS[0], fields[0])?;
        let total = parse_integral(path, line_no, TIMING_FIELDS[1], fields[1])?;
        let total_evaluations = u64::try_from(total).map_err(|_| {
            SweepError::parse(path, line_no, format!("negative evaluation count {total}"))
        })?;

        samples.push(TimingSample {
            algorithm,
            dims,
            elapsed_seconds,
            total_evaluations,
        });
    }
    Ok(samples)
}

/// Format a timing sample as a CSV row.
#[must_use]
pub fn format_timing_row(sample: &TimingSample) -> String {
    format!("{},{}", sample.elapsed_seconds, sample.total_evaluations)
}

fn optional_field(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// Write a summary curve for an external renderer. Absent entries are empty.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_curve<W: Write>(writer: &mut W, curve: &SummaryCurve) -> io::Result<()> {
    write_header(writer, CURVE_FIELDS)?;
    for point in curve.points() {
        let q = point.quantiles;
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            point.evaluation,
            point.n,
            optional_field(q.map(|q| q.median)),
            optional_field(q.map(|q| q.p0)),
            optional_field(q.map(|q| q.p25)),
            optional_field(q.map(|q| q.p75)),
            optional_field(q.map(|q| q.p100)),
        )?;
    }
    Ok(())
}

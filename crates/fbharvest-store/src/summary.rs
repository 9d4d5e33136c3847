//! Summary file: one totals row per identity hash.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fbharvest_core::naming::{identity_from_triples_csv, SUMMARY_CSV};
use fbharvest_core::{aggregate_by_identity, SummaryRecord};

use crate::error::StoreError;
use crate::rows::read_triples;

/// Writes `records` with a header row to a file that must not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::SummaryExists`] when `path` is already present.
pub fn write_summary(path: &Path, records: &[SummaryRecord]) -> Result<(), StoreError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::SummaryExists(path.to_path_buf()),
            _ => StoreError::io(path, e),
        })?;

    let mut writer = csv::Writer::from_writer(file);
    if records.is_empty() {
        writer
            .write_record(["URL_HASH", "ToplamBegeni", "ToplamYorum", "ToplamPaylasim"])
            .map_err(|e| StoreError::csv(path, e))?;
    }
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}

/// Aggregates every per-account triples file in `dir` and writes
/// `dir/fbharvest-sum.csv`.
///
/// Returns the summary path and the rows written, sorted by identity hash.
///
/// # Errors
///
/// Fails on unreadable directories, malformed rows, or an existing summary.
pub fn summarize_dir(dir: &Path) -> Result<(PathBuf, Vec<SummaryRecord>), StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut rows = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(identity) = file_name.to_str().and_then(identity_from_triples_csv) else {
            continue;
        };
        let path = entry.path();
        let triples = read_triples(&path)?;
        tracing::debug!(identity, rows = triples.len(), "read triples");
        rows.extend(triples.into_iter().map(|t| (identity.to_owned(), t)));
    }

    let records = aggregate_by_identity(rows);
    let summary_path = dir.join(SUMMARY_CSV);
    write_summary(&summary_path, &records)?;
    tracing::info!(
        path = %summary_path.display(),
        accounts = records.len(),
        "summary written"
    );
    Ok((summary_path, records))
}

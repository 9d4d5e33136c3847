//! Header-less, append-only CSV row files.
//!
//! Every append encodes the complete row first and hands it to the OS in a
//! single `write_all` on an `O_APPEND` handle, so workers appending to the
//! same file never interleave partial rows.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fbharvest_core::ReactionTriple;
use serde::Serialize;

use crate::error::StoreError;

fn encode_row<T: Serialize>(path: &Path, row: &T) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .serialize(row)
        .map_err(|e| StoreError::csv(path, e))?;
    writer
        .into_inner()
        .map_err(|e| StoreError::io(path, std::io::Error::other(e.to_string())))
}

/// Appends one serialized row to `path`, creating the file if needed.
///
/// # Errors
///
/// Returns [`StoreError`] if the row cannot be encoded or written.
pub fn append_row<T: Serialize>(path: &Path, row: &T) -> Result<(), StoreError> {
    let line = encode_row(path, row)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    file.write_all(&line).map_err(|e| StoreError::io(path, e))
}

/// Appends a `url,identity_hash` mapping row.
///
/// # Errors
///
/// See [`append_row`].
pub fn append_identity(path: &Path, url: &str, identity_hash: &str) -> Result<(), StoreError> {
    append_row(path, &(url, identity_hash))
}

/// Appends a `likes,comments,shares` row.
///
/// # Errors
///
/// See [`append_row`].
pub fn append_triple(path: &Path, triple: &ReactionTriple) -> Result<(), StoreError> {
    append_row(path, triple)
}

/// Empties `path`, creating it if missing.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be opened for writing.
pub fn truncate(path: &Path) -> Result<(), StoreError> {
    File::create(path)
        .map(drop)
        .map_err(|e| StoreError::io(path, e))
}

/// Reads every `likes,comments,shares` row of a triples file in order.
///
/// # Errors
///
/// Returns [`StoreError::MalformedRow`] naming the first row that is not three
/// non-negative integers.
pub fn read_triples(path: &Path) -> Result<Vec<ReactionTriple>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;

    reader
        .deserialize::<ReactionTriple>()
        .map(|row| {
            row.map_err(|e| StoreError::MalformedRow {
                path: path.to_path_buf(),
                line: e.position().map_or(0, csv::Position::line),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn triples_append_in_order_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fbharvest_abc.csv");

        append_triple(&path, &ReactionTriple::new(45, 12, 3)).unwrap();
        append_triple(&path, &ReactionTriple::new(0, 0, 0)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "45,12,3\n0,0,0\n");
        assert_eq!(
            read_triples(&path).unwrap(),
            vec![ReactionTriple::new(45, 12, 3), ReactionTriple::ZERO]
        );
    }

    #[test]
    fn identity_rows_quote_when_needed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("url-hash.csv");

        append_identity(&path, "https://www.facebook.com/a", "h1").unwrap();
        append_identity(&path, "https://www.facebook.com/b,c", "h2").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "https://www.facebook.com/a,h1\n\"https://www.facebook.com/b,c\",h2\n"
        );
    }

    #[test]
    fn truncate_clears_previous_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("url-hash.csv");
        append_identity(&path, "https://x.test/", "h").unwrap();

        truncate(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        let fresh = dir.path().join("new.csv");
        truncate(&fresh).unwrap();
        assert!(fresh.exists());
    }

    #[test]
    fn malformed_row_is_reported_with_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "1,2,3\n4,x,6\n").unwrap();

        match read_triples(&path).unwrap_err() {
            StoreError::MalformedRow { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_triples(&dir.path().join("absent.csv")).is_err());
    }
}

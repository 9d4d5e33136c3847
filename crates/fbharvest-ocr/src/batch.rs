//! Offline reconciliation over a directory of reaction captures.
//!
//! Captures are processed in file-name order, which is also capture order,
//! so row `n` of an account's OCR triples file lines up with row `n` of its
//! DOM triples file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fbharvest_core::naming::{parse_reaction_capture, triples_csv};
use fbharvest_core::ReactionTriple;
use fbharvest_store::{append_triple, truncate};

use crate::error::{OcrError, ParseError};
use crate::parser::ReactionParser;
use crate::recognizer::TextRecognizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub file: String,
    pub error: ParseError,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub processed: usize,
    pub parsed: usize,
    /// Captures whose text did not parse; each got a zero row.
    pub failures: Vec<ParseFailure>,
    /// PNG files that are not reaction captures.
    pub skipped: Vec<String>,
}

/// Recognizes every capture in `dir`, dumps the raw text next to it, and
/// appends one triple per capture to `dir/fbharvest_<hash>.csv`.
///
/// Each account's triples file is emptied when its first capture comes up,
/// so running the batch again rewrites the file instead of extending it.
///
/// A parse failure still appends a zero triple so row positions stay aligned;
/// the failure is recorded in the report.
///
/// # Errors
///
/// Fails on directory or file i/o, or when the recognizer itself cannot run.
pub async fn reconcile_dir<R>(
    dir: &Path,
    recognizer: &R,
    parser: &ReactionParser,
) -> Result<ReconcileReport, OcrError>
where
    R: TextRecognizer + ?Sized,
{
    let mut report = ReconcileReport::default();
    let mut started: HashSet<String> = HashSet::new();

    for image in list_pngs(dir).await? {
        let file = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let capture = match parse_reaction_capture(&file) {
            Ok(capture) => capture,
            Err(e) => {
                tracing::warn!(%file, error = %e, "skipping png that is not a reaction capture");
                report.skipped.push(file);
                continue;
            }
        };

        let text = recognizer.recognize(&image).await?;
        let dump = image.with_extension("txt");
        tokio::fs::write(&dump, &text)
            .await
            .map_err(|source| OcrError::Io { path: dump, source })?;

        let triple = match parser.parse(&text) {
            Ok(triple) => {
                report.parsed += 1;
                triple
            }
            Err(error) => {
                tracing::error!(%file, %error, "unparsable recognizer output");
                report.failures.push(ParseFailure { file, error });
                ReactionTriple::ZERO
            }
        };
        tracing::debug!(
            identity = %capture.identity_hash,
            sequence = capture.sequence,
            likes = triple.likes,
            comments = triple.comments,
            shares = triple.shares,
            "reconciled capture"
        );

        let triples = dir.join(triples_csv(&capture.identity_hash));
        if started.insert(capture.identity_hash.clone()) {
            truncate(&triples)?;
        }
        append_triple(&triples, &triple)?;
        report.processed += 1;
    }

    tracing::info!(
        dir = %dir.display(),
        processed = report.processed,
        failures = report.failures.len(),
        "ocr reconciliation finished"
    );
    Ok(report)
}

async fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let io_err = |source| OcrError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut pngs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            pngs.push(path);
        }
    }
    pngs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pngs)
}

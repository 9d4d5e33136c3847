//! `summary` command.

use std::path::Path;

use fbharvest_core::AppConfig;
use fbharvest_store::{summarize_dir, OutputLayout};

/// Sums the per-account triples in `dir` into its summary file.
///
/// # Errors
///
/// Returns an error for unreadable or malformed triples, or if the summary
/// file already exists.
pub(crate) fn run_summary(config: &AppConfig, dir: &Path) -> anyhow::Result<()> {
    let dir = OutputLayout::new(&config.output_dir).resolve(dir);
    let (path, records) = summarize_dir(&dir)?;

    for record in &records {
        tracing::info!(
            identity = %record.identity_hash,
            likes = record.total_likes,
            comments = record.total_comments,
            shares = record.total_shares,
            "account totals"
        );
    }
    println!(
        "wrote {} account totals to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

//! `ocr` command.

use std::path::Path;

use fbharvest_core::AppConfig;
use fbharvest_ocr::{reconcile_dir, OcrLocale, ReactionParser, TesseractCli};
use fbharvest_store::OutputLayout;

/// Recognizes every capture under `dir` and writes the OCR triples files.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, tesseract cannot run, or
/// a triples file cannot be written. Unparsable text is reported, not fatal.
pub(crate) async fn run_ocr(config: &AppConfig, dir: &Path) -> anyhow::Result<()> {
    let dir = OutputLayout::new(&config.output_dir).resolve(dir);
    let recognizer = TesseractCli::new(config.tesseract_bin.clone(), config.ocr_lang.clone());
    let parser = ReactionParser::new(OcrLocale::turkish())?;

    let report = reconcile_dir(&dir, &recognizer, &parser).await?;

    println!(
        "recognized {} captures in {}: {} parsed, {} failed",
        report.processed,
        dir.display(),
        report.parsed,
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  {}: {}", failure.file, failure.error);
    }
    Ok(())
}

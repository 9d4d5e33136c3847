//! `harvest` command.

use std::path::Path;

use anyhow::Context;
use fbharvest_core::{load_account_urls, AppConfig, DateLocale, TargetMonth};
use fbharvest_scraper::{
    harvest_with_sessions, AccountScraper, RunReport, Selectors, TraversalConfig, WebDriverPage,
};
use fbharvest_store::{truncate, OutputLayout};
use tokio_util::sync::CancellationToken;

use crate::sink::FileSink;

/// Validates inputs, opens one page session per worker and harvests every
/// listed account for `month`.
///
/// # Errors
///
/// Returns an error before any network activity for a malformed month or a
/// missing account list, if no page session can be opened, or when the run
/// was aborted by a session-wide restriction.
pub(crate) async fn run_harvest(
    config: &AppConfig,
    month: &str,
    urls_override: Option<&Path>,
) -> anyhow::Result<()> {
    let target = TargetMonth::parse(month)?;
    let urls_path = urls_override.unwrap_or(config.urls_path.as_path());
    let urls = load_account_urls(urls_path)?;
    if urls.is_empty() {
        println!("no account urls in {}", urls_path.display());
        return Ok(());
    }
    if !config.has_credentials() {
        tracing::warn!("EMAIL/PASSWORD not set; only public accounts can be harvested");
    }

    let layout = OutputLayout::new(&config.output_dir);
    layout.ensure_dirs()?;
    truncate(&layout.url_hash_csv())?;
    let sink = FileSink::new(layout);

    let workers = config.max_concurrent_accounts.clamp(1, urls.len());
    let mut scrapers = Vec::with_capacity(workers);
    for _ in 0..workers {
        let page = WebDriverPage::connect(&config.webdriver_url)
            .await
            .with_context(|| format!("failed to open page session at {}", config.webdriver_url))?;
        scrapers.push(AccountScraper::new(
            page,
            Selectors::default(),
            DateLocale::turkish(),
            TraversalConfig::from_app_config(config),
        ));
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; stopping after the current step");
            on_interrupt.cancel();
        }
    });

    tracing::info!(
        month = %target,
        accounts = urls.len(),
        workers,
        "starting harvest"
    );
    let report = harvest_with_sessions(&scrapers, &sink, &urls, &target, &cancel).await;

    for scraper in scrapers {
        if let Err(e) = scraper.into_page().close().await {
            tracing::warn!(error = %e, "failed to close page session");
        }
    }

    print_report(&target, &report);
    if report.aborted {
        anyhow::bail!("harvest aborted before all accounts were processed");
    }
    Ok(())
}

fn print_report(target: &TargetMonth, report: &RunReport) {
    println!(
        "{target}: harvested {} accounts, captured {} posts",
        report.harvested, report.posts_captured
    );
    if report.skipped_private + report.skipped_invalid + report.failed + report.post_failures > 0 {
        println!(
            "skipped {} private, {} invalid; {} accounts failed; {} posts failed to capture",
            report.skipped_private, report.skipped_invalid, report.failed, report.post_failures
        );
    }
}

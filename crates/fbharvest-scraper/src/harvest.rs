//! Per-account harvest and the multi-account run loop.

use fbharvest_core::{aggregate, SummaryRecord, TargetMonth};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::error::{ErrorScope, HarvestError};
use crate::page::Page;
use crate::scraper::{AccessStrategy, AccountScraper};
use crate::selection::SelectionReport;
use crate::task::{AccountTask, ArtifactSink, CaptureConsumer};
use crate::traversal::TraversalOutcome;

/// What one successfully harvested account produced.
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub url: String,
    pub traversal: TraversalOutcome,
    pub selection: SelectionReport,
    /// Totals of the triples read from markup.
    pub totals: SummaryRecord,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub harvested: usize,
    pub skipped_private: usize,
    pub skipped_invalid: usize,
    pub failed: usize,
    pub posts_captured: usize,
    pub post_failures: usize,
    /// Set when a run-scoped error stopped the remaining accounts.
    pub aborted: bool,
}

impl RunReport {
    pub fn merge(&mut self, other: &RunReport) {
        self.harvested += other.harvested;
        self.skipped_private += other.skipped_private;
        self.skipped_invalid += other.skipped_invalid;
        self.failed += other.failed;
        self.posts_captured += other.posts_captured;
        self.post_failures += other.post_failures;
        self.aborted |= other.aborted;
    }
}

/// Harvests one account for `target`.
///
/// Records the identity mapping, screenshots the account page, scrolls back
/// to the month, and captures every post inside it through `sink`.
///
/// # Errors
///
/// Returns [`HarvestError::PrivateAccount`] when the page needs a login, and
/// propagates every traversal and selection failure. Callers decide from
/// [`HarvestError::scope`] whether to continue with the next account.
pub async fn harvest_account<P, S>(
    scraper: &AccountScraper<P>,
    sink: &S,
    url: &str,
    target: &TargetMonth,
    cancel: &CancellationToken,
) -> Result<AccountSummary, HarvestError>
where
    P: Page,
    S: ArtifactSink,
{
    match scraper.open(url).await? {
        AccessStrategy::Public => {}
        AccessStrategy::Private => {
            return Err(HarvestError::PrivateAccount {
                url: url.to_owned(),
            })
        }
    }

    let mut task = AccountTask::new(url, *target);
    sink.record_identity(url, &task.identity_hash)
        .map_err(HarvestError::Sink)?;

    let page_png = scraper.full_page_screenshot().await?;
    sink.save_account_screenshot(&task.account_screenshot_name(), &page_png)
        .map_err(HarvestError::Sink)?;

    scraper.go_to_posts().await?;
    let traversal = scraper.scroll_to_month(target, url, cancel).await?;

    sink.reset_dom_triples(&task.identity_hash)
        .map_err(HarvestError::Sink)?;
    scraper.set_wallpaper_visible(false).await?;
    let selection = {
        let mut consumer = CaptureConsumer::new(&mut task, sink, scraper.selectors());
        scraper
            .select_and_consume(|record| target.contains(&record.time), &mut consumer)
            .await
    };
    scraper.set_wallpaper_visible(true).await?;
    let selection = selection?;

    if !task.post_images.is_empty() {
        sink.save_composite(&task.all_posts_screenshot_name(), &task.post_images)
            .map_err(HarvestError::Sink)?;
    }

    let triples: Vec<_> = task.records.iter().map(|r| r.triple()).collect();
    let totals = aggregate(&task.identity_hash, &triples);
    tracing::info!(
        url,
        identity = %task.identity_hash,
        posts = selection.consumed,
        likes = totals.total_likes,
        comments = totals.total_comments,
        shares = totals.total_shares,
        "account harvested"
    );

    Ok(AccountSummary {
        url: url.to_owned(),
        traversal,
        selection,
        totals,
    })
}

/// Runs [`harvest_account`] over `urls` in order on one page session.
///
/// Account-scoped failures are logged and the loop moves on. A run-scoped
/// failure cancels `cancel`, so sibling sessions stop too, and ends the loop.
pub async fn harvest_accounts<P, S>(
    scraper: &AccountScraper<P>,
    sink: &S,
    urls: &[String],
    target: &TargetMonth,
    cancel: &CancellationToken,
) -> RunReport
where
    P: Page,
    S: ArtifactSink,
{
    let mut report = RunReport::default();

    for url in urls {
        if cancel.is_cancelled() {
            report.aborted = true;
            break;
        }

        match harvest_account(scraper, sink, url, target, cancel).await {
            Ok(summary) => {
                report.harvested += 1;
                report.posts_captured += summary.selection.consumed;
                report.post_failures += summary.selection.failed;
            }
            Err(HarvestError::PrivateAccount { url }) => {
                tracing::error!(%url, "account is not public; skipping");
                report.skipped_private += 1;
            }
            Err(e @ HarvestError::InvalidUrl { .. }) => {
                tracing::error!(error = %e, "skipping account");
                report.skipped_invalid += 1;
            }
            Err(HarvestError::Cancelled) => {
                tracing::info!(%url, "run cancelled");
                report.aborted = true;
                break;
            }
            Err(e) if e.scope() == ErrorScope::Run => {
                tracing::error!(%url, error = %e, "stopping run");
                cancel.cancel();
                report.aborted = true;
                break;
            }
            Err(e) => {
                tracing::error!(%url, error = %e, "account failed; continuing with next");
                report.failed += 1;
            }
        }
    }

    report
}

/// Deals `urls` round-robin over independent page sessions and runs them
/// concurrently. Sessions share only `sink` and `cancel`.
pub async fn harvest_with_sessions<P, S>(
    scrapers: &[AccountScraper<P>],
    sink: &S,
    urls: &[String],
    target: &TargetMonth,
    cancel: &CancellationToken,
) -> RunReport
where
    P: Page,
    S: ArtifactSink,
{
    let workers = scrapers.len();
    if workers == 0 {
        return RunReport::default();
    }

    let runs = scrapers.iter().enumerate().map(|(worker, scraper)| {
        let assigned: Vec<String> = urls.iter().skip(worker).step_by(workers).cloned().collect();
        async move {
            tracing::debug!(worker, accounts = assigned.len(), "session started");
            harvest_accounts(scraper, sink, &assigned, target, cancel).await
        }
    });

    join_all(runs)
        .await
        .iter()
        .fold(RunReport::default(), |mut total, report| {
            total.merge(report);
            total
        })
}

#[cfg(test)]
#[path = "harvest_test.rs"]
mod tests;

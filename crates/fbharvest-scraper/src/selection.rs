//! Selection pass run after traversal halts.
//!
//! Re-scans every loaded post in document order, not just the one traversal
//! last probed, and hands the ones matching the predicate to a consumer.

use async_trait::async_trait;
use fbharvest_core::{DateLocale, PostRecord};

use crate::error::{ErrorScope, HarvestError};
use crate::extract::extract_post;
use crate::page::Page;
use crate::selectors::Selectors;

#[async_trait]
pub trait PostConsumer<P: Page>: Send {
    async fn accept(
        &mut self,
        page: &P,
        record: &PostRecord,
        post: &P::Element,
    ) -> Result<(), HarvestError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionReport {
    pub scanned: usize,
    pub matched: usize,
    pub consumed: usize,
    /// Matched posts whose consumer failed; the pass continued past them.
    pub failed: usize,
}

/// Extracts every loaded post and feeds matches to `consumer`.
///
/// Extraction failures are structural and abort the pass. Consumer failures
/// stay at the post boundary: they are logged and counted, unless they are
/// run-scoped, in which case they propagate.
///
/// # Errors
///
/// Returns the first extraction or page error, or a run-scoped consumer error.
pub async fn select_and_consume<P, F, C>(
    page: &P,
    selectors: &Selectors,
    locale: &DateLocale,
    predicate: F,
    consumer: &mut C,
) -> Result<SelectionReport, HarvestError>
where
    P: Page,
    F: Fn(&PostRecord) -> bool + Send,
    C: PostConsumer<P> + ?Sized,
{
    let mut report = SelectionReport::default();
    let posts = page.find_all(&selectors.post).await?;

    for post in &posts {
        let record = extract_post(page, post, selectors, locale).await?;
        report.scanned += 1;
        if !predicate(&record) {
            continue;
        }
        report.matched += 1;

        match consumer.accept(page, &record, post).await {
            Ok(()) => report.consumed += 1,
            Err(e) if e.scope() == ErrorScope::Run => return Err(e),
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    post_time = %record.time,
                    error = %e,
                    "failed to capture post; continuing with the next one"
                );
            }
        }
    }

    Ok(report)
}

//! Per-session scraper: opens an account page, classifies it, and drives
//! traversal and selection against it.

use fbharvest_core::{DateLocale, PostRecord, TargetMonth};
use tokio_util::sync::CancellationToken;

use crate::access::is_private_or_blocked;
use crate::error::HarvestError;
use crate::page::Page;
use crate::selection::{self, PostConsumer, SelectionReport};
use crate::selectors::Selectors;
use crate::traversal::{Traversal, TraversalConfig, TraversalOutcome};

/// How an account page can be browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStrategy {
    /// Reachable without signing in.
    Public,
    /// Requires a login; the harvester never signs in, so these are skipped.
    Private,
}

pub struct AccountScraper<P: Page> {
    page: P,
    selectors: Selectors,
    locale: DateLocale,
    traversal: TraversalConfig,
}

impl<P: Page> AccountScraper<P> {
    pub fn new(page: P, selectors: Selectors, locale: DateLocale, traversal: TraversalConfig) -> Self {
        Self {
            page,
            selectors,
            locale,
            traversal,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Hands the page session back, e.g. to close it.
    pub fn into_page(self) -> P {
        self.page
    }

    /// Navigates to `url` and classifies the loaded document.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::InvalidUrl`] for a malformed url, or the page
    /// error if navigation fails.
    pub async fn open(&self, url: &str) -> Result<AccessStrategy, HarvestError> {
        validate_account_url(url)?;
        self.page.goto(url).await?;
        let strategy = if is_private_or_blocked(&self.page, &self.selectors).await? {
            AccessStrategy::Private
        } else {
            AccessStrategy::Public
        };
        tracing::debug!(url, ?strategy, "account page opened");
        Ok(strategy)
    }

    /// Full-page screenshot with the sticky banner removed first.
    ///
    /// # Errors
    ///
    /// Propagates page capability failures.
    pub async fn full_page_screenshot(&self) -> Result<Vec<u8>, HarvestError> {
        if let Some(banner) = self.page.find(&self.selectors.banner).await? {
            self.page.remove_element(&banner).await?;
        }
        Ok(self.page.screenshot().await?)
    }

    /// Switches to the posts tab through the sidebar link, if present.
    ///
    /// # Errors
    ///
    /// Propagates page capability failures.
    pub async fn go_to_posts(&self) -> Result<(), HarvestError> {
        match self.page.find(&self.selectors.public_marker).await? {
            Some(link) => self.page.click(&link).await?,
            None => tracing::debug!("posts link not found; staying on current tab"),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Traversal::run`].
    pub async fn scroll_to_month(
        &self,
        target: &TargetMonth,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<TraversalOutcome, HarvestError> {
        Traversal {
            page: &self.page,
            selectors: &self.selectors,
            locale: &self.locale,
            config: &self.traversal,
        }
        .run(target, url, cancel)
        .await
    }

    /// Shows or hides the page cover, which overlaps posts in element
    /// screenshots.
    ///
    /// # Errors
    ///
    /// Propagates page capability failures.
    pub async fn set_wallpaper_visible(&self, visible: bool) -> Result<(), HarvestError> {
        if let Some(wallpaper) = self.page.find(&self.selectors.wallpaper).await? {
            self.page.set_visible(&wallpaper, visible).await?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`selection::select_and_consume`].
    pub async fn select_and_consume<F, C>(
        &self,
        predicate: F,
        consumer: &mut C,
    ) -> Result<SelectionReport, HarvestError>
    where
        F: Fn(&PostRecord) -> bool + Send,
        C: PostConsumer<P> + ?Sized,
    {
        selection::select_and_consume(
            &self.page,
            &self.selectors,
            &self.locale,
            predicate,
            consumer,
        )
        .await
    }
}

/// Rejects urls the browser would misinterpret before any navigation.
///
/// # Errors
///
/// Returns [`HarvestError::InvalidUrl`] naming the first problem found.
pub fn validate_account_url(url: &str) -> Result<(), HarvestError> {
    let invalid = |reason: &str| HarvestError::InvalidUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    };

    if url.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| invalid("scheme must be http or https"))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    Ok(())
}

//! Timeline traversal: scroll until the last visible post predates the
//! target month.
//!
//! Each step scrolls to the bottom twice (a single scroll often lands on a
//! half-rendered feed), pausing a random interval after each, then waits for
//! the loading indicator to clear. After the step the document is checked for
//! a login wall and the last visible post is probed:
//!
//! | Observation                          | Result                    |
//! |--------------------------------------|---------------------------|
//! | login wall now rendered              | `TemporarilyRestricted`   |
//! | no post loaded at all                | halt, `EmptyTimeline`     |
//! | post older than the month start      | halt, `PassedBoundary`    |
//! | same record as previous step         | halt, `Stagnated`         |
//! | anything else                        | remember record, continue |
//!
//! Stagnation compares whole records, counts included. Two distinct posts
//! with identical time and counts end traversal early; that is accepted.

use std::fmt;
use std::time::Duration;

use fbharvest_core::{AppConfig, DateLocale, PostRecord, TargetMonth};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::access::is_private_or_blocked;
use crate::error::{HarvestError, PageError};
use crate::extract::extract_post;
use crate::page::Page;
use crate::selectors::Selectors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    pub pause_min: Duration,
    pub pause_max: Duration,
    pub loading_timeout: Duration,
    pub poll_interval: Duration,
    /// Hard ceiling in case neither the boundary nor stagnation ever triggers.
    pub max_steps: usize,
    pub scrolls_per_step: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            pause_min: Duration::from_secs(3),
            pause_max: Duration::from_secs(7),
            loading_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(250),
            max_steps: 500,
            scrolls_per_step: 2,
        }
    }
}

impl TraversalConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            pause_min: Duration::from_millis(config.scroll_pause_min_ms),
            pause_max: Duration::from_millis(config.scroll_pause_max_ms),
            loading_timeout: Duration::from_secs(config.loading_timeout_secs),
            max_steps: config.max_scroll_steps,
            ..Self::default()
        }
    }

    /// No pauses and short timeouts, for driving fakes.
    #[cfg(test)]
    pub(crate) fn immediate() -> Self {
        Self {
            pause_min: Duration::ZERO,
            pause_max: Duration::ZERO,
            loading_timeout: Duration::from_millis(50),
            poll_interval: Duration::from_millis(5),
            max_steps: 20,
            scrolls_per_step: 2,
        }
    }

    fn jitter(&self) -> Duration {
        if self.pause_max <= self.pause_min {
            return self.pause_min;
        }
        rand::rng().random_range(self.pause_min..=self.pause_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    PassedBoundary,
    Stagnated,
    EmptyTimeline,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::PassedBoundary => write!(f, "passed month boundary"),
            HaltReason::Stagnated => write!(f, "no new posts loaded"),
            HaltReason::EmptyTimeline => write!(f, "timeline has no posts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalOutcome {
    pub reason: HaltReason,
    pub steps: usize,
    pub last_record: Option<PostRecord>,
}

/// Drives one page session through a timeline. Borrowed per account; holds
/// no state between runs.
pub struct Traversal<'a, P: Page> {
    pub page: &'a P,
    pub selectors: &'a Selectors,
    pub locale: &'a DateLocale,
    pub config: &'a TraversalConfig,
}

impl<P: Page> Traversal<'_, P> {
    /// Scrolls until a halt condition holds.
    ///
    /// `cancel` is checked before each step; a step in progress always
    /// finishes.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::TemporarilyRestricted`] when a login wall appears mid-run.
    /// - [`HarvestError::LoadingTimeout`] when the loading indicator never clears.
    /// - [`HarvestError::Extraction`] when the last post cannot be read.
    /// - [`HarvestError::StepLimit`] when `max_steps` is exhausted.
    /// - [`HarvestError::Cancelled`] when `cancel` fires between steps.
    pub async fn run(
        &self,
        target: &TargetMonth,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<TraversalOutcome, HarvestError> {
        let mut last_seen: Option<PostRecord> = None;

        for step in 1..=self.config.max_steps {
            if cancel.is_cancelled() {
                return Err(HarvestError::Cancelled);
            }

            self.scroll_step().await?;

            if is_private_or_blocked(self.page, self.selectors).await? {
                return Err(HarvestError::TemporarilyRestricted {
                    url: url.to_owned(),
                });
            }

            let Some(last_post) = self.page.find_all(&self.selectors.post).await?.pop() else {
                return Ok(self.halt(HaltReason::EmptyTimeline, step, None));
            };
            let record = extract_post(self.page, &last_post, self.selectors, self.locale).await?;
            tracing::debug!(step, post_time = %record.time, "probed last visible post");

            if record.time < target.start() {
                return Ok(self.halt(HaltReason::PassedBoundary, step, Some(record)));
            }
            if last_seen.as_ref() == Some(&record) {
                return Ok(self.halt(HaltReason::Stagnated, step, Some(record)));
            }
            last_seen = Some(record);
        }

        Err(HarvestError::StepLimit {
            max_steps: self.config.max_steps,
        })
    }

    fn halt(
        &self,
        reason: HaltReason,
        steps: usize,
        last_record: Option<PostRecord>,
    ) -> TraversalOutcome {
        tracing::info!(%reason, steps, "traversal halted");
        TraversalOutcome {
            reason,
            steps,
            last_record,
        }
    }

    async fn scroll_step(&self) -> Result<(), HarvestError> {
        for _ in 0..self.config.scrolls_per_step {
            self.page.scroll_to_bottom().await?;
            let pause = self.config.jitter();
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        match tokio::time::timeout(self.config.loading_timeout, self.loading_cleared()).await {
            Ok(result) => result.map_err(HarvestError::from),
            Err(_) => Err(HarvestError::LoadingTimeout {
                timeout_secs: self.config.loading_timeout.as_secs(),
            }),
        }
    }

    async fn loading_cleared(&self) -> Result<(), PageError> {
        loop {
            match self.page.find(&self.selectors.loading_indicator).await? {
                None => return Ok(()),
                Some(indicator) if !self.page.is_displayed(&indicator).await? => return Ok(()),
                Some(_) => tokio::time::sleep(self.config.poll_interval).await,
            }
        }
    }
}

#[cfg(test)]
#[path = "traversal_test.rs"]
mod tests;

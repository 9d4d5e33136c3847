//! Per-account run context and the consumer that captures matched posts.

use async_trait::async_trait;
use fbharvest_core::{identity_hash, naming, PostRecord, ReactionTriple, TargetMonth};

use crate::error::HarvestError;
use crate::page::Page;
use crate::selection::PostConsumer;
use crate::selectors::Selectors;

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Destination for everything a harvest writes. Implementations must accept
/// appends from several accounts at once and never rewrite earlier rows of
/// the current run.
pub trait ArtifactSink: Send + Sync {
    fn record_identity(&self, url: &str, identity_hash: &str) -> Result<(), SinkError>;

    /// Empties the account's DOM triples left by an earlier run of the same
    /// account, so re-harvesting replaces rows instead of doubling them.
    fn reset_dom_triples(&self, identity_hash: &str) -> Result<(), SinkError>;

    fn save_account_screenshot(&self, file_name: &str, png: &[u8]) -> Result<(), SinkError>;

    fn append_dom_triple(
        &self,
        identity_hash: &str,
        triple: &ReactionTriple,
    ) -> Result<(), SinkError>;

    fn save_reaction_capture(&self, file_name: &str, png: &[u8]) -> Result<(), SinkError>;

    /// Stacks the captured post images into one picture.
    fn save_composite(&self, file_name: &str, posts: &[Vec<u8>]) -> Result<(), SinkError>;
}

/// State owned by one account's harvest, from navigation to persistence.
#[derive(Debug, Clone)]
pub struct AccountTask {
    pub url: String,
    pub identity_hash: String,
    pub target: TargetMonth,
    pub records: Vec<PostRecord>,
    pub capture_count: u32,
    pub post_images: Vec<Vec<u8>>,
}

impl AccountTask {
    #[must_use]
    pub fn new(url: &str, target: TargetMonth) -> Self {
        Self {
            url: url.to_owned(),
            identity_hash: identity_hash(url),
            target,
            records: Vec::new(),
            capture_count: 0,
            post_images: Vec::new(),
        }
    }

    #[must_use]
    pub fn account_screenshot_name(&self) -> String {
        naming::account_screenshot(&self.identity_hash)
    }

    #[must_use]
    pub fn all_posts_screenshot_name(&self) -> String {
        naming::all_posts_screenshot(&self.target, &self.identity_hash)
    }

    /// Claims the next capture sequence number and returns its file name.
    pub fn next_capture_name(&mut self) -> String {
        self.capture_count += 1;
        naming::reaction_capture(&self.target, &self.identity_hash, self.capture_count)
    }
}

/// Persists a matched post: its triple, a picture of the post for the
/// composite, and a picture of its reaction bar for OCR.
pub struct CaptureConsumer<'a, S> {
    task: &'a mut AccountTask,
    sink: &'a S,
    selectors: &'a Selectors,
}

impl<'a, S: ArtifactSink> CaptureConsumer<'a, S> {
    pub fn new(task: &'a mut AccountTask, sink: &'a S, selectors: &'a Selectors) -> Self {
        Self {
            task,
            sink,
            selectors,
        }
    }
}

#[async_trait]
impl<P, S> PostConsumer<P> for CaptureConsumer<'_, S>
where
    P: Page,
    S: ArtifactSink,
{
    async fn accept(
        &mut self,
        page: &P,
        record: &PostRecord,
        post: &P::Element,
    ) -> Result<(), HarvestError> {
        let post_png = page.element_screenshot(post).await?;

        // The sequence advances even when the bar is missing so OCR rows stay
        // aligned with DOM rows.
        let capture_name = self.task.next_capture_name();
        let reactions_png = match page.find_within(post, &self.selectors.reactions_area).await? {
            Some(area) => page.element_screenshot(&area).await?,
            None => {
                tracing::warn!(
                    identity = %self.task.identity_hash,
                    capture = %capture_name,
                    "reaction area not found; capturing whole post instead"
                );
                post_png.clone()
            }
        };
        self.sink
            .save_reaction_capture(&capture_name, &reactions_png)
            .map_err(HarvestError::Sink)?;

        // Recorded only once the capture exists, so a failed post leaves no
        // DOM row behind.
        self.sink
            .append_dom_triple(&self.task.identity_hash, &record.triple())
            .map_err(HarvestError::Sink)?;
        self.task.records.push(record.clone());
        self.task.post_images.push(post_png);
        Ok(())
    }
}

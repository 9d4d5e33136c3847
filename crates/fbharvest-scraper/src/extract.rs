//! Structural extraction of a [`PostRecord`] from live post markup.
//!
//! A missing or unparsable time indicator is fatal: it means the markup
//! changed and every following post would fail the same way. Missing count
//! elements are not errors; a post with no shares simply has no shares
//! element.

use fbharvest_core::{DateLocale, PostRecord};

use crate::error::HarvestError;
use crate::page::{Locator, Page};
use crate::selectors::Selectors;

/// Reads time and reaction counts from one post element.
///
/// # Errors
///
/// Returns [`HarvestError::Extraction`] carrying the post's markup when the
/// time indicator is absent or unparsable, or when a present count element
/// does not start with a number. Page failures propagate as
/// [`HarvestError::Page`].
pub async fn extract_post<P: Page>(
    page: &P,
    post: &P::Element,
    selectors: &Selectors,
    locale: &DateLocale,
) -> Result<PostRecord, HarvestError> {
    let Some(time_el) = page.find_within(post, &selectors.post_time).await? else {
        return Err(structural(page, post, "time indicator missing".to_owned()).await);
    };

    let Some(raw_time) = page
        .attribute(&time_el, &selectors.post_time_attribute)
        .await?
    else {
        return Err(structural(
            page,
            post,
            format!(
                "time indicator has no \"{}\" attribute",
                selectors.post_time_attribute
            ),
        )
        .await);
    };

    let time = match locale.parse(&raw_time) {
        Ok(time) => time,
        Err(e) => return Err(structural(page, post, e.to_string()).await),
    };

    let likes = read_count(page, post, &selectors.likes, "likes").await?;
    let comments = read_count(page, post, &selectors.comments, "comments").await?;
    let shares = read_count(page, post, &selectors.shares, "shares").await?;

    Ok(PostRecord {
        time,
        likes,
        comments,
        shares,
    })
}

async fn read_count<P: Page>(
    page: &P,
    post: &P::Element,
    locator: &Locator,
    field: &str,
) -> Result<u64, HarvestError> {
    let Some(el) = page.find_within(post, locator).await? else {
        return Ok(0);
    };
    let text = page.text(&el).await?;
    match parse_count_prefix(&text) {
        Some(n) => Ok(n),
        None => Err(structural(page, post, format!("unreadable {field} count \"{text}\"")).await),
    }
}

/// Parses the first whitespace-separated token as a non-negative integer.
///
/// `"12 Yorum"` gives 12, `"7"` gives 7, `""` and `"Yorum"` give `None`.
#[must_use]
pub fn parse_count_prefix(text: &str) -> Option<u64> {
    text.split_whitespace().next()?.parse::<u64>().ok()
}

/// Builds an extraction error with the raw markup attached. Markup capture is
/// best effort: failing to read it must not mask the structural error.
async fn structural<P: Page>(page: &P, post: &P::Element, reason: String) -> HarvestError {
    let markup = page.outer_html(post).await.unwrap_or_default();
    HarvestError::Extraction { reason, markup }
}

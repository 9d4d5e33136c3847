//! Access classification for the currently loaded document.

use crate::error::PageError;
use crate::page::Page;
use crate::selectors::Selectors;

/// Returns `true` when the document cannot be browsed anonymously.
///
/// Blocked when a login form is actually rendered (hidden login forms exist
/// on accessible pages too), or when the public page marker is missing.
///
/// # Errors
///
/// Propagates page capability failures.
pub async fn is_private_or_blocked<P: Page>(
    page: &P,
    selectors: &Selectors,
) -> Result<bool, PageError> {
    if let Some(form) = page.find(&selectors.login_form).await? {
        if page.is_displayed(&form).await? {
            tracing::debug!("login form is rendered");
            return Ok(true);
        }
    }

    if page.find(&selectors.public_marker).await?.is_none() {
        tracing::debug!("public page marker is absent");
        return Ok(true);
    }

    Ok(false)
}

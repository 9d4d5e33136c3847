use thiserror::Error;

/// Failure reported by the page capability itself.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page command failed: {0}")]
    Command(String),

    #[error("page session could not be opened: {0}")]
    Session(String),
}

/// How far a [`HarvestError`] reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Skip the current account and continue with the next one.
    Account,
    /// Stop the whole multi-account run.
    Run,
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid account url \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{url} is not publicly browsable; login required")]
    PrivateAccount { url: String },

    #[error("access temporarily restricted while traversing {url}")]
    TemporarilyRestricted { url: String },

    #[error("post markup did not match expected structure: {reason}")]
    Extraction { reason: String, markup: String },

    #[error("loading indicator still visible after {timeout_secs}s")]
    LoadingTimeout { timeout_secs: u64 },

    #[error("traversal exceeded {max_steps} scroll steps without reaching the month boundary")]
    StepLimit { max_steps: usize },

    #[error("harvest cancelled")]
    Cancelled,

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("failed to persist artifact: {0}")]
    Sink(#[source] crate::task::SinkError),
}

impl HarvestError {
    /// Restriction is tied to the session, not the URL, so it ends the run.
    /// Everything else is contained to the account being processed.
    #[must_use]
    pub fn scope(&self) -> ErrorScope {
        match self {
            HarvestError::TemporarilyRestricted { .. } | HarvestError::Cancelled => {
                ErrorScope::Run
            }
            _ => ErrorScope::Account,
        }
    }
}

pub mod access;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod page;
pub mod scraper;
pub mod selection;
pub mod selectors;
pub mod task;
pub mod traversal;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

pub use error::{ErrorScope, HarvestError, PageError};
pub use harvest::{
    harvest_account, harvest_accounts, harvest_with_sessions, AccountSummary, RunReport,
};
pub use page::{Locator, Page};
pub use scraper::{validate_account_url, AccessStrategy, AccountScraper};
pub use selection::{select_and_consume, PostConsumer, SelectionReport};
pub use selectors::Selectors;
pub use task::{AccountTask, ArtifactSink, CaptureConsumer, SinkError};
pub use traversal::{HaltReason, Traversal, TraversalConfig, TraversalOutcome};
pub use webdriver::WebDriverPage;

//! The rendering capability the engine drives.
//!
//! A [`Page`] is one browser session: it can navigate, resolve locators
//! against the current document, run small scripts and capture pixels. The
//! engine never shares a session between concurrent tasks; parallel
//! harvesting uses one `Page` per worker.

use async_trait::async_trait;

use crate::error::PageError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    #[must_use]
    pub fn xpath(expr: &str) -> Self {
        Locator::XPath(expr.to_owned())
    }

    #[must_use]
    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_owned())
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath:{expr}"),
            Locator::Css(sel) => write!(f, "css:{sel}"),
        }
    }
}

#[async_trait]
pub trait Page: Send + Sync {
    type Element: Clone + Send + Sync;

    async fn goto(&self, url: &str) -> Result<(), PageError>;

    /// First match in document order, or `None`.
    async fn find(&self, locator: &Locator) -> Result<Option<Self::Element>, PageError>;

    /// All matches in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, PageError>;

    /// First match below `parent`, or `None`.
    async fn find_within(
        &self,
        parent: &Self::Element,
        locator: &Locator,
    ) -> Result<Option<Self::Element>, PageError>;

    /// Whether the element is actually rendered, not merely present in markup.
    async fn is_displayed(&self, element: &Self::Element) -> Result<bool, PageError>;

    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, PageError>;

    async fn text(&self, element: &Self::Element) -> Result<String, PageError>;

    async fn outer_html(&self, element: &Self::Element) -> Result<String, PageError>;

    async fn click(&self, element: &Self::Element) -> Result<(), PageError>;

    async fn scroll_to_bottom(&self) -> Result<(), PageError>;

    async fn remove_element(&self, element: &Self::Element) -> Result<(), PageError>;

    async fn set_visible(&self, element: &Self::Element, visible: bool) -> Result<(), PageError>;

    /// PNG of the whole page.
    async fn screenshot(&self) -> Result<Vec<u8>, PageError>;

    /// PNG of one element's bounding box.
    async fn element_screenshot(&self, element: &Self::Element) -> Result<Vec<u8>, PageError>;
}

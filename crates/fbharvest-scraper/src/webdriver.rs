//! [`Page`] backed by a WebDriver session through `fantoccini`.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder};
use serde_json::Value;

use crate::error::PageError;
use crate::page::{Locator, Page};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const REMOVE_ELEMENT: &str = "arguments[0].parentNode.removeChild(arguments[0]);";
const SET_VISIBILITY: &str = "arguments[0].style.visibility = arguments[1];";

pub struct WebDriverPage {
    client: Client,
}

fn command_error(e: fantoccini::error::CmdError) -> PageError {
    PageError::Command(e.to_string())
}

fn to_fantoccini(locator: &Locator) -> fantoccini::Locator<'_> {
    match locator {
        Locator::XPath(expr) => fantoccini::Locator::XPath(expr),
        Locator::Css(sel) => fantoccini::Locator::Css(sel),
    }
}

fn element_arg(element: &Element) -> Result<Value, PageError> {
    serde_json::to_value(element).map_err(|e| PageError::Command(e.to_string()))
}

impl WebDriverPage {
    /// Opens a new browser session against the WebDriver endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Session`] when no session can be created.
    pub async fn connect(webdriver_url: &str) -> Result<Self, PageError> {
        let client = ClientBuilder::native()
            .connect(webdriver_url)
            .await
            .map_err(|e| PageError::Session(e.to_string()))?;
        tracing::debug!(webdriver_url, "webdriver session opened");
        Ok(Self { client })
    }

    /// Ends the browser session.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Command`] if the driver rejects the request.
    pub async fn close(self) -> Result<(), PageError> {
        self.client.close().await.map_err(command_error)
    }

    async fn run_script(&self, script: &str, args: Vec<Value>) -> Result<(), PageError> {
        self.client
            .execute(script, args)
            .await
            .map(|_| ())
            .map_err(command_error)
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        self.client.goto(url).await.map_err(command_error)
    }

    // A missing element is an error in WebDriver; find_all turns it into
    // an empty result instead.
    async fn find(&self, locator: &Locator) -> Result<Option<Element>, PageError> {
        Ok(self.find_all(locator).await?.into_iter().next())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, PageError> {
        self.client
            .find_all(to_fantoccini(locator))
            .await
            .map_err(command_error)
    }

    async fn find_within(
        &self,
        parent: &Element,
        locator: &Locator,
    ) -> Result<Option<Element>, PageError> {
        let found = parent
            .find_all(to_fantoccini(locator))
            .await
            .map_err(command_error)?;
        Ok(found.into_iter().next())
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool, PageError> {
        element.is_displayed().await.map_err(command_error)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>, PageError> {
        element.attr(name).await.map_err(command_error)
    }

    async fn text(&self, element: &Element) -> Result<String, PageError> {
        element.text().await.map_err(command_error)
    }

    async fn outer_html(&self, element: &Element) -> Result<String, PageError> {
        element.html(false).await.map_err(command_error)
    }

    async fn click(&self, element: &Element) -> Result<(), PageError> {
        element.click().await.map_err(command_error)
    }

    async fn scroll_to_bottom(&self) -> Result<(), PageError> {
        self.run_script(SCROLL_TO_BOTTOM, Vec::new()).await
    }

    async fn remove_element(&self, element: &Element) -> Result<(), PageError> {
        self.run_script(REMOVE_ELEMENT, vec![element_arg(element)?])
            .await
    }

    async fn set_visible(&self, element: &Element, visible: bool) -> Result<(), PageError> {
        let visibility = if visible { "visible" } else { "hidden" };
        self.run_script(
            SET_VISIBILITY,
            vec![element_arg(element)?, Value::from(visibility)],
        )
        .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        self.client.screenshot().await.map_err(command_error)
    }

    async fn element_screenshot(&self, element: &Element) -> Result<Vec<u8>, PageError> {
        element.screenshot().await.map_err(command_error)
    }
}

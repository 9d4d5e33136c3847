//! Locators for the public page timeline markup.
//!
//! Kept in one struct so a markup change means editing one place, and so
//! tests can resolve the same locators against a fake document.

use crate::page::Locator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// In-content login form (not the fixed header one).
    pub login_form: Locator,
    /// "Posts" link in the sidebar. Only public pages render it.
    pub public_marker: Locator,
    /// Sticky membership banner that covers content in screenshots.
    pub banner: Locator,
    /// Page cover that can overlap posts while capturing.
    pub wallpaper: Locator,
    pub loading_indicator: Locator,
    pub post: Locator,
    /// Time indicator, relative to a post.
    pub post_time: Locator,
    /// Attribute on [`Selectors::post_time`] holding the long-form timestamp.
    pub post_time_attribute: String,
    pub likes: Locator,
    pub comments: Locator,
    pub shares: Locator,
    /// Reaction bar captured for OCR, relative to a post.
    pub reactions_area: Locator,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            login_form: Locator::xpath("//div[@id='globalContainer']//form[@id='login_form']"),
            public_marker: Locator::xpath(
                "//div[@id='entity_sidebar']//div//a/span[text()='Gönderiler']/parent::a",
            ),
            banner: Locator::xpath("//div[@id='pagelet_growth_expanding_cta']"),
            wallpaper: Locator::xpath("//div[@id='pagelet_timeline_main_column']/preceding-sibling::div[contains(@class,'coverWrap')]"),
            loading_indicator: Locator::xpath("//div[@id='www_pages_reaction_see_more_unitwww_pages_posts']//span[@role='progressbar']"),
            post: Locator::xpath("//div[contains(@class,'userContentWrapper')]"),
            post_time: Locator::xpath(".//abbr[@data-utime]"),
            post_time_attribute: "title".to_owned(),
            likes: Locator::xpath(
                ".//span[@data-testid='UFI2ReactionsCount/sentenceWithSocialContext']",
            ),
            comments: Locator::xpath(".//a[@data-testid='UFI2CommentsCount/root']"),
            shares: Locator::xpath(".//a[@data-testid='UFI2SharesCount/root']"),
            reactions_area: Locator::xpath(".//form[contains(@class,'commentable_item')]"),
        }
    }
}

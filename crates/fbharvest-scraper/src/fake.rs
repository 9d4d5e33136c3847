//! In-memory [`Page`] and [`ArtifactSink`] used by the engine's tests.
//!
//! A fake site holds a list of posts, newest first. Only a prefix of them is
//! "loaded"; every scroll reveals `batch` more, the way a timeline lazily
//! appends older posts.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fbharvest_core::{DateLocale, ReactionTriple};

use crate::error::PageError;
use crate::page::{Locator, Page};
use crate::selectors::Selectors;
use crate::task::{ArtifactSink, SinkError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeElement {
    LoginForm,
    PublicMarker,
    Banner,
    Wallpaper,
    Loading,
    Post(usize),
    Time(usize),
    Likes(usize),
    Comments(usize),
    Shares(usize),
    Reactions(usize),
}

#[derive(Debug, Clone)]
pub struct FakePost {
    pub time_title: Option<String>,
    pub likes: Option<String>,
    pub comments: Option<String>,
    pub shares: Option<String>,
    pub has_reactions_area: bool,
}

impl FakePost {
    pub fn at(time: NaiveDateTime) -> Self {
        Self::with_raw_time(&DateLocale::turkish().format(&time))
    }

    pub fn with_raw_time(raw: &str) -> Self {
        Self {
            time_title: Some(raw.to_owned()),
            likes: None,
            comments: None,
            shares: None,
            has_reactions_area: true,
        }
    }

    pub fn without_time() -> Self {
        Self {
            time_title: None,
            likes: None,
            comments: None,
            shares: None,
            has_reactions_area: true,
        }
    }

    pub fn counts(mut self, likes: u64, comments: u64, shares: u64) -> Self {
        self.likes = Some(likes.to_string());
        self.comments = Some(format!("{comments} Yorum"));
        self.shares = Some(format!("{shares} Paylaşım"));
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeSite {
    pub posts: Vec<FakePost>,
    pub initially_loaded: usize,
    pub batch: usize,
    pub public_marker: bool,
    pub login_form_visible: bool,
    pub login_form_hidden: bool,
    /// Login form becomes visible once this many scrolls happened on the site.
    pub restrict_after_scrolls: Option<usize>,
    pub loading_stuck: bool,
    pub banner: bool,
    pub wallpaper: bool,
}

impl FakeSite {
    pub fn public(posts: Vec<FakePost>) -> Self {
        Self {
            posts,
            initially_loaded: 0,
            batch: 1,
            public_marker: true,
            login_form_visible: false,
            login_form_hidden: false,
            restrict_after_scrolls: None,
            loading_stuck: false,
            banner: true,
            wallpaper: true,
        }
    }

    pub fn private() -> Self {
        let mut site = Self::public(Vec::new());
        site.public_marker = false;
        site.login_form_hidden = true;
        site
    }

    pub fn loaded(mut self, n: usize) -> Self {
        self.initially_loaded = n;
        self
    }
}

#[derive(Default)]
struct State {
    sites: HashMap<String, FakeSite>,
    current: Option<String>,
    loaded: usize,
    site_scrolls: usize,
    restricted: bool,
    total_scrolls: usize,
    visited: Vec<String>,
    removed: Vec<FakeElement>,
    hidden: Vec<FakeElement>,
    clicked: Vec<FakeElement>,
}

pub struct FakePage {
    selectors: Selectors,
    state: Mutex<State>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            selectors: Selectors::default(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_site(self, url: &str, site: FakeSite) -> Self {
        self.state
            .lock()
            .unwrap()
            .sites
            .insert(url.to_owned(), site);
        self
    }

    pub fn total_scrolls(&self) -> usize {
        self.state.lock().unwrap().total_scrolls
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn removed(&self) -> Vec<FakeElement> {
        self.state.lock().unwrap().removed.clone()
    }

    pub fn hidden(&self) -> Vec<FakeElement> {
        self.state.lock().unwrap().hidden.clone()
    }

    pub fn clicked(&self) -> Vec<FakeElement> {
        self.state.lock().unwrap().clicked.clone()
    }

    fn with_site_state<T>(&self, f: impl FnOnce(&State, &FakeSite) -> T) -> Result<T, PageError> {
        let state = self.state.lock().unwrap();
        let url = state
            .current
            .clone()
            .ok_or_else(|| PageError::Command("no document loaded".to_owned()))?;
        let site = state
            .sites
            .get(&url)
            .ok_or_else(|| PageError::Command(format!("unknown site {url}")))?;
        Ok(f(&state, site))
    }
}

#[async_trait]
impl Page for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        let mut state = self.state.lock().unwrap();
        state.visited.push(url.to_owned());
        let Some(site) = state.sites.get(url) else {
            return Err(PageError::Command(format!("navigation to {url} failed")));
        };
        let loaded = site.initially_loaded.min(site.posts.len());
        state.current = Some(url.to_owned());
        state.loaded = loaded;
        state.site_scrolls = 0;
        state.restricted = false;
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<FakeElement>, PageError> {
        let s = &self.selectors;
        self.with_site_state(|state, site| {
            if locator == &s.login_form {
                (site.login_form_visible || site.login_form_hidden || state.restricted)
                    .then_some(FakeElement::LoginForm)
            } else if locator == &s.public_marker {
                site.public_marker.then_some(FakeElement::PublicMarker)
            } else if locator == &s.banner {
                site.banner.then_some(FakeElement::Banner)
            } else if locator == &s.wallpaper {
                site.wallpaper.then_some(FakeElement::Wallpaper)
            } else if locator == &s.loading_indicator {
                site.loading_stuck.then_some(FakeElement::Loading)
            } else if locator == &s.post {
                (state.loaded > 0).then_some(FakeElement::Post(0))
            } else {
                None
            }
        })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, PageError> {
        if locator == &self.selectors.post {
            return self.with_site_state(|state, _| (0..state.loaded).map(FakeElement::Post).collect());
        }
        Ok(self.find(locator).await?.into_iter().collect())
    }

    async fn find_within(
        &self,
        parent: &FakeElement,
        locator: &Locator,
    ) -> Result<Option<FakeElement>, PageError> {
        let FakeElement::Post(i) = *parent else {
            return Ok(None);
        };
        let s = &self.selectors;
        self.with_site_state(|_, site| {
            let post = site.posts.get(i)?;
            if locator == &s.post_time {
                post.time_title.as_ref().map(|_| FakeElement::Time(i))
            } else if locator == &s.likes {
                post.likes.as_ref().map(|_| FakeElement::Likes(i))
            } else if locator == &s.comments {
                post.comments.as_ref().map(|_| FakeElement::Comments(i))
            } else if locator == &s.shares {
                post.shares.as_ref().map(|_| FakeElement::Shares(i))
            } else if locator == &s.reactions_area {
                post.has_reactions_area.then_some(FakeElement::Reactions(i))
            } else {
                None
            }
        })
    }

    async fn is_displayed(&self, element: &FakeElement) -> Result<bool, PageError> {
        self.with_site_state(|state, site| match element {
            FakeElement::LoginForm => site.login_form_visible || state.restricted,
            _ => true,
        })
    }

    async fn attribute(
        &self,
        element: &FakeElement,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        let FakeElement::Time(i) = *element else {
            return Ok(None);
        };
        if name != self.selectors.post_time_attribute {
            return Ok(None);
        }
        self.with_site_state(|_, site| site.posts.get(i).and_then(|p| p.time_title.clone()))
    }

    async fn text(&self, element: &FakeElement) -> Result<String, PageError> {
        self.with_site_state(|_, site| {
            let pick = |i: usize, f: fn(&FakePost) -> &Option<String>| {
                site.posts.get(i).and_then(|p| f(p).clone()).unwrap_or_default()
            };
            match *element {
                FakeElement::Likes(i) => pick(i, |p| &p.likes),
                FakeElement::Comments(i) => pick(i, |p| &p.comments),
                FakeElement::Shares(i) => pick(i, |p| &p.shares),
                _ => String::new(),
            }
        })
    }

    async fn outer_html(&self, element: &FakeElement) -> Result<String, PageError> {
        Ok(match element {
            FakeElement::Post(i) => format!("<div data-post=\"{i}\"></div>"),
            other => format!("<{other:?}/>"),
        })
    }

    async fn click(&self, element: &FakeElement) -> Result<(), PageError> {
        self.state.lock().unwrap().clicked.push(element.clone());
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<(), PageError> {
        let mut state = self.state.lock().unwrap();
        let url = state
            .current
            .clone()
            .ok_or_else(|| PageError::Command("no document loaded".to_owned()))?;
        let (batch, total, restrict_after) = {
            let site = &state.sites[&url];
            (site.batch, site.posts.len(), site.restrict_after_scrolls)
        };
        state.total_scrolls += 1;
        state.site_scrolls += 1;
        state.loaded = (state.loaded + batch).min(total);
        if restrict_after.is_some_and(|n| state.site_scrolls >= n) {
            state.restricted = true;
        }
        Ok(())
    }

    async fn remove_element(&self, element: &FakeElement) -> Result<(), PageError> {
        self.state.lock().unwrap().removed.push(element.clone());
        Ok(())
    }

    async fn set_visible(&self, element: &FakeElement, visible: bool) -> Result<(), PageError> {
        if !visible {
            self.state.lock().unwrap().hidden.push(element.clone());
        }
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        Ok(b"page".to_vec())
    }

    async fn element_screenshot(&self, element: &FakeElement) -> Result<Vec<u8>, PageError> {
        Ok(match element {
            FakeElement::Post(i) => format!("post-{i}").into_bytes(),
            FakeElement::Reactions(i) => format!("reactions-{i}").into_bytes(),
            other => format!("{other:?}").into_bytes(),
        })
    }
}

/// Records every artifact write in memory.
#[derive(Default)]
pub struct MemorySink {
    pub identities: Mutex<Vec<(String, String)>>,
    pub account_screenshots: Mutex<Vec<String>>,
    pub dom_triples: Mutex<Vec<(String, ReactionTriple)>>,
    pub captures: Mutex<Vec<(String, Vec<u8>)>>,
    pub composites: Mutex<Vec<(String, usize)>>,
    /// Captures whose name contains this fragment fail to persist.
    pub fail_capture_containing: Option<String>,
}

impl ArtifactSink for MemorySink {
    fn record_identity(&self, url: &str, identity_hash: &str) -> Result<(), SinkError> {
        self.identities
            .lock()
            .unwrap()
            .push((url.to_owned(), identity_hash.to_owned()));
        Ok(())
    }

    fn save_account_screenshot(&self, file_name: &str, _png: &[u8]) -> Result<(), SinkError> {
        self.account_screenshots
            .lock()
            .unwrap()
            .push(file_name.to_owned());
        Ok(())
    }

    fn reset_dom_triples(&self, identity_hash: &str) -> Result<(), SinkError> {
        self.dom_triples
            .lock()
            .unwrap()
            .retain(|(hash, _)| hash != identity_hash);
        Ok(())
    }

    fn append_dom_triple(
        &self,
        identity_hash: &str,
        triple: &ReactionTriple,
    ) -> Result<(), SinkError> {
        self.dom_triples
            .lock()
            .unwrap()
            .push((identity_hash.to_owned(), *triple));
        Ok(())
    }

    fn save_reaction_capture(&self, file_name: &str, png: &[u8]) -> Result<(), SinkError> {
        if self
            .fail_capture_containing
            .as_deref()
            .is_some_and(|frag| file_name.contains(frag))
        {
            return Err(format!("disk full writing {file_name}").into());
        }
        self.captures
            .lock()
            .unwrap()
            .push((file_name.to_owned(), png.to_vec()));
        Ok(())
    }

    fn save_composite(&self, file_name: &str, posts: &[Vec<u8>]) -> Result<(), SinkError> {
        self.composites
            .lock()
            .unwrap()
            .push((file_name.to_owned(), posts.len()));
        Ok(())
    }
}

//! Browser automation seam.
//!
//! The extraction pipeline never talks to Chrome directly. It drives a
//! [`BrowserSession`] obtained from a [`SessionLauncher`], one session per
//! extraction call:
//!
//! ```text
//! SessionLauncher::launch → BrowserSession (navigate, find, click, ...) → close
//! ```
//!
//! [`ChromeLauncher`] is the production implementation backed by
//! chromiumoxide; tests substitute a stub that records every call.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shelfscan::browser::{BrowserSession, ChromeLauncher, Locator, ScraperConfig, SessionLauncher};
//!
//! let launcher = ChromeLauncher::new(ScraperConfig::default());
//! let mut session = launcher.launch().await?;
//! session.navigate("https://www.bestbuy.com/site/searchpage.jsp?st=tv").await?;
//! let headings = session.find_all(&Locator::css("h1")).await?;
//! session.close().await?;
//! ```

mod chrome;
mod config;
pub mod scripts;

pub use chrome::{ChromeLauncher, ChromeSession};
pub use config::ScraperConfig;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::app::Result;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Element query understood by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// `tag` elements whose visible text contains `needle`, ignoring case.
    pub fn text_contains(tag: &str, needle: &str) -> Self {
        Self::XPath(format!("//{tag}[{}]", lowered_contains(needle)))
    }

    /// `role="button"` elements whose visible text contains `needle`, ignoring case.
    pub fn role_button_containing(needle: &str) -> Self {
        Self::XPath(format!(
            "//*[@role='button' and {}]",
            lowered_contains(needle)
        ))
    }

    /// Any element whose visible text contains one of `needles`, ignoring case.
    pub fn any_text_containing(needles: &[&str]) -> Self {
        let clauses = needles
            .iter()
            .map(|n| lowered_contains(n))
            .collect::<Vec<_>>()
            .join(" or ");
        Self::XPath(format!("//*[{clauses}]"))
    }
}

fn lowered_contains(needle: &str) -> String {
    let needle = needle.to_lowercase().replace('\'', "");
    format!("contains(translate(., '{UPPERCASE}', '{LOWERCASE}'), '{needle}')")
}

/// A live, exclusively owned browser tab.
///
/// Every call may fail; callers decide whether a failure is fatal.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: Send + Sync;

    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// URL the tab actually ended up on after redirects
    async fn current_url(&self) -> Result<Option<String>>;

    async fn title(&self) -> Result<String>;

    /// All matches in document order
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    async fn find(&self, locator: &Locator) -> Result<Option<Self::Element>> {
        Ok(self.find_all(locator).await?.into_iter().next())
    }

    /// Rendered text of an element
    async fn text(&self, element: &Self::Element) -> Result<String>;

    /// Native input click
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Evaluate a script in the page
    async fn run_script(&self, source: &str) -> Result<()>;

    /// Apply a JavaScript function declaration with `this` bound to `element`
    async fn call_on(&self, element: &Self::Element, function: &str) -> Result<()>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<()> {
        self.call_on(element, scripts::SCROLL_INTO_VIEW_FN).await
    }

    /// Synthetic click dispatched from script
    async fn script_click(&self, element: &Self::Element) -> Result<()> {
        self.call_on(element, scripts::CLICK_FN).await
    }

    async fn scroll_by(&self, dy: i64) -> Result<()> {
        self.run_script(&scripts::scroll_by(dy)).await
    }

    /// Poll until any locator matches or `bound` elapses.
    ///
    /// Lookup failures count as "not yet". Returns whether a match was seen.
    async fn wait_until(&self, any_of: &[Locator], bound: Duration, poll: Duration) -> bool {
        let deadline = Instant::now() + bound;
        loop {
            for locator in any_of {
                if let Ok(found) = self.find_all(locator).await {
                    if !found.is_empty() {
                        return true;
                    }
                }
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Serialized document as currently rendered
    async fn page_source(&self) -> Result<String>;

    /// Tear the session down, releasing the browser
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Produces a fresh, independent session for each extraction call.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session>;
}

//! Extraction orchestrators.
//!
//! Each call validates its URL, launches one exclusively owned session,
//! drives it through a fixed sequence of stages and always closes it:
//!
//! ```text
//! validate → launch → navigate/settle → (recover) → wait → disclose
//!          → scroll/settle → page source → extract → normalize → close
//! ```
//!
//! Stages never overlap. Failures of the browser surface as an `error`
//! outcome on the returned record; missing data becomes sentinels.

mod disclosure;
mod listing;
mod panel;
mod product;

pub use disclosure::{open_specifications, DisclosureResult};
pub use listing::ListingScraper;
pub use product::ProductScraper;

use std::time::Duration;

use tracing::warn;

use crate::app::ScrapeError;
use crate::browser::{BrowserSession, Locator};

/// Modal or dialog elements, by class or ARIA role.
const DIALOG_XPATH: &str =
    "//*[contains(@class, 'modal') or contains(@class, 'dialog') or contains(@role, 'dialog')]";

pub(crate) fn dialog_locator() -> Locator {
    Locator::xpath(DIALOG_XPATH)
}

pub(crate) async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Close the session, logging instead of failing.
pub(crate) async fn release<S: BrowserSession>(session: S) {
    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close browser session");
    }
}

/// Outcome message for a failed call.
pub(crate) fn failure_message(err: &ScrapeError) -> String {
    match err {
        ScrapeError::InvalidUrl(_) | ScrapeError::NotFound => err.to_string(),
        other => format!("Scraping failed: {}", other),
    }
}

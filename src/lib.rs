//! # shelfscan
//!
//! Structured product data from retailer pages, driven through a real
//! browser.
//!
//! ## Architecture
//!
//! Each extraction call is a sequential pipeline over one browser session:
//!
//! ```text
//! SessionLauncher → BrowserSession → Snapshot → extract → Normalizer → record
//! ```
//!
//! - [`browser`]: session traits and the chromiumoxide implementation
//! - [`pipeline`]: product and listing orchestrators
//! - [`extract`]: pure field extractors over a parsed snapshot
//! - [`normalizer`]: sentinels, caps and outcome messages
//! - [`server`]: HTTP front end
//!
//! ## Quick Start
//!
//! ```bash
//! # Full product record
//! shelfscan product https://www.bestbuy.com/site/apple-airpods-pro/6447382.p
//!
//! # First product on a search page
//! shelfscan list "https://www.bestbuy.com/site/searchpage.jsp?st=airpods"
//!
//! # HTTP server on 0.0.0.0:5000
//! shelfscan serve
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration to both
/// orchestrators.
pub mod app;

/// Browser automation.
///
/// - [`BrowserSession`](browser::BrowserSession): one exclusively owned tab
/// - [`SessionLauncher`](browser::SessionLauncher): fresh session per call
/// - [`ChromeLauncher`](browser::ChromeLauncher): headless Chrome via chromiumoxide
/// - [`ScraperConfig`](browser::ScraperConfig): timeouts and settle delays
pub mod browser;

/// Command-line interface using clap.
///
/// - `product <url>` - Extract a product record
/// - `list <url>` - Find the first product on a listing page
/// - `serve [--bind addr]` - Run the HTTP server
pub mod cli;

/// Configuration file handling.
///
/// Loads from `~/.config/shelfscan/config.toml`: scraper timings, the site
/// profile with its element rules, and the server bind address.
pub mod config;

/// Records, outcomes and the site profile.
pub mod domain;

pub mod extract;

/// Turns raw extraction output into complete records.
pub mod normalizer;

pub mod pipeline;

pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

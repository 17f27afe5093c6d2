use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fallback browser binary used when none is configured (typical in containers).
pub const SYSTEM_CHROMIUM: &str = "/usr/bin/chromium";

/// Configuration for the browser session and every wait in the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// CDP request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Explicit Chrome/Chromium binary; falls back to `/usr/bin/chromium` when present
    pub chrome_executable: Option<PathBuf>,

    /// Hide `navigator.webdriver` and the automation blink feature (default: true)
    pub hide_automation: bool,

    /// Settle delay after product navigation in milliseconds (default: 5000)
    pub settle_after_load_ms: u64,

    /// Settle delay after an interstitial recovery attempt (default: 3000)
    pub recovery_settle_ms: u64,

    /// Upper bound waiting for the product heading (default: 10000)
    pub heading_wait_ms: u64,

    /// Pause after scrolling a disclosure control into view (default: 500)
    pub scroll_settle_ms: u64,

    /// Upper bound waiting for evidence that the specifications panel opened (default: 5000)
    pub disclosure_wait_ms: u64,

    /// Settle delay once the panel is confirmed open (default: 2000)
    pub disclosure_confirmed_settle_ms: u64,

    /// Unconditional settle delay when no evidence appeared (default: 3000)
    pub disclosure_fallback_settle_ms: u64,

    /// Vertical scroll used to trigger lazy-loaded content, in pixels (default: 500)
    pub lazy_load_scroll_px: i64,

    /// Settle delay after the lazy-load scroll (default: 2000)
    pub lazy_load_settle_ms: u64,

    /// Settle delay after listing navigation (default: 3000)
    pub listing_settle_after_load_ms: u64,

    /// Settle delay after dismissing the region chooser on listings (default: 2000)
    pub listing_region_settle_ms: u64,

    /// Upper bound waiting for a product link on listings (default: 10000)
    pub listing_wait_ms: u64,

    /// Polling interval for bounded waits (default: 100)
    pub poll_interval_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            chrome_executable: None,
            hide_automation: true,
            settle_after_load_ms: 5000,
            recovery_settle_ms: 3000,
            heading_wait_ms: 10_000,
            scroll_settle_ms: 500,
            disclosure_wait_ms: 5000,
            disclosure_confirmed_settle_ms: 2000,
            disclosure_fallback_settle_ms: 3000,
            lazy_load_scroll_px: 500,
            lazy_load_settle_ms: 2000,
            listing_settle_after_load_ms: 3000,
            listing_region_settle_ms: 2000,
            listing_wait_ms: 10_000,
            poll_interval_ms: 100,
        }
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

impl ScraperConfig {
    /// Get the CDP request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn settle_after_load(&self) -> Duration {
        ms(self.settle_after_load_ms)
    }

    pub fn recovery_settle(&self) -> Duration {
        ms(self.recovery_settle_ms)
    }

    pub fn heading_wait(&self) -> Duration {
        ms(self.heading_wait_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        ms(self.scroll_settle_ms)
    }

    pub fn disclosure_wait(&self) -> Duration {
        ms(self.disclosure_wait_ms)
    }

    pub fn disclosure_confirmed_settle(&self) -> Duration {
        ms(self.disclosure_confirmed_settle_ms)
    }

    pub fn disclosure_fallback_settle(&self) -> Duration {
        ms(self.disclosure_fallback_settle_ms)
    }

    pub fn lazy_load_settle(&self) -> Duration {
        ms(self.lazy_load_settle_ms)
    }

    pub fn listing_settle_after_load(&self) -> Duration {
        ms(self.listing_settle_after_load_ms)
    }

    pub fn listing_region_settle(&self) -> Duration {
        ms(self.listing_region_settle_ms)
    }

    pub fn listing_wait(&self) -> Duration {
        ms(self.listing_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        ms(self.poll_interval_ms)
    }

    /// Browser binary to launch: the configured one, else the system
    /// Chromium if it exists, else whatever chromiumoxide detects.
    pub fn resolved_executable(&self) -> Option<PathBuf> {
        self.chrome_executable.clone().or_else(|| {
            let system = PathBuf::from(SYSTEM_CHROMIUM);
            system.exists().then_some(system)
        })
    }

    /// Create a config optimized for speed (less accurate)
    pub fn fast() -> Self {
        Self {
            timeout_secs: 15,
            settle_after_load_ms: 2500,
            recovery_settle_ms: 1500,
            heading_wait_ms: 5000,
            disclosure_wait_ms: 3000,
            disclosure_confirmed_settle_ms: 1000,
            disclosure_fallback_settle_ms: 1500,
            lazy_load_settle_ms: 1000,
            listing_settle_after_load_ms: 1500,
            listing_region_settle_ms: 1000,
            listing_wait_ms: 5000,
            ..Default::default()
        }
    }

    /// Create a config optimized for accuracy (slower)
    pub fn thorough() -> Self {
        Self {
            timeout_secs: 60,
            settle_after_load_ms: 8000,
            heading_wait_ms: 20_000,
            disclosure_wait_ms: 8000,
            disclosure_fallback_settle_ms: 5000,
            lazy_load_scroll_px: 1000,
            lazy_load_settle_ms: 3000,
            listing_wait_ms: 20_000,
            ..Default::default()
        }
    }

    /// No settle delays or wait bounds, for driving stub sessions in tests.
    #[cfg(test)]
    pub(crate) fn immediate() -> Self {
        Self {
            settle_after_load_ms: 0,
            recovery_settle_ms: 0,
            heading_wait_ms: 0,
            scroll_settle_ms: 0,
            disclosure_wait_ms: 0,
            disclosure_confirmed_settle_ms: 0,
            disclosure_fallback_settle_ms: 0,
            lazy_load_settle_ms: 0,
            listing_settle_after_load_ms: 0,
            listing_region_settle_ms: 0,
            listing_wait_ms: 0,
            poll_interval_ms: 0,
            ..Default::default()
        }
    }
}

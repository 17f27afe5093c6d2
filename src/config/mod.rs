//! Configuration management for shelfscan.
//!
//! Configuration is read from `~/.config/shelfscan/config.toml` at startup,
//! or from the path given with `--config`. If the file doesn't exist, a
//! default configuration with comments is created.

use crate::browser::ScraperConfig;
use crate::domain::SiteProfile;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// HTTP front end settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server listens on (default: 0.0.0.0:5000)
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub site: SiteProfile,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Missing fields in the config file use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating a commented default file
    /// there if none exists.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/shelfscan/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("shelfscan").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# shelfscan configuration
#
# All delays are in milliseconds unless the key says otherwise.
# Any key left out falls back to its built-in default.

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# CDP request timeout in seconds
timeout_secs = 30

# Browser binary; defaults to /usr/bin/chromium when present
# chrome_executable = "/usr/bin/chromium"

# Hide navigator.webdriver from pages
hide_automation = true

# Product pages
settle_after_load_ms = 5000
recovery_settle_ms = 3000
heading_wait_ms = 10000

# Specifications panel
scroll_settle_ms = 500
disclosure_wait_ms = 5000
disclosure_confirmed_settle_ms = 2000
disclosure_fallback_settle_ms = 3000

# Scroll that triggers lazy-loaded content
lazy_load_scroll_px = 500
lazy_load_settle_ms = 2000

# Listing pages
listing_settle_after_load_ms = 3000
listing_region_settle_ms = 2000
listing_wait_ms = 10000

poll_interval_ms = 100

[site]
name = "Best Buy"
domain = "bestbuy.com"
base_url = "https://www.bestbuy.com"
asset_domain = "bbystatic.com"
product_markers = ["/product/", "/site/"]
listing_markers = ["searchpage", "/site/"]
product_link_marker = "/product/"

# Element rules: tag names (empty = any) and case-insensitive class fragments
[site.selectors]
name = { tags = ["h1"] }
price = { tags = ["div"], class_contains = ["priceView"] }
rating = { class_contains = ["c-review-average"] }
review_count = { class_contains = ["c-reviews"] }
description = { tags = ["div"], class_contains = ["description"] }
images = { tags = ["img"], class_contains = ["primary-image", "product-image"] }
breadcrumb = { class_contains = ["breadcrumb"] }
specifications = { class_contains = ["specification"] }
detail_blocks = { tags = ["table", "div", "section"], class_contains = ["spec", "detail"] }
listing_card = { tags = ["div"], class_contains = ["sku-item"] }

[server]
bind = "0.0.0.0:5000"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementRule, SiteSelectors};

    #[test]
    fn test_default_config_deserializes() {
        let config: Config =
            toml::from_str(Config::default_config_content()).expect("Default config should be valid TOML");

        assert_eq!(config.site, SiteProfile::default());
        assert_eq!(config.scraper.settle_after_load_ms, 5000);
        assert_eq!(config.scraper.poll_interval_ms, 100);
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[scraper]
headless = false

[site.selectors]
price = { tags = ["span"], class_contains = ["price"] }
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert!(!config.scraper.headless);
        assert_eq!(config.scraper.timeout_secs, 30);
        assert_eq!(config.site.selectors.price, ElementRule::new(&["span"], &["price"]));
        assert_eq!(config.site.selectors.name, SiteSelectors::default().name);
        assert_eq!(config.site.domain, "bestbuy.com");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.site, SiteProfile::default());
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.site, SiteProfile::default());

        // The written file loads back to the same settings
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.site, config.site);
        assert_eq!(reloaded.scraper.heading_wait_ms, config.scraper.heading_wait_ms);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scraper]\nheadless = \"sometimes\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}

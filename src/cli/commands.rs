use std::path::Path;

use serde::Serialize;

use crate::app::{AppContext, Result, ScrapeError};
use crate::browser::ScraperConfig;
use crate::config::Config;

/// Timing preset selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Configured,
    Fast,
    Thorough,
}

/// Replace every delay and bound with the preset's, keeping browser settings.
fn apply_preset(scraper: ScraperConfig, preset: Preset) -> ScraperConfig {
    let timings = match preset {
        Preset::Configured => return scraper,
        Preset::Fast => ScraperConfig::fast(),
        Preset::Thorough => ScraperConfig::thorough(),
    };
    ScraperConfig {
        headless: scraper.headless,
        user_agent: scraper.user_agent,
        chrome_executable: scraper.chrome_executable,
        hide_automation: scraper.hide_automation,
        ..timings
    }
}

/// Load the config file and apply command-line overrides.
pub fn load_config(path: Option<&Path>, preset: Preset, headed: bool) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.map_err(|e| ScrapeError::Config(e.to_string()))?;

    config.scraper = apply_preset(config.scraper, preset);
    if headed {
        config.scraper.headless = false;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

/// Print the product record; returns whether extraction succeeded.
pub async fn scrape_product(ctx: &AppContext, url: &str) -> Result<bool> {
    let record = ctx.products.extract_product(url).await;
    print_json(&record)?;
    Ok(record.outcome.is_success())
}

/// Print the first listing product; returns whether one was found.
pub async fn scrape_listing(ctx: &AppContext, url: &str) -> Result<bool> {
    let result = ctx.listings.extract_listing(url).await;
    print_json(&result)?;
    Ok(result.outcome.is_success())
}

pub async fn serve(ctx: AppContext, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| ctx.config.server.bind.clone());
    println!("{} scraper server on http://{}", ctx.config.site.name, bind);
    crate::server::serve(ctx, &bind).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_preset_keeps_browser_settings() {
        let configured = ScraperConfig {
            headless: false,
            user_agent: Some("custom".into()),
            settle_after_load_ms: 9999,
            ..Default::default()
        };
        let applied = apply_preset(configured, Preset::Fast);
        assert!(!applied.headless);
        assert_eq!(applied.user_agent.as_deref(), Some("custom"));
        assert_eq!(applied.settle_after_load_ms, ScraperConfig::fast().settle_after_load_ms);
    }

    #[test]
    fn test_configured_preset_is_untouched() {
        let configured = ScraperConfig {
            settle_after_load_ms: 9999,
            ..Default::default()
        };
        assert_eq!(apply_preset(configured, Preset::Configured).settle_after_load_ms, 9999);
    }

    #[test]
    fn test_load_config_from_path_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scraper]\nheading_wait_ms = 42\n").unwrap();

        let config = load_config(Some(&path), Preset::Configured, true).unwrap();
        assert!(!config.scraper.headless);
        assert_eq!(config.scraper.heading_wait_ms, 42);
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scraper\n").unwrap();

        let err = load_config(Some(&path), Preset::Configured, false).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }
}

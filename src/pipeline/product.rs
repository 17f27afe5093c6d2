use tracing::{debug, info, warn};

use crate::app::Result;
use crate::browser::{BrowserSession, Locator, ScraperConfig, SessionLauncher};
use crate::domain::{PageKind, ProductRecord, SiteProfile};
use crate::extract::{self, ExtractedProduct, PanelView, Snapshot};
use crate::normalizer::Normalizer;
use crate::pipeline::{disclosure, failure_message, panel, release, settle};

/// Title words of a region or country interstitial.
const INTERSTITIAL_TITLE_WORDS: &[&str] = &["country", "choose"];

/// Extracts one product record per call, each in a fresh session.
pub struct ProductScraper<L> {
    launcher: L,
    config: ScraperConfig,
    site: SiteProfile,
    normalizer: Normalizer,
}

impl<L: SessionLauncher> ProductScraper<L> {
    pub fn new(launcher: L, config: ScraperConfig, site: SiteProfile) -> Self {
        Self {
            launcher,
            config,
            site,
            normalizer: Normalizer::new(),
        }
    }

    /// Always returns a complete record; failures are reported in its outcome.
    pub async fn extract_product(&self, url: &str) -> ProductRecord {
        info!(url, "Extracting product");

        if let Err(e) = self.site.validate(url, PageKind::Product) {
            warn!(url, "Rejected product URL");
            return self.normalizer.failed_product(url, failure_message(&e));
        }

        let record = match self.run(url).await {
            Ok(extracted) => self.normalizer.product(url, extracted),
            Err(e) => {
                warn!(url, error = %e, "Product extraction failed");
                self.normalizer.failed_product(url, failure_message(&e))
            }
        };

        info!(url, status = ?record.outcome.status, message = %record.outcome.message, "Product extraction finished");
        record
    }

    async fn run(&self, url: &str) -> Result<ExtractedProduct> {
        let mut session = self.launcher.launch().await?;
        let result = self.drive(&mut session, url).await;
        release(session).await;
        result
    }

    async fn drive(&self, session: &mut L::Session, url: &str) -> Result<ExtractedProduct> {
        session.navigate(url).await?;
        settle(self.config.settle_after_load()).await;

        self.recover_interstitial(session, url).await;

        let heading = [Locator::css("h1")];
        if !session
            .wait_until(&heading, self.config.heading_wait(), self.config.poll_interval())
            .await
        {
            debug!("No heading before timeout, continuing");
        }

        let disclosure = disclosure::open_specifications(&*session, &self.config).await;

        if let Err(e) = session.scroll_by(self.config.lazy_load_scroll_px).await {
            warn!(error = %e, "Lazy-load scroll failed");
        }
        settle(self.config.lazy_load_settle()).await;

        let source = session.page_source().await?;
        let panel = if disclosure.opened {
            panel::gather(&*session).await
        } else {
            PanelView::default()
        };
        debug!(opened = disclosure.opened, bytes = source.len(), "Snapshot taken");

        let snapshot = Snapshot::parse(&source);
        Ok(extract::product(&snapshot, &panel, &self.site))
    }

    /// One best-effort attempt to get past a region chooser or redirect.
    async fn recover_interstitial(&self, session: &mut L::Session, url: &str) {
        let landed = session.current_url().await.ok().flatten();
        let title = session.title().await.unwrap_or_default().to_lowercase();

        let redirected = landed.as_deref().is_some_and(|landed| landed != url);
        let chooser = INTERSTITIAL_TITLE_WORDS.iter().any(|w| title.contains(w));
        if !redirected && !chooser {
            return;
        }
        debug!(?landed, %title, "Interstitial suspected");

        let clicked = match session.find(&Locator::text_contains("a", "united states")).await {
            Ok(Some(link)) => session.click(&link).await.is_ok(),
            _ => false,
        };

        if clicked {
            settle(self.config.recovery_settle()).await;
        } else {
            if let Err(e) = session.navigate(url).await {
                warn!(error = %e, "Re-navigation failed");
            }
            settle(self.config.settle_after_load()).await;
        }
    }
}

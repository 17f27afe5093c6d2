use tracing::{debug, info, warn};

use crate::app::{Result, ScrapeError};
use crate::browser::{BrowserSession, Locator, ScraperConfig, SessionLauncher};
use crate::domain::{ListingResult, PageKind, SiteProfile};
use crate::extract::listing::{first_product, ListingHit};
use crate::extract::Snapshot;
use crate::normalizer::Normalizer;
use crate::pipeline::{failure_message, release, settle};

/// Elements whose own text offers the US storefront.
const REGION_CHOOSER_XPATH: &str = "//*[contains(text(), 'United States')]";

/// Finds the first product on a search or listing page, one session per call.
pub struct ListingScraper<L> {
    launcher: L,
    config: ScraperConfig,
    site: SiteProfile,
    normalizer: Normalizer,
}

impl<L: SessionLauncher> ListingScraper<L> {
    pub fn new(launcher: L, config: ScraperConfig, site: SiteProfile) -> Self {
        Self {
            launcher,
            config,
            site,
            normalizer: Normalizer::new(),
        }
    }

    pub async fn extract_listing(&self, url: &str) -> ListingResult {
        info!(url, "Extracting first listing product");

        if let Err(e) = self.site.validate(url, PageKind::Listing) {
            warn!(url, "Rejected listing URL");
            return self.normalizer.failed_listing(url, failure_message(&e));
        }

        let result = match self.run(url).await {
            Ok(hit) => self.normalizer.listing(url, hit),
            Err(e) => {
                warn!(url, error = %e, "Listing extraction failed");
                self.normalizer.failed_listing(url, failure_message(&e))
            }
        };

        info!(url, status = ?result.outcome.status, message = %result.outcome.message, "Listing extraction finished");
        result
    }

    async fn run(&self, url: &str) -> Result<ListingHit> {
        let mut session = self.launcher.launch().await?;
        let result = self.drive(&mut session, url).await;
        release(session).await;
        result
    }

    async fn drive(&self, session: &mut L::Session, url: &str) -> Result<ListingHit> {
        session.navigate(url).await?;
        settle(self.config.listing_settle_after_load()).await;

        self.dismiss_region_chooser(session).await;

        let product_link = [Locator::xpath(format!(
            "//a[contains(@href, '{}')]",
            self.site.product_link_marker
        ))];
        if !session
            .wait_until(&product_link, self.config.listing_wait(), self.config.poll_interval())
            .await
        {
            debug!("No product link before timeout, continuing");
        }

        if let Err(e) = session.scroll_by(self.config.lazy_load_scroll_px).await {
            warn!(error = %e, "Lazy-load scroll failed");
        }
        settle(self.config.lazy_load_settle()).await;

        let source = session.page_source().await?;
        let snapshot = Snapshot::parse(&source);
        first_product(&snapshot, &self.site).ok_or(ScrapeError::NotFound)
    }

    async fn dismiss_region_chooser(&self, session: &L::Session) {
        let Ok(Some(choice)) = session.find(&Locator::xpath(REGION_CHOOSER_XPATH)).await else {
            return;
        };
        match session.script_click(&choice).await {
            Ok(()) => {
                debug!("Region chooser dismissed");
                settle(self.config.listing_region_settle()).await;
            }
            Err(e) => debug!(error = %e, "Region chooser click failed"),
        }
    }
}

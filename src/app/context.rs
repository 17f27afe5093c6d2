use crate::browser::{ChromeLauncher, SessionLauncher};
use crate::config::Config;
use crate::pipeline::{ListingScraper, ProductScraper};

/// Everything a command or request handler needs: configuration and both
/// orchestrators.
pub struct AppContext<L = ChromeLauncher> {
    pub config: Config,
    pub products: ProductScraper<L>,
    pub listings: ListingScraper<L>,
}

impl AppContext<ChromeLauncher> {
    pub fn new(config: Config) -> Self {
        let products = ChromeLauncher::new(config.scraper.clone());
        let listings = ChromeLauncher::new(config.scraper.clone());
        Self::with_launchers(config, products, listings)
    }
}

impl<L: SessionLauncher> AppContext<L> {
    pub fn with_launchers(config: Config, product_launcher: L, listing_launcher: L) -> Self {
        let products = ProductScraper::new(
            product_launcher,
            config.scraper.clone(),
            config.site.clone(),
        );
        let listings = ListingScraper::new(
            listing_launcher,
            config.scraper.clone(),
            config.site.clone(),
        );

        Self {
            config,
            products,
            listings,
        }
    }
}

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Result, ScrapeError};
use crate::browser::config::ScraperConfig;
use crate::browser::{scripts, BrowserSession, Locator, SessionLauncher};

/// Launches a dedicated headless Chrome per extraction call
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: ScraperConfig,
}

impl ChromeLauncher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .request_timeout(self.config.timeout());

        if self.config.hide_automation {
            builder = builder.arg("--disable-blink-features=AutomationControlled");
        }

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        if let Some(path) = self.config.resolved_executable() {
            builder = builder.chrome_executable(path);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Failed to build browser config: {}", e)))
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| ScrapeError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            )))?;

        // Drive the CDP connection until the session is closed
        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler.abort();
                return Err(ScrapeError::Browser(format!("Failed to create page: {}", e)));
            }
        };

        let session = ChromeSession {
            browser,
            page,
            handler,
        };

        if let Err(e) = session.prepare(&self.config).await {
            let _ = session.close().await;
            return Err(e);
        }

        debug!("Browser session ready");
        Ok(session)
    }
}

/// One browser process with a single tab
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    async fn prepare(&self, config: &ScraperConfig) -> Result<()> {
        if let Some(ref ua) = config.user_agent {
            self.page
                .set_user_agent(ua)
                .await
                .map_err(|e| ScrapeError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        if config.hide_automation {
            self.page
                .execute(AddScriptToEvaluateOnNewDocumentParams::new(scripts::HIDE_WEBDRIVER))
                .await
                .map_err(|e| ScrapeError::Browser(format!("Failed to install script: {}", e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Navigation failed: {}", e)))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<Option<String>> {
        self.page
            .url()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read URL: {}", e)))
    }

    async fn title(&self) -> Result<String> {
        self.page
            .get_title()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| ScrapeError::Browser(format!("Failed to read title: {}", e)))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        let found = match locator {
            Locator::Css(selector) => self.page.find_elements(selector.as_str()).await,
            Locator::XPath(expression) => self.page.find_xpaths(expression.as_str()).await,
        };
        found.map_err(|e| ScrapeError::Browser(format!("Element lookup failed: {}", e)))
    }

    async fn text(&self, element: &Element) -> Result<String> {
        element
            .inner_text()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| ScrapeError::Browser(format!("Failed to read text: {}", e)))
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element
            .click()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Click failed: {}", e)))?;
        Ok(())
    }

    async fn run_script(&self, source: &str) -> Result<()> {
        self.page
            .evaluate(source)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Script execution failed: {}", e)))?;
        Ok(())
    }

    async fn call_on(&self, element: &Element, function: &str) -> Result<()> {
        element
            .call_js_fn(function, false)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Script execution failed: {}", e)))?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read page source: {}", e)))
    }

    async fn close(mut self) -> Result<()> {
        if let Err(e) = self.page.close().await {
            warn!("Failed to close page: {}", e);
        }

        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ScrapeError::Browser(format!("Failed to close browser: {}", e)));
        let _ = self.browser.wait().await;
        self.handler.abort();

        debug!("Browser session closed");
        closed
    }
}

//! In-memory browser used by pipeline and server tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{Result, ScrapeError};
use crate::browser::{scripts, BrowserSession, Locator, SessionLauncher};

pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Clone, Default)]
pub struct StubElement {
    pub id: String,
    pub text: String,
    pub click_fails: bool,
    pub script_click_fails: bool,
}

impl StubElement {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn unclickable(mut self) -> Self {
        self.click_fails = true;
        self
    }

    pub fn inert(mut self) -> Self {
        self.click_fails = true;
        self.script_click_fails = true;
        self
    }
}

/// What the stub browser renders.
#[derive(Debug, Clone, Default)]
pub struct StubPage {
    pub html: String,
    pub landed_url: Option<String>,
    pub title: String,
    pub elements: HashMap<Locator, Vec<StubElement>>,
    pub fail_navigate: bool,
    pub fail_source: bool,
}

impl StubPage {
    pub fn with_html(html: &str) -> Self {
        Self {
            html: html.to_string(),
            ..Default::default()
        }
    }

    pub fn element(mut self, locator: Locator, element: StubElement) -> Self {
        self.elements.entry(locator).or_default().push(element);
        self
    }
}

pub struct StubSession {
    page: StubPage,
    log: CallLog,
}

impl StubSession {
    pub fn new(page: StubPage) -> Self {
        Self {
            page,
            log: CallLog::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BrowserSession for StubSession {
    type Element = StubElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.record(format!("navigate {url}"));
        if self.page.fail_navigate {
            return Err(ScrapeError::Browser("net::ERR_NAME_NOT_RESOLVED".into()));
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<Option<String>> {
        Ok(self.page.landed_url.clone())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.page.title.clone())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<StubElement>> {
        Ok(self.page.elements.get(locator).cloned().unwrap_or_default())
    }

    async fn text(&self, element: &StubElement) -> Result<String> {
        Ok(element.text.clone())
    }

    async fn click(&self, element: &StubElement) -> Result<()> {
        self.record(format!("click {}", element.id));
        if element.click_fails {
            return Err(ScrapeError::Browser("element not interactable".into()));
        }
        Ok(())
    }

    async fn run_script(&self, source: &str) -> Result<()> {
        self.record(format!("script {source}"));
        Ok(())
    }

    async fn call_on(&self, element: &StubElement, function: &str) -> Result<()> {
        if function == scripts::CLICK_FN {
            self.record(format!("script_click {}", element.id));
            if element.script_click_fails {
                return Err(ScrapeError::Browser("script click rejected".into()));
            }
        } else {
            self.record(format!("call {}", element.id));
        }
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.record("page_source".into());
        if self.page.fail_source {
            return Err(ScrapeError::Browser("target closed".into()));
        }
        Ok(self.page.html.clone())
    }

    async fn close(self) -> Result<()> {
        self.record("close".into());
        Ok(())
    }
}

/// Hands out sessions over one page, sharing a call log across launches.
pub struct StubLauncher {
    page: StubPage,
    fail_launch: bool,
    launches: AtomicUsize,
    log: CallLog,
}

impl StubLauncher {
    pub fn new(page: StubPage) -> Self {
        Self {
            page,
            fail_launch: false,
            launches: AtomicUsize::new(0),
            log: CallLog::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(StubPage::default())
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionLauncher for StubLauncher {
    type Session = StubSession;

    async fn launch(&self) -> Result<StubSession> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(ScrapeError::Browser("Failed to launch browser: no chrome".into()));
        }
        Ok(StubSession {
            page: self.page.clone(),
            log: Arc::clone(&self.log),
        })
    }
}

use tracing::debug;

use crate::browser::{BrowserSession, Locator, ScraperConfig};
use crate::pipeline::{dialog_locator, settle};

/// Outcome of trying to reveal the specifications panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisclosureResult {
    /// Some control accepted a click
    pub opened: bool,
    /// The DOM showed the panel before the wait expired
    pub confirmed: bool,
}

/// Controls that reveal the specifications panel, most specific first.
fn disclosure_controls() -> Vec<Locator> {
    vec![
        Locator::text_contains("button", "see all specifications"),
        Locator::text_contains("a", "see all specifications"),
        Locator::role_button_containing("see all specifications"),
        Locator::text_contains("h2", "specifications"),
        Locator::text_contains("h3", "specifications"),
        Locator::role_button_containing("specifications"),
    ]
}

/// DOM evidence that the panel is showing.
fn panel_evidence() -> Vec<Locator> {
    vec![
        dialog_locator(),
        Locator::xpath("//*[contains(., 'UPC') or contains(., 'Universal Product Code')]"),
    ]
}

/// Scroll `element` into view and click it, falling back to a scripted click.
async fn activate<S: BrowserSession>(session: &S, element: &S::Element, config: &ScraperConfig) -> bool {
    if let Err(e) = session.scroll_into_view(element).await {
        debug!(error = %e, "Scroll into view failed");
    }
    settle(config.scroll_settle()).await;

    match session.click(element).await {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "Native click failed, trying scripted click");
            match session.script_click(element).await {
                Ok(()) => true,
                Err(e) => {
                    debug!(error = %e, "Scripted click failed");
                    false
                }
            }
        }
    }
}

/// Click the first specifications control that accepts a click, then wait
/// for the panel.
///
/// When no evidence appears before the wait expires the panel is still
/// reported as opened. Never fails.
pub async fn open_specifications<S: BrowserSession>(
    session: &S,
    config: &ScraperConfig,
) -> DisclosureResult {
    for (strategy, locator) in disclosure_controls().iter().enumerate() {
        let candidates = match session.find_all(locator).await {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!(strategy, error = %e, "Control lookup failed");
                continue;
            }
        };

        for element in &candidates {
            if !activate(session, element, config).await {
                continue;
            }

            let confirmed = session
                .wait_until(&panel_evidence(), config.disclosure_wait(), config.poll_interval())
                .await;
            if confirmed {
                settle(config.disclosure_confirmed_settle()).await;
            } else {
                settle(config.disclosure_fallback_settle()).await;
            }
            debug!(strategy, confirmed, "Specifications control activated");
            return DisclosureResult {
                opened: true,
                confirmed,
            };
        }
    }

    debug!("No specifications control accepted a click");
    DisclosureResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubElement, StubPage, StubSession};

    fn clicks(session: &StubSession) -> Vec<String> {
        session
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("click") || c.starts_with("script_click"))
            .collect()
    }

    #[tokio::test]
    async fn test_no_controls_not_opened() {
        let session = StubSession::new(StubPage::with_html("<h1>Widget</h1>"));
        let result = open_specifications(&session, &ScraperConfig::immediate()).await;
        assert_eq!(result, DisclosureResult::default());
        assert!(clicks(&session).is_empty());
    }

    #[tokio::test]
    async fn test_most_specific_strategy_first() {
        let page = StubPage::default()
            .element(
                Locator::text_contains("h2", "specifications"),
                StubElement::new("heading", "Specifications"),
            )
            .element(
                Locator::text_contains("button", "see all specifications"),
                StubElement::new("button", "See All Specifications"),
            );
        let session = StubSession::new(page);
        let result = open_specifications(&session, &ScraperConfig::immediate()).await;
        assert!(result.opened);
        assert!(!result.confirmed);
        assert_eq!(clicks(&session), vec!["click button"]);
    }

    #[tokio::test]
    async fn test_script_click_fallback_then_next_candidate() {
        let locator = Locator::text_contains("a", "see all specifications");
        let page = StubPage::default()
            .element(locator.clone(), StubElement::new("first", "See all specifications").inert())
            .element(locator, StubElement::new("second", "See all specifications").unclickable());
        let session = StubSession::new(page);
        let result = open_specifications(&session, &ScraperConfig::immediate()).await;
        assert!(result.opened);
        assert_eq!(
            clicks(&session),
            vec![
                "click first",
                "script_click first",
                "click second",
                "script_click second"
            ]
        );
    }

    #[tokio::test]
    async fn test_all_candidates_inert() {
        let page = StubPage::default().element(
            Locator::role_button_containing("specifications"),
            StubElement::new("tab", "Specifications").inert(),
        );
        let session = StubSession::new(page);
        let result = open_specifications(&session, &ScraperConfig::immediate()).await;
        assert!(!result.opened);
    }

    #[tokio::test]
    async fn test_dialog_confirms_opening() {
        let page = StubPage::default()
            .element(
                Locator::text_contains("h3", "specifications"),
                StubElement::new("heading", "Specifications"),
            )
            .element(dialog_locator(), StubElement::new("dialog", "UPC 012345678905"));
        let session = StubSession::new(page);
        let result = open_specifications(&session, &ScraperConfig::immediate()).await;
        assert_eq!(
            result,
            DisclosureResult {
                opened: true,
                confirmed: true
            }
        );
    }
}

//! Live reads once the specifications panel is open.

use tracing::{debug, warn};

use crate::browser::{BrowserSession, Locator};
use crate::extract::{upc, PanelView};
use crate::pipeline::dialog_locator;

fn upc_mentions() -> Locator {
    Locator::any_text_containing(&["upc", "universal product code"])
}

/// First UPC read from a live element that mentions one.
async fn live_upc<S: BrowserSession>(session: &S) -> Option<String> {
    let elements = match session.find_all(&upc_mentions()).await {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "UPC lookup on live page failed");
            return None;
        }
    };

    for element in &elements {
        let Ok(text) = session.text(element).await else {
            continue;
        };
        if let Some(found) = upc::from_panel_text(&text) {
            debug!(upc = %found, "UPC found on live panel");
            return Some(found);
        }
    }
    None
}

async fn dialog_texts<S: BrowserSession>(session: &S) -> Vec<String> {
    let dialogs = match session.find_all(&dialog_locator()).await {
        Ok(dialogs) => dialogs,
        Err(e) => {
            warn!(error = %e, "Dialog lookup failed");
            return Vec::new();
        }
    };

    let mut texts = Vec::with_capacity(dialogs.len());
    for dialog in &dialogs {
        match session.text(dialog).await {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Dialog text unavailable"),
        }
    }
    texts
}

pub async fn gather<S: BrowserSession>(session: &S) -> PanelView {
    PanelView {
        upc: live_upc(session).await,
        dialog_texts: dialog_texts(session).await,
    }
}

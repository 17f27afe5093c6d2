//! Model number, read only from specification dialogs.
//!
//! Ambient page text mentions "model" too often to be trusted.

use std::sync::LazyLock;

use regex::Regex;

const MODEL_MIN_LEN: usize = 5;
const MODEL_MAX_LEN: usize = 25;

#[allow(clippy::expect_used)]
static MODEL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Model\s+Number\s+([A-Z0-9/-]+)").expect("valid regex")
});

/// Model number following a "Model Number" label in one dialog's text.
pub fn from_dialog_text(text: &str) -> Option<String> {
    let caps = MODEL_NUMBER.captures(text)?;
    let model = caps.get(1)?.as_str().trim();
    (MODEL_MIN_LEN..=MODEL_MAX_LEN)
        .contains(&model.len())
        .then(|| model.to_string())
}

/// First plausible model number across all dialogs, in document order.
pub fn from_dialogs(dialog_texts: &[String]) -> Option<String> {
    dialog_texts.iter().find_map(|text| from_dialog_text(text))
}

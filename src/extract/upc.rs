//! UPC extraction: an ordered ladder of patterns and search scopes.
//!
//! The first candidate whose digit count lies inside the accepted range
//! wins. Candidates are not checksum-verified, so a labeled run of digits
//! that is not a real UPC is still accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ElementRule;
use crate::extract::{collect_text, Snapshot};

/// Accepted digit counts for labeled candidates.
pub const LABELED_LEN: (usize, usize) = (8, 14);

/// Accepted digit counts for the line-proximity fallback.
pub const NEARBY_LEN: (usize, usize) = (11, 14);

/// Labeled patterns applied to free text, in priority order.
pub const LABELED_PATTERNS: &[&str] = &[
    r"(?i)UPC[\s:]*([0-9]{8,14})",
    r"(?i)(?:GTIN|EAN)[\s:]*([0-9]{8,14})",
    r"(?i)Universal Product Code[\s:]*([0-9]{8,14})",
    // UPC-A is usually 12 digits; allow other text between label and number
    r"(?i)UPC[^0-9]*([0-9]{11,14})",
];

/// Patterns applied to a live element that mentions the UPC.
pub const PANEL_PATTERNS: &[&str] = &[
    r"(?i)(?:UPC|Universal Product Code)[\s:]*([0-9]{8,14})",
    r"([0-9]{8,14})",
];

const DETAIL_BLOCK_PATTERN: &str = r"(?i)UPC[^0-9]*([0-9]{8,14})";
const NEARBY_DIGITS_PATTERN: &str = r"([0-9]{11,14})";

/// Lines searched after a line mentioning the UPC, including that line.
const NEARBY_WINDOW: usize = 3;

const LABELS: &[&str] = &["upc", "universal product code"];

#[allow(clippy::expect_used)]
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

static LABELED: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(LABELED_PATTERNS));
static PANEL: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(PANEL_PATTERNS));
static DETAIL_BLOCK: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[DETAIL_BLOCK_PATTERN]));
static NEARBY_DIGITS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[NEARBY_DIGITS_PATTERN]));

/// Returns the candidate if its length lies in `bounds` (inclusive).
fn accept(candidate: &str, (min, max): (usize, usize)) -> Option<String> {
    let candidate = candidate.trim();
    (min..=max)
        .contains(&candidate.len())
        .then(|| candidate.to_string())
}

/// Try `patterns` in order against `text`; first accepted capture wins.
fn first_match(patterns: &[Regex], text: &str, bounds: (usize, usize)) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| accept(m.as_str(), bounds))
    })
}

/// Whether a line or element text mentions the UPC label.
pub fn mentions_upc(text: &str) -> bool {
    let text = text.to_lowercase();
    LABELS.iter().any(|label| text.contains(label))
}

/// Strategy for text of a live element mentioning the UPC: labeled number,
/// else any bare 8–14 digit run.
pub fn from_panel_text(text: &str) -> Option<String> {
    first_match(&PANEL, text, LABELED_LEN)
}

/// Labeled patterns over free text.
pub fn from_labeled_text(text: &str) -> Option<String> {
    first_match(&LABELED, text, LABELED_LEN)
}

/// Labeled UPC inside blocks whose class suggests specifications or details.
pub fn from_detail_blocks(snapshot: &Snapshot, rule: &ElementRule) -> Option<String> {
    snapshot
        .find_all(rule)
        .find_map(|block| first_match(&DETAIL_BLOCK, &collect_text(block), LABELED_LEN))
}

/// An 11–14 digit run on a line mentioning the UPC or the two lines after it.
pub fn from_nearby_lines(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    lines.iter().enumerate().find_map(|(i, line)| {
        if !mentions_upc(line) {
            return None;
        }
        let end = (i + NEARBY_WINDOW).min(lines.len());
        let window = lines[i..end].join(" ");
        first_match(&NEARBY_DIGITS, &window, NEARBY_LEN)
    })
}

/// Snapshot strategies, used when the live panel yielded nothing.
pub fn from_document(
    snapshot: &Snapshot,
    dialog_texts: &[String],
    detail_blocks: &ElementRule,
) -> Option<String> {
    from_labeled_text(snapshot.text())
        .or_else(|| dialog_texts.iter().find_map(|text| from_labeled_text(text)))
        .or_else(|| from_detail_blocks(snapshot, detail_blocks))
        .or_else(|| from_nearby_lines(snapshot.text()))
}

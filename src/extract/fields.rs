//! Single-element fields (identity, price, rating, description) and availability.

use crate::domain::{Availability, ElementRule};
use crate::extract::{element_text, Snapshot};

/// Text of the first element matching `rule`.
///
/// Only the first match is considered; an empty first match means absent.
pub fn first_text(snapshot: &Snapshot, rule: &ElementRule) -> Option<String> {
    snapshot.find(rule).and_then(element_text)
}

/// Stock state inferred from the whole document text.
pub fn availability(text: &str) -> Option<Availability> {
    let text = text.to_lowercase();
    if text.contains("in stock") {
        Some(Availability::in_stock())
    } else if text.contains("out of stock") {
        Some(Availability::out_of_stock())
    } else {
        None
    }
}

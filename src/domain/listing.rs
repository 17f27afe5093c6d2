use serde::{Deserialize, Serialize};

use crate::domain::Outcome;

pub const LISTING_NOT_FOUND: &str = "Not found";

/// First product found on a search or listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResult {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub url: String,
    pub name: String,
    pub link: String,
    pub full_url: String,
    pub image: String,
    pub sku: String,
}

impl ListingResult {
    pub fn sentinel(url: &str, outcome: Outcome) -> Self {
        Self {
            outcome,
            url: url.to_string(),
            name: LISTING_NOT_FOUND.to_string(),
            link: LISTING_NOT_FOUND.to_string(),
            full_url: LISTING_NOT_FOUND.to_string(),
            image: LISTING_NOT_FOUND.to_string(),
            sku: LISTING_NOT_FOUND.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::Outcome;

pub const NAME_NOT_FOUND: &str = "Not found";
pub const PRICE_NOT_AVAILABLE: &str = "Not available";
pub const NO_RATING: &str = "No rating";
pub const NO_REVIEWS: &str = "0";
pub const SKU_NOT_AVAILABLE: &str = "N/A";
pub const UPC_NOT_AVAILABLE: &str = "Not available";
pub const MODEL_NOT_FOUND: &str = "Not found";
pub const AVAILABILITY_UNKNOWN: &str = "Availability unknown";
pub const NO_SPECIFICATIONS: &str = "No specifications found";

pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const MAX_IMAGES: usize = 10;
pub const MAX_SPECIFICATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub in_stock: bool,
    #[serde(rename = "availability")]
    pub label: String,
}

impl Availability {
    pub fn in_stock() -> Self {
        Self {
            in_stock: true,
            label: "In Stock".to_string(),
        }
    }

    pub fn out_of_stock() -> Self {
        Self {
            in_stock: false,
            label: "Out of Stock".to_string(),
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            in_stock: false,
            label: AVAILABILITY_UNKNOWN.to_string(),
        }
    }
}

/// One row of the specifications table, or the placeholder emitted when
/// the page had none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecEntry {
    Pair { key: String, value: String },
    Note { note: String },
}

impl SpecEntry {
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::Note {
            note: NO_SPECIFICATIONS.to_string(),
        }
    }
}

/// Fully populated product record. Every field carries either a real
/// value or its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub url: String,
    pub name: String,
    pub price: String,
    pub rating: String,
    pub review_count: String,
    pub sku: String,
    pub upc: String,
    pub model: String,
    #[serde(flatten)]
    pub availability: Availability,
    pub description: String,
    pub categories: Vec<String>,
    pub images: Vec<String>,
    pub specifications: Vec<SpecEntry>,
}

impl ProductRecord {
    /// A record holding only sentinels, with the given outcome.
    pub fn sentinel(url: &str, sku: Option<String>, outcome: Outcome) -> Self {
        Self {
            outcome,
            url: url.to_string(),
            name: NAME_NOT_FOUND.to_string(),
            price: PRICE_NOT_AVAILABLE.to_string(),
            rating: NO_RATING.to_string(),
            review_count: NO_REVIEWS.to_string(),
            sku: sku.unwrap_or_else(|| SKU_NOT_AVAILABLE.to_string()),
            upc: UPC_NOT_AVAILABLE.to_string(),
            model: MODEL_NOT_FOUND.to_string(),
            availability: Availability::default(),
            description: String::new(),
            categories: Vec::new(),
            images: Vec::new(),
            specifications: vec![SpecEntry::placeholder()],
        }
    }
}

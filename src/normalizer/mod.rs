use std::collections::HashSet;

use crate::domain::listing::LISTING_NOT_FOUND;
use crate::domain::product::{
    DESCRIPTION_MAX_CHARS, MAX_IMAGES, MAX_SPECIFICATIONS, MODEL_NOT_FOUND, NAME_NOT_FOUND,
    NO_RATING, NO_REVIEWS, PRICE_NOT_AVAILABLE, UPC_NOT_AVAILABLE,
};
use crate::domain::site::last_path_segment;
use crate::domain::{ListingResult, Outcome, ProductRecord, SpecEntry};
use crate::extract::listing::ListingHit;
use crate::extract::ExtractedProduct;

/// Segments this short are never product identifiers.
const MIN_SKU_CHARS: usize = 4;

/// Turns raw extraction output into complete records.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    present(value).unwrap_or_else(|| sentinel.to_string())
}

fn dedupe(values: Vec<String>, cap: Option<usize>) -> Vec<String> {
    let mut seen = HashSet::new();
    let kept = values
        .into_iter()
        .filter_map(|v| present(Some(v)))
        .filter(|v| seen.insert(v.clone()));
    match cap {
        Some(cap) => kept.take(cap).collect(),
        None => kept.collect(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// SKU from the last non-empty path segment of `url`.
    pub fn sku(&self, url: &str) -> Option<String> {
        last_path_segment(url)
            .filter(|segment| segment.chars().count() >= MIN_SKU_CHARS)
            .map(String::from)
    }

    pub fn product(&self, url: &str, extracted: ExtractedProduct) -> ProductRecord {
        let name = or_sentinel(extracted.name, NAME_NOT_FOUND);
        let outcome = Outcome::success(format!("Successfully scraped: {}", name));

        let specifications: Vec<SpecEntry> = extracted
            .specifications
            .into_iter()
            .filter_map(|(key, value)| Some(SpecEntry::pair(present(Some(key))?, present(Some(value))?)))
            .take(MAX_SPECIFICATIONS)
            .collect();

        let mut record = ProductRecord::sentinel(url, self.sku(url), outcome);
        record.name = name;
        record.price = or_sentinel(extracted.price, PRICE_NOT_AVAILABLE);
        record.rating = or_sentinel(extracted.rating, NO_RATING);
        record.review_count = or_sentinel(extracted.review_count, NO_REVIEWS);
        record.upc = or_sentinel(extracted.upc, UPC_NOT_AVAILABLE);
        record.model = or_sentinel(extracted.model, MODEL_NOT_FOUND);
        record.availability = extracted.availability.unwrap_or_default();
        record.description = present(extracted.description)
            .map(|d| truncate_chars(&d, DESCRIPTION_MAX_CHARS))
            .unwrap_or_default();
        record.categories = dedupe(extracted.categories, None);
        record.images = dedupe(extracted.images, Some(MAX_IMAGES));
        if !specifications.is_empty() {
            record.specifications = specifications;
        }
        record
    }

    /// Error record: every field at its sentinel, SKU still derived.
    pub fn failed_product(&self, url: &str, message: impl Into<String>) -> ProductRecord {
        ProductRecord::sentinel(url, self.sku(url), Outcome::error(message))
    }

    pub fn listing(&self, url: &str, hit: ListingHit) -> ListingResult {
        let name = or_sentinel(hit.name, LISTING_NOT_FOUND);
        let mut result =
            ListingResult::sentinel(url, Outcome::success(format!("Found product: {}", name)));
        result.name = name;
        result.link = or_sentinel(Some(hit.link), LISTING_NOT_FOUND);
        result.full_url = or_sentinel(Some(hit.full_url), LISTING_NOT_FOUND);
        result.image = or_sentinel(hit.image, LISTING_NOT_FOUND);
        result.sku = or_sentinel(hit.sku, LISTING_NOT_FOUND);
        result
    }

    pub fn failed_listing(&self, url: &str, message: impl Into<String>) -> ListingResult {
        ListingResult::sentinel(url, Outcome::error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, Status};

    const URL: &str = "https://www.bestbuy.com/site/widget-x/6418599.p?skuId=6418599";

    #[test]
    fn test_empty_extraction_gets_every_sentinel() {
        let normalizer = Normalizer::new();
        let record = normalizer.product(URL, ExtractedProduct::default());

        assert_eq!(record.outcome, Outcome::success("Successfully scraped: Not found"));
        assert_eq!(record.name, "Not found");
        assert_eq!(record.price, "Not available");
        assert_eq!(record.upc, "Not available");
        assert_eq!(record.sku, "6418599.p");
        assert_eq!(record.description, "");
        assert_eq!(record.availability, Availability::default());
        assert_eq!(record.specifications, vec![SpecEntry::placeholder()]);
    }

    #[test]
    fn test_description_truncated_by_chars() {
        let normalizer = Normalizer::new();
        let extracted = ExtractedProduct {
            description: Some("é".repeat(250)),
            ..Default::default()
        };
        let record = normalizer.product(URL, extracted);
        assert_eq!(record.description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_lists_deduplicated_and_capped() {
        let normalizer = Normalizer::new();
        let images: Vec<String> = (0..12)
            .chain(0..3)
            .map(|i| format!("https://pisces.bbystatic.com/{i}.jpg"))
            .collect();
        let extracted = ExtractedProduct {
            categories: vec!["TVs".into(), " ".into(), "TVs".into(), "OLED".into()],
            images,
            ..Default::default()
        };
        let record = normalizer.product(URL, extracted);
        assert_eq!(record.categories, vec!["TVs", "OLED"]);
        assert_eq!(record.images.len(), MAX_IMAGES);
        let unique: HashSet<_> = record.images.iter().collect();
        assert_eq!(unique.len(), record.images.len());
    }

    #[test]
    fn test_specifications_never_mixed() {
        let normalizer = Normalizer::new();
        let extracted = ExtractedProduct {
            specifications: (0..7).map(|i| (format!("k{i}"), format!("v{i}"))).collect(),
            ..Default::default()
        };
        let record = normalizer.product(URL, extracted);
        assert_eq!(record.specifications.len(), MAX_SPECIFICATIONS);
        assert!(record.specifications.iter().all(|s| matches!(s, SpecEntry::Pair { .. })));

        let blank = ExtractedProduct {
            specifications: vec![(" ".into(), "x".into())],
            ..Default::default()
        };
        let record = normalizer.product(URL, blank);
        assert_eq!(record.specifications, vec![SpecEntry::placeholder()]);
    }

    #[test]
    fn test_short_sku_segment_ignored() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.sku("https://www.bestbuy.com/site/abc"), None);
        assert_eq!(
            normalizer.sku("https://www.bestbuy.com/product/tv/J7GH2K/#reviews").as_deref(),
            Some("J7GH2K")
        );
    }

    #[test]
    fn test_failed_product_keeps_sku() {
        let record = Normalizer::new().failed_product(URL, "Scraping failed: boom");
        assert_eq!(record.outcome.status, Status::Error);
        assert_eq!(record.outcome.message, "Scraping failed: boom");
        assert_eq!(record.sku, "6418599.p");
        assert_eq!(record.specifications, vec![SpecEntry::placeholder()]);
    }

    #[test]
    fn test_listing_fills_missing_with_not_found() {
        let hit = ListingHit {
            name: None,
            link: "/product/x/ABCD".into(),
            full_url: "https://www.bestbuy.com/product/x/ABCD".into(),
            image: None,
            sku: Some("ABCD".into()),
        };
        let result = Normalizer::new().listing("https://www.bestbuy.com/site/searchpage.jsp?st=x", hit);
        assert_eq!(result.outcome, Outcome::success("Found product: Not found"));
        assert_eq!(result.image, "Not found");
        assert_eq!(result.sku, "ABCD");
    }
}

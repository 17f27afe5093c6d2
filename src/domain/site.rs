use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{Result, ScrapeError};

/// Which kind of page a URL is expected to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Product,
    Listing,
}

impl PageKind {
    fn label(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Listing => "search/list",
        }
    }
}

/// Locates elements by tag name and a case-insensitive class fragment.
///
/// An empty `tags` list matches any tag; an empty `class_contains` list
/// matches any class (including none).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementRule {
    pub tags: Vec<String>,
    pub class_contains: Vec<String>,
}

impl ElementRule {
    pub fn new(tags: &[&str], class_contains: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            class_contains: class_contains.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn matches(&self, tag: &str, class: Option<&str>) -> bool {
        let tag_ok = self.tags.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag));
        if !tag_ok {
            return false;
        }
        if self.class_contains.is_empty() {
            return true;
        }
        let Some(class) = class else {
            return false;
        };
        let class = class.to_lowercase();
        self.class_contains
            .iter()
            .any(|fragment| class.contains(&fragment.to_lowercase()))
    }
}

/// Element rules for every field family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub name: ElementRule,
    pub price: ElementRule,
    pub rating: ElementRule,
    pub review_count: ElementRule,
    pub description: ElementRule,
    pub images: ElementRule,
    pub breadcrumb: ElementRule,
    pub specifications: ElementRule,
    /// Blocks searched for a labeled UPC when nothing else matched.
    pub detail_blocks: ElementRule,
    /// Product card on listing pages, used when no product link is found directly.
    pub listing_card: ElementRule,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            name: ElementRule::new(&["h1"], &[]),
            price: ElementRule::new(&["div"], &["priceView"]),
            rating: ElementRule::new(&[], &["c-review-average"]),
            review_count: ElementRule::new(&[], &["c-reviews"]),
            description: ElementRule::new(&["div"], &["description"]),
            images: ElementRule::new(&["img"], &["primary-image", "product-image"]),
            breadcrumb: ElementRule::new(&[], &["breadcrumb"]),
            specifications: ElementRule::new(&[], &["specification"]),
            detail_blocks: ElementRule::new(&["table", "div", "section"], &["spec", "detail"]),
            listing_card: ElementRule::new(&["div"], &["sku-item"]),
        }
    }
}

/// The retailer being scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub name: String,
    pub domain: String,
    pub base_url: String,
    pub asset_domain: String,
    pub product_markers: Vec<String>,
    pub listing_markers: Vec<String>,
    /// Substring every product link on a listing page carries.
    pub product_link_marker: String,
    pub selectors: SiteSelectors,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            name: "Best Buy".to_string(),
            domain: "bestbuy.com".to_string(),
            base_url: "https://www.bestbuy.com".to_string(),
            asset_domain: "bbystatic.com".to_string(),
            product_markers: vec!["/product/".to_string(), "/site/".to_string()],
            listing_markers: vec!["searchpage".to_string(), "/site/".to_string()],
            product_link_marker: "/product/".to_string(),
            selectors: SiteSelectors::default(),
        }
    }
}

impl SiteProfile {
    /// Reject URLs that are off-domain or carry none of the path markers
    /// for `kind`. Runs before any browser work.
    pub fn validate(&self, url: &str, kind: PageKind) -> Result<()> {
        let markers = match kind {
            PageKind::Product => &self.product_markers,
            PageKind::Listing => &self.listing_markers,
        };

        let on_domain = url.contains(&self.domain);
        let has_marker = markers.iter().any(|m| url.contains(m.as_str()));

        if on_domain && has_marker {
            Ok(())
        } else {
            Err(ScrapeError::InvalidUrl(format!(
                "Invalid {} {} URL",
                self.name,
                kind.label()
            )))
        }
    }

    /// Resolve a possibly relative or protocol-relative link against the base URL.
    pub fn absolute_url(&self, href: &str) -> Option<Url> {
        match Url::parse(href) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&self.base_url).ok()?.join(href).ok()
            }
            Err(_) => None,
        }
    }

    pub fn is_asset_url(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| {
            host == self.asset_domain || host.ends_with(&format!(".{}", self.asset_domain))
        })
    }
}

/// Last non-empty path segment, ignoring any query string or fragment.
pub fn last_path_segment(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.split('/').rev().find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_url() {
        let site = SiteProfile::default();
        assert!(site
            .validate("https://www.bestbuy.com/site/apple-iphone/6525432.p?skuId=6525432", PageKind::Product)
            .is_ok());
        assert!(site
            .validate("https://www.bestbuy.com/product/apple-iphone-15/JJGCQ8", PageKind::Product)
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_off_domain() {
        let site = SiteProfile::default();
        let err = site
            .validate("https://www.example.com/product/abc", PageKind::Product)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Best Buy product URL");
    }

    #[test]
    fn test_validate_rejects_missing_marker() {
        let site = SiteProfile::default();
        assert!(site.validate("https://www.bestbuy.com/cart", PageKind::Product).is_err());
        let err = site
            .validate("https://www.bestbuy.com/product/abc", PageKind::Listing)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Best Buy search/list URL");
    }

    #[test]
    fn test_validate_listing_url() {
        let site = SiteProfile::default();
        assert!(site
            .validate("https://www.bestbuy.com/site/searchpage.jsp?st=iphone", PageKind::Listing)
            .is_ok());
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            last_path_segment("https://www.bestbuy.com/site/x/6525432.p?skuId=6525432"),
            Some("6525432.p")
        );
        assert_eq!(last_path_segment("https://www.bestbuy.com/product/abc/JJGCQ8/"), Some("JJGCQ8"));
        assert_eq!(last_path_segment("/product/abc#reviews"), Some("abc"));
        assert_eq!(last_path_segment("?only=query"), None);
    }

    #[test]
    fn test_element_rule_matching() {
        let rule = ElementRule::new(&["div"], &["priceView"]);
        assert!(rule.matches("div", Some("pricing priceview-hero")));
        assert!(rule.matches("DIV", Some("priceView")));
        assert!(!rule.matches("span", Some("priceView")));
        assert!(!rule.matches("div", None));

        let any = ElementRule::new(&["h1"], &[]);
        assert!(any.matches("h1", None));
    }

    #[test]
    fn test_absolute_url_and_asset_host() {
        let site = SiteProfile::default();
        let url = site.absolute_url("//pisces.bbystatic.com/image.jpg").unwrap();
        assert!(site.is_asset_url(&url));

        let relative = site.absolute_url("/product/abc").unwrap();
        assert_eq!(relative.as_str(), "https://www.bestbuy.com/product/abc");
        assert!(!site.is_asset_url(&relative));

        let lookalike = Url::parse("https://evilbbystatic.com/x.jpg").unwrap();
        assert!(!site.is_asset_url(&lookalike));
    }
}

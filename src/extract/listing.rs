//! First product on a search or listing page.

use scraper::ElementRef;

use crate::domain::site::last_path_segment;
use crate::domain::SiteProfile;
use crate::extract::media::IMAGE_SOURCE_ATTRS;
use crate::extract::{descendants_named, element_text, matches_rule, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHit {
    pub name: Option<String>,
    pub link: String,
    pub full_url: String,
    pub image: Option<String>,
    pub sku: Option<String>,
}

fn is_product_link(element: &ElementRef<'_>, marker: &str) -> bool {
    element.value().name() == "a"
        && element
            .value()
            .attr("href")
            .is_some_and(|href| href.contains(marker))
}

/// Locate the first product link: a direct product anchor, else the first
/// product card's product anchor.
fn first_product_link<'a>(snapshot: &'a Snapshot, site: &SiteProfile) -> Option<ElementRef<'a>> {
    let marker = site.product_link_marker.as_str();

    snapshot
        .elements()
        .find(|el| is_product_link(el, marker))
        .or_else(|| {
            let card = snapshot
                .elements()
                .find(|el| matches_rule(el, &site.selectors.listing_card))?;
            descendants_named(card, &["a"]).find(|el| is_product_link(el, marker))
        })
}

fn image_source(img: ElementRef<'_>) -> Option<String> {
    IMAGE_SOURCE_ATTRS
        .iter()
        .find_map(|attr| img.value().attr(attr).map(str::trim).filter(|src| !src.is_empty()))
        .map(String::from)
}

/// Image inside the anchor, else inside the nearest ancestor that has one
/// (stopping below `body`).
fn nearby_image(anchor: ElementRef<'_>) -> Option<String> {
    if let Some(img) = descendants_named(anchor, &["img"]).next() {
        return image_source(img);
    }

    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !matches!(el.value().name(), "body" | "html"))
        .find_map(|el| descendants_named(el, &["img"]).next())
        .and_then(image_source)
}

pub fn first_product(snapshot: &Snapshot, site: &SiteProfile) -> Option<ListingHit> {
    let anchor = first_product_link(snapshot, site)?;
    let href = anchor.value().attr("href")?.trim().to_string();
    if href.is_empty() {
        return None;
    }

    let name = element_text(anchor).or_else(|| {
        anchor
            .value()
            .attr("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
    });

    let full_url = site
        .absolute_url(&href)
        .map(|url| url.to_string())
        .unwrap_or_else(|| format!("{}{}", site.base_url, href));

    Some(ListingHit {
        name,
        sku: last_path_segment(&href).map(String::from),
        image: nearby_image(anchor),
        full_url,
        link: href,
    })
}

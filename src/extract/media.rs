//! Product images and breadcrumb categories.

use std::collections::HashSet;

use crate::domain::product::MAX_IMAGES;
use crate::domain::{ElementRule, SiteProfile};
use crate::extract::{descendants_named, element_text, Snapshot};

/// Image source attributes, in preference order.
pub const IMAGE_SOURCE_ATTRS: &[&str] = &["src", "data-src"];

/// Product images hosted on the retailer's asset domain, first occurrence
/// of each source kept, at most [`MAX_IMAGES`].
pub fn images(snapshot: &Snapshot, site: &SiteProfile) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for img in snapshot.find_all(&site.selectors.images) {
        let Some(src) = IMAGE_SOURCE_ATTRS
            .iter()
            .find_map(|attr| img.value().attr(attr).filter(|s| !s.trim().is_empty()))
        else {
            continue;
        };
        let Some(url) = site.absolute_url(src.trim()) else {
            continue;
        };
        if !site.is_asset_url(&url) {
            continue;
        }
        let url = url.to_string();
        if seen.insert(url.clone()) {
            images.push(url);
            if images.len() == MAX_IMAGES {
                break;
            }
        }
    }

    images
}

/// Anchor texts of the first breadcrumb, in order and de-duplicated.
pub fn categories(snapshot: &Snapshot, breadcrumb: &ElementRule) -> Vec<String> {
    let Some(trail) = snapshot.find(breadcrumb) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    descendants_named(trail, &["a"])
        .filter_map(element_text)
        .filter(|text| seen.insert(text.clone()))
        .collect()
}

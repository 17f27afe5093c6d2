//! Field extraction over an immutable document snapshot.
//!
//! Every extractor is a pure function of a [`Snapshot`] (and, for the
//! panel-only fields, a [`PanelView`] gathered from the live page
//! beforehand). Extractors return `Option`s; sentinels are applied later by
//! the normalizer.
//!
//! ```text
//! page source → Snapshot::parse → extract::product → ExtractedProduct → Normalizer
//! ```

pub mod fields;
pub mod listing;
pub mod media;
pub mod model;
pub mod specs;
pub mod upc;

use scraper::{ElementRef, Html, Node};

use crate::domain::{Availability, ElementRule, SiteProfile};

/// Elements whose text never counts as document content.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// One immutable parse of the rendered document.
pub struct Snapshot {
    html: Html,
    text: String,
}

impl Snapshot {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let text = collect_text(html.root_element());
        Self { html, text }
    }

    /// Whole-document text with source line breaks preserved
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every element in document order
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    pub fn find_all<'a>(&'a self, rule: &'a ElementRule) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |el| matches_rule(el, rule))
    }

    pub fn find(&self, rule: &ElementRule) -> Option<ElementRef<'_>> {
        self.elements().find(|el| matches_rule(el, rule))
    }
}

pub fn matches_rule(element: &ElementRef<'_>, rule: &ElementRule) -> bool {
    rule.matches(element.value().name(), element.value().attr("class"))
}

/// Descendant elements of `element` with the given tag, in document order.
pub fn descendants_named<'a>(
    element: ElementRef<'a>,
    tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| tags.contains(&el.value().name()))
}

/// Concatenated text of `root`, skipping script and style content.
pub fn collect_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| HIDDEN_TAGS.contains(&parent.value().name()));
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

/// Trimmed text with internal whitespace collapsed; `None` when empty.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = collect_text(element)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Text gathered from the live page after the specifications panel opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    /// UPC read straight from live elements mentioning it
    pub upc: Option<String>,
    /// Rendered text of every modal or dialog element
    pub dialog_texts: Vec<String>,
}

/// Raw extraction results, before sentinels and caps are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedProduct {
    pub name: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
    pub upc: Option<String>,
    pub model: Option<String>,
    pub availability: Option<Availability>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub images: Vec<String>,
    pub specifications: Vec<(String, String)>,
}

/// Run every field extractor against one snapshot.
pub fn product(snapshot: &Snapshot, panel: &PanelView, site: &SiteProfile) -> ExtractedProduct {
    let selectors = &site.selectors;

    ExtractedProduct {
        name: fields::first_text(snapshot, &selectors.name),
        price: fields::first_text(snapshot, &selectors.price),
        rating: fields::first_text(snapshot, &selectors.rating),
        review_count: fields::first_text(snapshot, &selectors.review_count),
        upc: panel
            .upc
            .clone()
            .or_else(|| upc::from_document(snapshot, &panel.dialog_texts, &selectors.detail_blocks)),
        model: model::from_dialogs(&panel.dialog_texts),
        availability: fields::availability(snapshot.text()),
        description: fields::first_text(snapshot, &selectors.description),
        categories: media::categories(snapshot, &selectors.breadcrumb),
        images: media::images(snapshot, site),
        specifications: specs::specifications(snapshot, &selectors.specifications),
    }
}

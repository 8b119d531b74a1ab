// src/core/html.rs
// DOM helpers on top of `scraper`, tailored to the federation's table soup.
// Pages nest tables inside tables, so cells are always taken as *direct*
// children of their row, never via a descendant selector.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::{normalize_entities, normalize_ws};

/// Parse a static CSS selector. Only ever called with literals from this crate.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

pub fn parse(doc: &str) -> Html {
    Html::parse_document(doc)
}

/// Visible text of an element, entities and whitespace normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&normalize_entities(&raw))
}

/// Direct `<td>`/`<th>` children of a row.
pub fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "td" | "th"))
        .collect()
}

/// Direct `<td>` children of a row (header `<th>` cells excluded).
pub fn data_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
        .collect()
}

/// Cell texts of a row, in column order.
pub fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    data_cells(row).into_iter().map(text_of).collect()
}

/// Closest ancestor element with the given tag name.
pub fn closest<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == tag)
}

/// Sibling elements with the same tag, before (nearest first) or after `el`.
pub fn prev_siblings<'a>(el: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |s| s.value().name() == tag)
}

pub fn next_siblings<'a>(el: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |s| s.value().name() == tag)
}

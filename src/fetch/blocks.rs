//! Headline block extraction from listing page HTML
//!
//! The listing page marks each incident headline with a dedicated span
//! class, wrapped in an anchor that links to the full report. This module
//! isolates those blocks; all further interpretation happens in the
//! extract module.

use crate::extract::RawHeadline;
use scraper::{ElementRef, Html, Selector};

/// CSS selector for headline spans on the listing page
const HEADLINE_SELECTOR: &str = "span.headline_avherald";

/// Extracts the ordered headline blocks from one listing page
///
/// Each block carries the span's visible text and the href of the nearest
/// enclosing anchor, if any. A page without headline spans yields an empty
/// vector, which the crawl driver treats as the end of the listing.
pub fn extract_headline_blocks(html: &str) -> Vec<RawHeadline> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(HEADLINE_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|element| RawHeadline {
            text: element.text().collect::<String>().trim().to_string(),
            href: enclosing_link(element),
        })
        .collect()
}

/// Walks up from a headline span to the nearest anchor with an href
fn enclosing_link(element: ElementRef) -> Option<String> {
    let mut node = element.parent();

    while let Some(current) = node {
        if let Some(ancestor) = ElementRef::wrap(current) {
            if ancestor.value().name() == "a" {
                if let Some(href) = ancestor.value().attr("href") {
                    return Some(href.to_string());
                }
            }
        }
        node = current.parent();
    }

    None
}

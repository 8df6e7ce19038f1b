//! Headline field extractor
//!
//! This module turns one raw headline text block into a structured incident
//! record. Clause detection runs in a fixed order: category marker, date
//! segment, location clause, cause clause, report link, title. The order is
//! load-bearing; clauses can be positionally ambiguous and later stages see
//! only what earlier stages left behind.
//!
//! Malformed input never panics here. Every failure either degrades to an
//! empty optional field or rejects the whole block as "not an incident".

use crate::extract::category::IncidentCategory;
use crate::extract::date::strip_date_segment;
use crate::storage::IncidentRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// One isolated headline entry from the listing page
///
/// Produced by the HTML block extraction step: the visible headline text
/// plus the href of the enclosing anchor, if one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeadline {
    /// Visible headline text
    pub text: String,

    /// Relative link attribute of the enclosing anchor
    pub href: Option<String>,
}

/// Matches a location clause: a place-name delimiter followed by
/// capitalized words ("near City Y", "at Berlin", "enroute to Hong Kong")
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:at|near|over|enroute to)\s+([A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*)")
        .expect("location regex is valid")
});

/// Extracts a structured incident record from one headline block
///
/// Returns None when the block is not a valid incident: no resolvable
/// report link, or no title text left once the recognized clauses are
/// stripped away.
///
/// # Example
///
/// ```
/// use avharvest::extract::{extract_record, RawHeadline};
/// use url::Url;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// let block = RawHeadline {
///     text: "Boeing 737 at Berlin on Mar 31st 2025, engine failure".to_string(),
///     href: Some("/h?article=1".to_string()),
/// };
/// let record = extract_record(&block, &base).unwrap();
/// assert_eq!(record.title, "Boeing 737");
/// ```
pub fn extract_record(block: &RawHeadline, base_url: &Url) -> Option<IncidentRecord> {
    let text = block.text.trim();
    if text.is_empty() {
        return None;
    }

    // 1. Leading bracketed category marker
    let (category, rest) = split_category_marker(text);

    // 2. Date segment
    let (rest, occurred_at) = strip_date_segment(rest);

    // 3. Location clause
    let (rest, location) = strip_location_clause(&rest);

    // 4. Cause clause
    let (rest, cause) = strip_cause_clause(&rest);

    // 5. Report link; a block without one is not an incident
    let url = resolve_report_url(block.href.as_deref()?, base_url)?;

    // 6. Whatever survived the stripping is the title
    let title = collapse_whitespace(&rest);
    if title.is_empty() {
        return None;
    }

    Some(IncidentRecord {
        category,
        title,
        location,
        cause,
        occurred_at,
        url,
    })
}

/// Splits off a leading "[marker]" and maps it to a category
///
/// A missing or unterminated marker leaves the text untouched and the
/// category Unknown.
fn split_category_marker(text: &str) -> (IncidentCategory, &str) {
    if let Some(after_open) = text.strip_prefix('[') {
        if let Some(close) = after_open.find(']') {
            let marker = &after_open[..close];
            return (IncidentCategory::from_marker(marker), &after_open[close + 1..]);
        }
    }

    (IncidentCategory::Unknown, text)
}

/// Detects and removes a location clause, keeping the captured place name
fn strip_location_clause(text: &str) -> (String, Option<String>) {
    if let Some(caps) = LOCATION_RE.captures(text) {
        if let (Some(whole), Some(place)) = (caps.get(0), caps.get(1)) {
            let mut remaining = String::with_capacity(text.len());
            remaining.push_str(&text[..whole.start()]);
            remaining.push_str(&text[whole.end()..]);
            return (remaining, Some(place.as_str().trim().to_string()));
        }
    }

    (text.to_string(), None)
}

/// Splits a trailing cause clause off at the last comma
///
/// The tail gets its first letter uppercased. An empty tail (e.g. a comma
/// left behind by the date strip) is consumed without producing a cause.
fn strip_cause_clause(text: &str) -> (String, Option<String>) {
    match text.rfind(',') {
        Some(idx) => {
            let tail = text[idx + 1..].trim();
            let cause = if tail.is_empty() {
                None
            } else {
                Some(capitalize_first(tail))
            };
            (text[..idx].to_string(), cause)
        }
        None => (text.to_string(), None),
    }
}

/// Uppercases the first character of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Resolves a report link against the listing page's base origin
///
/// Returns None if the link should be rejected:
/// - javascript:, mailto:, data: schemes
/// - fragment-only links
/// - URLs that fail to resolve or are not HTTP(S) after resolution
fn resolve_report_url(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("data:")
        || href.starts_with('#')
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

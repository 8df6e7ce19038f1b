//! Headline date segment parsing
//!
//! Listing headlines carry their date as free text ("... on Mar 31st 2025"),
//! optionally prefixed with a connective like "on" or "reported". This module
//! finds such a segment, converts it to an absolute UTC timestamp and removes
//! it from the headline text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted textual date formats, tried in priority order.
///
/// The first successful parse wins. `%b` also accepts full month names,
/// so "March 3 2024" parses through the first entry.
const DATE_FORMATS: [&str; 2] = ["%b %d %Y", "%d %b %Y"];

/// Matches a date segment with an optional leading connective.
///
/// Group 1 is the date itself, month-first ("Mar 3rd 2024", "March 3, 2024")
/// or day-first ("3 Mar 2024").
static DATE_SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:on|reported)\s+)?((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\d{1,2}(?:st|nd|rd|th)?\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4})",
    )
    .expect("date segment regex is valid")
});

/// Strips ordinal suffixes from day numbers ("31st" -> "31")
static ORDINAL_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal regex is valid"));

/// Parses a textual date like "Mar 31st 2025" into a calendar date
///
/// Ordinal suffixes and commas are tolerated. Returns None for anything
/// that matches no accepted format; never panics.
pub fn parse_headline_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }

    // Normalize away ordinal suffixes, commas and uneven spacing
    let cleaned = ORDINAL_SUFFIX_RE.replace_all(raw, "${1}");
    let cleaned = cleaned.replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }

    None
}

/// Converts a textual date into a UNIX timestamp (UTC midnight)
///
/// The listing page never exposes a time of day, so equivalent calendar
/// moments in any accepted format map to the same timestamp.
pub fn date_to_timestamp(raw: &str) -> Option<i64> {
    let date = parse_headline_date(raw)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp())
}

/// Finds the first date segment in a headline, removing it from the text
///
/// Returns the remaining text and the parsed timestamp. A segment that
/// matches the pattern but parses to no valid calendar date (e.g.
/// "Feb 30th 2024") is still removed; the timestamp is simply None.
pub fn strip_date_segment(text: &str) -> (String, Option<i64>) {
    if let Some(caps) = DATE_SEGMENT_RE.captures(text) {
        if let (Some(whole), Some(date_text)) = (caps.get(0), caps.get(1)) {
            let timestamp = date_to_timestamp(date_text.as_str());
            let mut remaining = String::with_capacity(text.len());
            remaining.push_str(&text[..whole.start()]);
            remaining.push_str(&text[whole.end()..]);
            return (remaining, timestamp);
        }
    }

    (text.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_timestamp_valid() {
        assert_eq!(date_to_timestamp("Mar 31st 2025"), Some(1743379200));
        assert_eq!(date_to_timestamp("Jan 1st 2020"), Some(1577836800));
    }

    #[test]
    fn test_date_to_timestamp_invalid() {
        assert_eq!(date_to_timestamp(""), None);
        assert_eq!(date_to_timestamp("Not a date"), None);
        assert_eq!(date_to_timestamp("Feb 30th 2024"), None);
    }

    #[test]
    fn test_equivalent_formats_same_timestamp() {
        // The same calendar moment spelled in every accepted format
        let expected = Some(1709424000); // 2024-03-03 00:00 UTC
        assert_eq!(date_to_timestamp("Mar 3rd 2024"), expected);
        assert_eq!(date_to_timestamp("Mar 3 2024"), expected);
        assert_eq!(date_to_timestamp("March 3, 2024"), expected);
        assert_eq!(date_to_timestamp("3 Mar 2024"), expected);
        assert_eq!(date_to_timestamp("3rd March 2024"), expected);
    }

    #[test]
    fn test_parse_headline_date_fields() {
        let date = parse_headline_date("Dec 25th 2023").unwrap();
        assert_eq!(format!("{}", date), "2023-12-25");
    }

    #[test]
    fn test_strip_date_segment_with_connective() {
        let (remaining, timestamp) =
            strip_date_segment("Boeing 737 at Berlin on Mar 31st 2025, engine failure");
        assert_eq!(timestamp, Some(1743379200));
        assert!(!remaining.contains("Mar"));
        assert!(!remaining.contains("2025"));
        assert!(!remaining.contains(" on "));
        assert!(remaining.contains("Boeing 737 at Berlin"));
        assert!(remaining.contains("engine failure"));
    }

    #[test]
    fn test_strip_date_segment_reported_connective() {
        let (remaining, timestamp) = strip_date_segment("engine fire, reported Mar 3rd 2024");
        assert_eq!(timestamp, Some(1709424000));
        assert!(!remaining.contains("reported"));
        assert!(!remaining.contains("2024"));
    }

    #[test]
    fn test_strip_date_segment_without_date() {
        let (remaining, timestamp) = strip_date_segment("Piper PA-28 at London, gear up landing");
        assert_eq!(remaining, "Piper PA-28 at London, gear up landing");
        assert_eq!(timestamp, None);
    }

    #[test]
    fn test_strip_unparseable_segment_still_removed() {
        let (remaining, timestamp) = strip_date_segment("Stall on Feb 30th 2024, recovered");
        assert_eq!(timestamp, None);
        assert!(!remaining.contains("Feb"));
    }

    #[test]
    fn test_month_name_inside_word_not_matched() {
        // "London" must not trip the connective or month patterns
        let (remaining, timestamp) = strip_date_segment("Approach to London aborted");
        assert_eq!(remaining, "Approach to London aborted");
        assert_eq!(timestamp, None);
    }
}

/// Incident category definitions
///
/// This module defines the severity/type tags a headline can carry in its
/// leading bracketed marker.
use std::fmt;

/// Represents the category of a reported incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncidentCategory {
    /// Hull loss or fatal event
    Crash,

    /// Serious damage or injury
    Accident,

    /// Safety-relevant occurrence without serious damage
    Incident,

    /// Preliminary or follow-up report
    Report,

    /// General news item, not an occurrence
    News,

    /// Marker missing or not in the known vocabulary
    Unknown,
}

impl IncidentCategory {
    /// Maps a bracketed marker's text to a category
    ///
    /// Matching is case-insensitive and substring-based, so markers like
    /// "Crash:" or "INCIDENT REPORT" still resolve. An unrecognized marker
    /// maps to `Unknown`; it is not an error.
    pub fn from_marker(marker: &str) -> Self {
        let marker = marker.to_lowercase();

        // Checked in fixed order; "crash" wins over "incident" if a marker
        // somehow contains both.
        if marker.contains("crash") {
            Self::Crash
        } else if marker.contains("accident") {
            Self::Accident
        } else if marker.contains("incident") {
            Self::Incident
        } else if marker.contains("report") {
            Self::Report
        } else if marker.contains("news") {
            Self::News
        } else {
            Self::Unknown
        }
    }

    /// Returns true if this entry is a news item rather than an occurrence
    pub fn is_news(&self) -> bool {
        matches!(self, Self::News)
    }

    /// Converts the category to a database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Crash => "crash",
            Self::Accident => "accident",
            Self::Incident => "incident",
            Self::Report => "report",
            Self::News => "news",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a category from a database string representation
    ///
    /// Returns None if the string doesn't match any known category.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "crash" => Some(Self::Crash),
            "accident" => Some(Self::Accident),
            "incident" => Some(Self::Incident),
            "report" => Some(Self::Report),
            "news" => Some(Self::News),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Returns all possible categories
    pub fn all_categories() -> Vec<Self> {
        vec![
            Self::Crash,
            Self::Accident,
            Self::Incident,
            Self::Report,
            Self::News,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

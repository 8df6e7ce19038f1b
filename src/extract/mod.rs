//! Field extraction from raw headline blocks
//!
//! This module contains the pure parsing core, including:
//! - Category marker detection and mapping
//! - Textual date segment parsing
//! - Location and cause clause detection
//! - Title cleanup and report URL resolution

mod category;
mod date;
mod headline;

pub use category::IncidentCategory;
pub use date::{date_to_timestamp, parse_headline_date, strip_date_segment};
pub use headline::{extract_record, RawHeadline};

//! Output module for reporting on harvested data
//!
//! This module handles summarizing the store for display.

pub mod stats;

pub use stats::{load_statistics, print_statistics, StoreStatistics};

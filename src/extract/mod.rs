//! Markup extraction for listing and detail pages
//!
//! This module contains the page parsers, including:
//! - The listing extractor (page count widget + product link table)
//! - The detail extractor (tolerant per-field record extraction)
//! - The molecular formula markup converter

mod detail;
mod formula;
mod listing;

pub use detail::DetailExtractor;
pub use formula::convert_formula;
pub use listing::ListingExtractor;

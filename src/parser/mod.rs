//! HTML parsing and data extraction
//!
//! This module handles parsing ucpnz article pages and extracting the
//! title, publish time and plain-text body.

pub mod html;
pub mod sanitize;
pub mod selectors;

// Re-export main parser and public types
pub use html::{ArticleParser, PARAGRAPH_SEPARATOR};
pub use selectors::SiteSelectors;

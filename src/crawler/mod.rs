//! Article fetching and extraction
//!
//! - [`fetcher`] turns URLs into raw page bytes
//! - [`filter`] decides whether an article is recent enough to keep
//! - [`pipeline`] ties fetching, parsing, filtering and formatting together

pub mod fetcher;
pub mod filter;
pub mod pipeline;

pub use fetcher::{decode_bytes, PageFetcher, RawPage, SiteFetcher};
pub use filter::{display_zone, to_display_zone, RecencyFilter};
pub use pipeline::{ArticlePipeline, PageContext};

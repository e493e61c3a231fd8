//! ucpnz - news article extractor for ucpnz.co.nz
//!
//! Fetches article pages, extracts title, publish time and body, drops
//! articles outside a recency window, and renders the rest into markdown
//! documents that can be stored and searched.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page fetching, recency filtering and the extraction pipeline
//! - [`parser`] - HTML parsing and text sanitization
//! - [`models`] - Core data structures and types
//! - [`storage`] - Markdown rendering, article repositories and lookups
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use ucpnz::config::Config;
//! use ucpnz::crawler::{ArticlePipeline, SiteFetcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = ArticlePipeline::new(&config, SiteFetcher::new()?)?;
//!     let article = pipeline
//!         .fetch_article("https://ucpnz.co.nz/2021/06/02/story/")
//!         .await?;
//!     println!("{}", article.content);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{ArticlePipeline, PageFetcher, RecencyFilter, SiteFetcher};
    pub use crate::error::{Error, ErrorCategory, Result, UcpnzErrorTrait};
    pub use crate::models::{sort_by_update_time, Article, Timestamp};
    pub use crate::parser::ArticleParser;
    pub use crate::storage::{ArticleCatalog, ArticleRepository, JsonFileRepository, MarkdownFormatter};
}

// Direct re-exports for convenience
pub use models::{Article, Timestamp};

//! Article persistence and presentation
//!
//! - [`markdown`] renders accepted articles into markdown documents
//! - [`repository`] loads and saves the stored collection
//! - [`catalog`] lists, looks up and searches stored articles

pub mod catalog;
pub mod markdown;
pub mod repository;

pub use catalog::ArticleCatalog;
pub use markdown::MarkdownFormatter;
pub use repository::{ArticleRepository, JsonFileRepository, MemoryRepository};

//! Repository abstraction over stored articles
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  ArticleCatalog / CLI        │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │  ArticleRepository trait     │
//! └──────────────────────────────┘
//!        │                │
//!        ▼                ▼
//! ┌──────────────┐ ┌──────────────┐
//! │  JSON file   │ │    Memory    │
//! └──────────────┘ └──────────────┘
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::Article;

/// Source of the persisted article collection
pub trait ArticleRepository: Send + Sync {
    /// Load every stored article
    fn load(&self) -> Result<Vec<Article>>;
}

// ============================================================================
// JSON file implementation
// ============================================================================

/// Articles stored as one JSON array file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored collection
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so readers never see a half-written file.
    pub fn save_all(&self, articles: &[Article]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(articles)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = articles.len(), "Saved articles");
        Ok(())
    }

    /// Append articles to the stored collection
    pub fn append(&self, articles: &[Article]) -> Result<()> {
        let mut stored = self.load()?;
        stored.extend_from_slice(articles);
        self.save_all(&stored)
    }
}

impl ArticleRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Article>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No article file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        Ok(serde_json::from_slice(&data)?)
    }
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// In-memory repository for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryRepository {
    articles: RwLock<Vec<Article>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }

    /// Add an article to the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned
    pub fn push(&self, article: Article) -> Result<()> {
        self.articles
            .write()
            .map(|mut articles| articles.push(article))
            .map_err(|_| Error::other("article store lock poisoned"))
    }
}

impl ArticleRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<Article>> {
        self.articles
            .read()
            .map(|articles| articles.clone())
            .map_err(|_| Error::other("article store lock poisoned"))
    }
}

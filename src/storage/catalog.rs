//! Read accessors over the stored article collection
//!
//! Every call reloads the collection from the repository; nothing is cached.

use crate::error::{Error, Result};
use crate::models::Article;
use crate::storage::repository::ArticleRepository;

/// Placeholder origin used in lookup errors when no requester is known
const UNKNOWN_ORIGIN: &str = "-";

/// List, lookup and keyword search over stored articles
pub struct ArticleCatalog<R: ArticleRepository> {
    repository: R,

    /// Site name used in error messages
    site: String,

    /// Address of the article the lookup is made on behalf of
    origin: Option<String>,
}

impl<R: ArticleRepository> ArticleCatalog<R> {
    pub fn new(repository: R, site: impl Into<String>) -> Self {
        Self {
            repository,
            site: site.into(),
            origin: None,
        }
    }

    /// Name the requesting article's URL in not-found errors
    #[must_use]
    pub fn with_origin(mut self, url: impl Into<String>) -> Self {
        self.origin = Some(url.into());
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Whole stored collection, in stored order
    pub fn list(&self) -> Result<Vec<Article>> {
        self.repository.load()
    }

    /// Article with exactly this id
    ///
    /// # Errors
    /// `Error::NotFound` when no stored article has the id
    pub fn get(&self, id: &str) -> Result<Article> {
        self.repository
            .load()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound {
                site: self.site.clone(),
                id: id.to_string(),
                origin: self
                    .origin
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ORIGIN.to_string()),
            })
    }

    /// Articles matching any keyword
    ///
    /// Keywords are trimmed and lowercased. A keyword matches an article when
    /// it equals the id or website id, or occurs case-insensitively in the
    /// title, content, website domain or website title. An article is
    /// included once per matching keyword.
    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Vec<Article>> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .collect();

        let mut found = Vec::new();
        for article in self.repository.load()? {
            for keyword in &keywords {
                if matches_keyword(&article, keyword) {
                    found.push(article.clone());
                }
            }
        }

        tracing::debug!(keywords = ?keywords, matches = found.len(), "Searched articles");
        Ok(found)
    }

    /// Whether an article with this exact title is stored
    pub fn contains_title(&self, title: &str) -> Result<bool> {
        Ok(self.repository.load()?.iter().any(|a| a.title == title))
    }
}

fn matches_keyword(article: &Article, keyword: &str) -> bool {
    article.id == keyword
        || article.website_id == keyword
        || [
            &article.title,
            &article.content,
            &article.website_domain,
            &article.website_title,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(keyword))
}

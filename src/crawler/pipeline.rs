//! Single-article extraction pipeline
//!
//! ```text
//! URL ──▶ fetch ──▶ PageContext ──▶ title ──▶ update time ──▶ recency filter
//!                                                                  │
//!                            Article ◀── markdown ◀── content ◀────┘
//! ```
//!
//! One extraction is one awaited network call followed by synchronous
//! transforms over the parsed page. The pipeline holds no mutable state, so
//! many URLs can be extracted concurrently through a shared reference.
//!
//! # Example
//!
//! ```no_run
//! use ucpnz::config::Config;
//! use ucpnz::crawler::{ArticlePipeline, SiteFetcher};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let pipeline = ArticlePipeline::new(&config, SiteFetcher::new()?)?;
//!
//! match pipeline.fetch_article("https://ucpnz.co.nz/2021/06/02/story/").await {
//!     Ok(article) => println!("{}", article.content),
//!     Err(e) if e.is_stale() => println!("skipped: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use scraper::Html;
use url::Url;

use crate::config::{Config, SiteConfig};
use crate::crawler::fetcher::{PageFetcher, RawPage};
use crate::crawler::filter::{to_display_zone, RecencyFilter};
use crate::error::{Error, Result};
use crate::models::Article;
use crate::parser::ArticleParser;
use crate::storage::MarkdownFormatter;
use crate::utils::error::ParseError;
use crate::utils::hash_id;

/// Transient state of one extraction
///
/// Lives only while a page is being turned into an [`Article`].
pub struct PageContext {
    /// Parsed request URL
    pub url: Url,

    /// Undecoded response
    pub raw: RawPage,

    /// Parsed document tree
    pub document: Html,
}

/// Turns article URLs into [`Article`]s
pub struct ArticlePipeline<F: PageFetcher> {
    site: SiteConfig,
    timeout: Duration,
    filter: RecencyFilter,
    parser: ArticleParser,
    formatter: MarkdownFormatter<'static>,
    fetcher: F,
}

impl<F: PageFetcher> ArticlePipeline<F> {
    /// Create a pipeline from configuration
    ///
    /// The request timeout is resolved once here and never changes.
    pub fn new(config: &Config, fetcher: F) -> Result<Self> {
        Self::with_formatter(config, fetcher, MarkdownFormatter::new()?)
    }

    /// Create a pipeline rendering through a custom formatter
    pub fn with_formatter(
        config: &Config,
        fetcher: F,
        formatter: MarkdownFormatter<'static>,
    ) -> Result<Self> {
        Ok(Self {
            site: config.site.clone(),
            timeout: config.site.request_timeout(),
            filter: RecencyFilter::new(config.filter.days),
            parser: ArticleParser::new(),
            formatter,
            fetcher,
        })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn filter(&self) -> RecencyFilter {
        self.filter
    }

    /// Fetch and parse one page
    pub async fn fetch_page(&self, url: Url) -> Result<PageContext> {
        let raw = self.fetcher.fetch_raw(&url, self.timeout).await?;
        let text = raw.text()?;
        let document = Html::parse_document(&text);

        Ok(PageContext { url, raw, document })
    }

    /// Extract the article at `raw_url`
    ///
    /// # Errors
    /// - `Error::Parse(ParseError::InvalidUrl)` if `raw_url` does not parse
    /// - `Error::Fetch` if the page cannot be fetched or decoded
    /// - `Error::Parse` if the title, update time or body is missing
    /// - `Error::TimeOverDays` if the article is outside the recency window;
    ///   callers are expected to skip it
    pub async fn fetch_article(&self, raw_url: &str) -> Result<Article> {
        let url = Url::parse(raw_url).map_err(|source| ParseError::InvalidUrl {
            url: raw_url.to_string(),
            source,
        })?;

        let page = self.fetch_page(url).await?;
        tracing::debug!(url = %page.url, bytes = page.raw.body.len(), "Fetched page");

        self.extract(raw_url, &page)
    }

    /// Build an article from an already fetched page
    pub fn extract(&self, raw_url: &str, page: &PageContext) -> Result<Article> {
        self.extract_at(&Local::now(), raw_url, page)
    }

    /// Build an article, judging recency against `now`
    pub fn extract_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        raw_url: &str,
        page: &PageContext,
    ) -> Result<Article> {
        let mut article = Article::for_site(&self.site);
        article.id = hash_id(raw_url);
        article.source_url = raw_url.to_string();

        article.title = self.parser.extract_title(&page.document)?;
        tracing::debug!(id = %article.id, title = %article.title, "Extracted title");

        let published = self.parser.extract_update_time(&page.document)?;
        article.update_time = to_display_zone(published);

        if !self.filter.accepts_at(now, &article.update_time) {
            tracing::info!(
                url = %raw_url,
                update_time = %article.update_time,
                days = self.filter.days(),
                "Article out of recency window"
            );
            return Err(Error::TimeOverDays {
                update_time: article.update_time,
                days: self.filter.days(),
            });
        }

        let body = self.parser.extract_content(&page.document)?;
        article.content = self.formatter.render(&article, &body)?;

        tracing::info!(id = %article.id, title = %article.title, "Extracted article");
        Ok(article)
    }
}

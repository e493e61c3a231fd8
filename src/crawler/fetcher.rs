//! HTTP fetcher for ucpnz article pages
//!
//! This module provides the network side of the pipeline:
//! - [`PageFetcher`], the seam the pipeline fetches through
//! - [`SiteFetcher`], the reqwest implementation with User-Agent rotation
//! - charset detection and decoding with `encoding_rs`
//!
//! The fetcher issues exactly one request per call. Retry and backoff are the
//! caller's business.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use rand::seq::SliceRandom;
use regex::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT},
    Client,
};
use url::Url;

use crate::utils::error::FetchError;

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-]+)"#).unwrap());

/// Undecoded response of one page request
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL the page was requested from
    pub url: Url,

    /// `Content-Type` header, empty when absent
    pub content_type: String,

    /// Response body
    pub body: Bytes,
}

impl RawPage {
    /// Decode the body to text
    pub fn text(&self) -> Result<String, FetchError> {
        decode_bytes(&self.body, &self.content_type)
    }
}

/// Resolves a URL to raw page bytes within a timeout
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_raw(&self, url: &Url, timeout: Duration) -> Result<RawPage, FetchError>;
}

/// reqwest-backed fetcher for the ucpnz site
pub struct SiteFetcher {
    /// HTTP client with compression and cookie store
    client: Client,

    /// Optional base URL override for testing with mock servers
    base_url: Option<String>,
}

impl SiteFetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().gzip(true).cookie_store(true).build()?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Create a fetcher that sends every request to `base_url` instead of
    /// the URL's own origin, keeping path and query
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let mut fetcher = Self::new()?;
        fetcher.base_url = Some(base_url.trim_end_matches('/').to_string());
        Ok(fetcher)
    }

    /// Address actually requested for `url`
    fn request_url(&self, url: &Url) -> String {
        match &self.base_url {
            Some(base) => {
                let mut target = format!("{base}{}", url.path());
                if let Some(query) = url.query() {
                    target.push('?');
                    target.push_str(query);
                }
                target
            }
            None => url.to_string(),
        }
    }

    /// Build browser-like HTTP headers
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static(self.random_user_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en-NZ;q=0.8,en;q=0.7"),
        );

        headers
    }

    /// Get a random user agent from the pool
    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
    }
}

#[async_trait]
impl PageFetcher for SiteFetcher {
    async fn fetch_raw(&self, url: &Url, timeout: Duration) -> Result<RawPage, FetchError> {
        let target = self.request_url(url);
        tracing::debug!(url = %target, timeout = ?timeout, "Fetching page");

        let response = self
            .client
            .get(&target)
            .headers(self.build_headers())
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(RawPage {
            url: url.clone(),
            content_type,
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(e)
    }
}

/// Decode bytes to a UTF-8 string with charset detection
///
/// 1. `charset=` in the Content-Type header
/// 2. `<meta charset>` in the first KiB of the document
/// 3. UTF-8
///
/// # Errors
///
/// Returns `FetchError::Decode` if the bytes are malformed for the detected
/// encoding
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    let encoding = charset_from_content_type(content_type)
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or(UTF_8);

    let (cow, _encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(FetchError::Decode(format!(
            "{} decoding errors",
            encoding.name()
        )));
    }

    Ok(cow.into_owned())
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    let caps = META_CHARSET_REGEX.captures(&head)?;
    Encoding::for_label(caps.get(1)?.as_str().as_bytes())
}

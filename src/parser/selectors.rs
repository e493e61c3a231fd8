//! CSS selectors for ucpnz article pages
//!
//! Article pages are rendered by a tagDiv WordPress theme. The pieces the
//! extractor needs look like:
//!
//! ```html
//! <span class="td-post-date">
//!   <time class="entry-date updated td-module-date" datetime="2020-11-05T13:30:02+00:00">2020-11-05</time>
//! </span>
//! <div class="td-post-content tagdiv-type"><p>...</p></div>
//! ```

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Attribute on the date child carrying the RFC 3339 timestamp
pub const DATETIME_ATTR: &str = "datetime";

/// Elements whose whole subtree is dropped from the body
pub const NOISE_TAGS: &[&str] = &["script", "blockquote", "iframe", "strong"];

lazy_static! {
    static ref TITLE: Selector = parse_selector!("title");

    static ref DATE: Selector = parse_selector!("span.td-post-date");

    static ref DATE_CHILD: Selector = parse_selector!("time");

    static ref CONTENT: Selector = parse_selector!("div.td-post-content.tagdiv-type");

    static ref PARAGRAPH: Selector = parse_selector!("p");
}

/// Selectors for the fixed ucpnz page layout
pub struct SiteSelectors {
    pub title: &'static Selector,
    pub date: &'static Selector,
    pub date_child: &'static Selector,
    pub content: &'static Selector,
    pub paragraph: &'static Selector,
}

impl SiteSelectors {
    pub fn new() -> Self {
        Self {
            title: &TITLE,
            date: &DATE,
            date_child: &DATE_CHILD,
            content: &CONTENT,
            paragraph: &PARAGRAPH,
        }
    }
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an element name is one of [`NOISE_TAGS`]
pub fn is_noise_tag(name: &str) -> bool {
    NOISE_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

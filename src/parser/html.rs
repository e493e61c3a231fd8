//! HTML article parser for ucpnz pages
//!
//! Title, publish time and body are pulled from the parsed document tree.
//! The body is produced by a single walk over the content container that
//! skips noise subtrees, followed by the text passes in
//! [`crate::parser::sanitize::clean_body`].

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};

use crate::parser::sanitize::{clean_body, replace_illegal_chars};
use crate::parser::selectors::{is_noise_tag, SiteSelectors, DATETIME_ATTR};
use crate::utils::error::ParseError;

/// Appended after every extracted paragraph (a markdown hard line break)
pub const PARAGRAPH_SEPARATOR: &str = "  \n";

/// Article HTML parser for the fixed ucpnz layout
pub struct ArticleParser {
    selectors: SiteSelectors,
}

impl ArticleParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: SiteSelectors::new(),
        }
    }

    /// Text of the first `<title>` element, trimmed and sanitized
    ///
    /// # Errors
    /// Returns `ParseError::TitleNotFound` if the document has no `<title>`
    pub fn extract_title(&self, document: &Html) -> Result<String, ParseError> {
        let element = document
            .select(self.selectors.title)
            .next()
            .ok_or(ParseError::TitleNotFound)?;

        let title = element.text().collect::<String>();
        Ok(replace_illegal_chars(title.trim()))
    }

    /// Publish time from `<span class="td-post-date"><time datetime="...">`
    ///
    /// The instant keeps the offset it was published with; callers normalize
    /// it with [`crate::crawler::filter::to_display_zone`].
    ///
    /// # Errors
    /// - `ParseError::DateNotFound` if the date span is missing
    /// - `ParseError::TimestampMissing` if the `datetime` value is absent or empty
    /// - `ParseError::InvalidTimestamp` if the value is not RFC 3339
    pub fn extract_update_time(&self, document: &Html) -> Result<DateTime<FixedOffset>, ParseError> {
        let date = document
            .select(self.selectors.date)
            .next()
            .ok_or(ParseError::DateNotFound)?;

        let value = date
            .select(self.selectors.date_child)
            .filter_map(|child| child.value().attr(DATETIME_ATTR))
            .map(str::trim)
            .next()
            .filter(|v| !v.is_empty())
            .ok_or(ParseError::TimestampMissing)?;

        DateTime::parse_from_rfc3339(value).map_err(|source| ParseError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
    }

    /// Plain-text body of the content container
    ///
    /// Every `<p>` in `div.td-post-content.tagdiv-type` contributes its text
    /// followed by [`PARAGRAPH_SEPARATOR`]. `script`, `blockquote`, `iframe`
    /// and `strong` subtrees contribute nothing.
    ///
    /// # Errors
    /// Returns `ParseError::ContentNotFound` if no paragraph survives
    pub fn extract_content(&self, document: &Html) -> Result<String, ParseError> {
        let container = document
            .select(self.selectors.content)
            .next()
            .ok_or(ParseError::ContentNotFound)?;

        let mut body = String::new();
        let mut paragraphs = 0usize;

        for paragraph in container.select(self.selectors.paragraph) {
            if Self::inside_noise(paragraph, container) {
                continue;
            }
            Self::collect_text(paragraph, &mut body);
            body.push_str(PARAGRAPH_SEPARATOR);
            paragraphs += 1;
        }

        if paragraphs == 0 {
            return Err(ParseError::ContentNotFound);
        }

        tracing::trace!(paragraphs, "collected article paragraphs");
        Ok(clean_body(&body))
    }

    /// Whether `element` sits under a noise element below `container`
    fn inside_noise(element: ElementRef<'_>, container: ElementRef<'_>) -> bool {
        element
            .ancestors()
            .take_while(|node| node.id() != container.id())
            .filter_map(|node| node.value().as_element())
            .any(|el| is_noise_tag(el.name()))
    }

    /// Append the text under `element`, skipping noise subtrees
    fn collect_text(element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child) = ElementRef::wrap(child) {
                if !is_noise_tag(child.value().name()) {
                    Self::collect_text(child, out);
                }
            }
        }
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new()
    }
}

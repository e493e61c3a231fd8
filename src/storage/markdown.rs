//! Markdown document rendering with the Handlebars template engine
//!
//! Every accepted article is stored as one markdown document: a heading,
//! a metadata line linking back to the site, the body, and a footer with the
//! source address.

use std::path::Path;

use handlebars::{no_escape, Handlebars};
use serde::Serialize;

use crate::error::Result;
use crate::models::Article;
use crate::utils::query_unescape;

/// Default article template
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/article.hbs");

const TEMPLATE_NAME: &str = "article";

/// Template data for rendering
#[derive(Debug, Serialize)]
struct ArticleTemplateData<'a> {
    title: &'a str,
    last_update: String,
    website_title: &'a str,
    website_domain: &'a str,
    body: &'a str,
    source_url: String,
}

impl<'a> ArticleTemplateData<'a> {
    fn new(article: &'a Article, body: &'a str) -> Self {
        Self {
            title: &article.title,
            last_update: article
                .update_time
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
            website_title: &article.website_title,
            website_domain: &article.website_domain,
            body,
            source_url: footer_url(&article.source_url),
        }
    }
}

/// Source address as shown in the footer
///
/// An address that fails to unescape is shown raw, followed by the error.
fn footer_url(raw: &str) -> String {
    match query_unescape(raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = %raw, error = %e, "Failed to unescape source url");
            format!("{raw}\n\nunescape url error:\n{e}")
        }
    }
}

/// Markdown formatter with Handlebars template engine
pub struct MarkdownFormatter<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> MarkdownFormatter<'a> {
    /// Create a formatter with the built-in template
    ///
    /// # Example
    /// ```
    /// use ucpnz::storage::MarkdownFormatter;
    ///
    /// let formatter = MarkdownFormatter::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        let mut handlebars = Self::engine();
        handlebars.register_template_string(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Create with custom template file
    ///
    /// The template sees `title`, `last_update`, `website_title`,
    /// `website_domain`, `body` and `source_url`.
    pub fn with_template(template_path: &Path) -> Result<Self> {
        let mut handlebars = Self::engine();
        handlebars.register_template_file(TEMPLATE_NAME, template_path)?;
        Ok(Self { handlebars })
    }

    fn engine() -> Handlebars<'a> {
        let mut handlebars = Handlebars::new();
        // output is markdown, not HTML
        handlebars.register_escape_fn(no_escape);
        handlebars
    }

    /// Render the markdown document for `article` around `body`
    ///
    /// `article.content` is ignored; `update_time` is printed as is, so
    /// callers normalize it to the display zone first.
    pub fn render(&self, article: &Article, body: &str) -> Result<String> {
        let data = ArticleTemplateData::new(article, body);
        Ok(self.handlebars.render(TEMPLATE_NAME, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::DateTime;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_article(url: &str) -> Article {
        let mut article = Article::for_site(&SiteConfig::default());
        article.title = "以色列将于14日前投票批准新政府".to_string();
        article.update_time = DateTime::parse_from_rfc3339("2021-06-02T15:44:33+08:00").unwrap();
        article.source_url = url.to_string();
        article
    }

    #[test]
    fn test_render_article() {
        let formatter = MarkdownFormatter::new().unwrap();
        let article = create_test_article("https://ucpnz.co.nz/2021/06/02/a/");

        let markdown = formatter.render(&article, "第一段  \n").unwrap();

        assert_eq!(
            markdown,
            "# 以色列将于14日前投票批准新政府\n\n\
             LastUpdate: 2021-06-02T15:44:33+08:00 @ [UCPNZ](/list/?v=ucpnz.co.nz): [ucpnz.co.nz](http://ucpnz.co.nz)\n\n\
             ---\n\
             第一段  \n\n\n\
             原地址：[https://ucpnz.co.nz/2021/06/02/a/](https://ucpnz.co.nz/2021/06/02/a/)"
        );
    }

    #[test]
    fn test_render_does_not_escape_markup() {
        let formatter = MarkdownFormatter::new().unwrap();
        let mut article = create_test_article("https://ucpnz.co.nz/a/");
        article.title = "A & B 'quoted'".to_string();

        let markdown = formatter.render(&article, "x = 1 & y").unwrap();
        assert!(markdown.starts_with("# A & B 'quoted'\n"));
        assert!(markdown.contains("x = 1 & y"));
    }

    #[test]
    fn test_render_unescapes_source_url() {
        let formatter = MarkdownFormatter::new().unwrap();
        let article = create_test_article("https://ucpnz.co.nz/2021/06/02/%E6%96%B0%E9%97%BB/");

        let markdown = formatter.render(&article, "").unwrap();
        assert!(markdown.ends_with(
            "原地址：[https://ucpnz.co.nz/2021/06/02/新闻/](https://ucpnz.co.nz/2021/06/02/新闻/)"
        ));
    }

    #[test]
    fn test_render_keeps_raw_url_on_unescape_error() {
        let formatter = MarkdownFormatter::new().unwrap();
        let article = create_test_article("https://ucpnz.co.nz/a%zz/");

        let markdown = formatter.render(&article, "").unwrap();
        assert!(markdown.contains("原地址：[https://ucpnz.co.nz/a%zz/\n\nunescape url error:\n"));
    }

    #[test]
    fn test_with_template() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{{{title}}}}|{{{{body}}}}").unwrap();

        let formatter = MarkdownFormatter::with_template(file.path()).unwrap();
        let article = create_test_article("https://ucpnz.co.nz/a/");

        let markdown = formatter.render(&article, "正文").unwrap();
        assert_eq!(markdown, "以色列将于14日前投票批准新政府|正文");
    }

    #[test]
    fn test_with_missing_template_fails() {
        let result = MarkdownFormatter::with_template(Path::new("/nonexistent/article.hbs"));
        assert!(result.is_err());
    }
}

//! Common test utilities

use chrono::{DateTime, SecondsFormat, Utc};
use ucpnz::config::{Config, SiteConfig};
use ucpnz::models::Article;

/// Timestamp attribute value for an article published right now
#[allow(dead_code)]
pub fn fresh_datetime() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Article page in the site's theme layout
#[allow(dead_code)]
pub fn article_page(title: &str, datetime: &str, paragraphs: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head><meta charset="UTF-8"><title>{title}</title></head>
<body>
<header class="td-post-title">
  <h1 class="entry-title">{title}</h1>
  <div class="td-module-meta-info">
    <span class="td-post-date"><time class="entry-date updated td-module-date" datetime="{datetime}">2021-06-02</time></span>
  </div>
</header>
<div class="td-post-content tagdiv-type">
{paragraphs}
</div>
<div class="comments"><p>侧栏评论</p></div>
</body>
</html>"#
    )
}

/// Default configuration
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config::default()
}

/// Stored article with the given id, title and content
#[allow(dead_code)]
pub fn create_article(id: &str, title: &str, content: &str, update_time: &str) -> Article {
    let mut article = Article::for_site(&SiteConfig::default());
    article.id = id.to_string();
    article.title = title.to_string();
    article.content = content.to_string();
    article.update_time = DateTime::parse_from_rfc3339(update_time).expect("valid RFC 3339");
    article.source_url = format!("https://ucpnz.co.nz/{id}/");
    article
}

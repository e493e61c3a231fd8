use anyhow::{Context, Result};
use futures::future::join_all;

use ucpnz::config::Config;
use ucpnz::crawler::{ArticlePipeline, SiteFetcher};
use ucpnz::error::Error;
use ucpnz::models::Article;
use ucpnz::storage::{ArticleCatalog, JsonFileRepository};

pub async fn fetch(config: &Config, urls: Vec<String>, no_save: bool) -> Result<()> {
    let fetcher = SiteFetcher::new().context("Failed to create HTTP client")?;
    let pipeline =
        ArticlePipeline::new(config, fetcher).context("Failed to create article pipeline")?;
    let catalog = ArticleCatalog::new(
        JsonFileRepository::new(&config.storage.articles_path),
        config.site.title.clone(),
    );

    tracing::info!(
        site = %pipeline.site().domain,
        count = urls.len(),
        timeout = ?pipeline.timeout(),
        days = pipeline.filter().days(),
        "Fetching articles"
    );

    let results = join_all(urls.iter().map(|url| pipeline.fetch_article(url))).await;

    let mut accepted: Vec<Article> = Vec::new();
    let mut stale = 0usize;
    let mut failed = 0usize;

    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(article) => {
                let seen = accepted.iter().any(|a| a.title == article.title)
                    || catalog.contains_title(&article.title)?;
                if seen {
                    let err = Error::DuplicateTitle(article.title.clone());
                    tracing::info!(url = %url, error = %err, "Skipping article");
                    continue;
                }
                println!("{}\n", article.content);
                accepted.push(article);
            }
            Err(e) if e.is_stale() => {
                tracing::info!(url = %url, error = %e, "Skipping stale article");
                stale += 1;
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to fetch article");
                failed += 1;
            }
        }
    }

    if !no_save && !accepted.is_empty() {
        catalog
            .repository()
            .append(&accepted)
            .with_context(|| {
                format!(
                    "Failed to save articles to {}",
                    catalog.repository().path().display()
                )
            })?;
    }

    println!("================================");
    println!("Accepted: {}", accepted.len());
    println!("Stale:    {stale}");
    println!("Failed:   {failed}");
    if !no_save {
        println!("Stored in {}", config.storage.articles_path.display());
    }

    Ok(())
}

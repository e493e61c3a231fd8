use anyhow::Result;

use ucpnz::config::Config;
use ucpnz::models::sort_by_update_time;
use ucpnz::storage::{ArticleCatalog, JsonFileRepository};

pub(super) fn open(config: &Config) -> ArticleCatalog<JsonFileRepository> {
    ArticleCatalog::new(
        JsonFileRepository::new(&config.storage.articles_path),
        config.site.title.clone(),
    )
}

pub fn list(config: &Config) -> Result<()> {
    let mut articles = open(config).list()?;

    if articles.is_empty() {
        println!("No stored articles in {}", config.storage.articles_path.display());
        return Ok(());
    }

    sort_by_update_time(&mut articles);
    for article in &articles {
        println!(
            "{}  {}  {}",
            article.id,
            article.update_time.to_rfc3339(),
            article.title
        );
    }
    println!("\nTotal: {}", articles.len());

    Ok(())
}

pub fn get(config: &Config, id: &str) -> Result<()> {
    let article = open(config).get(id)?;
    println!("{}", article.content);
    Ok(())
}

use anyhow::Result;

use ucpnz::config::Config;

use super::list::open;

pub fn search(config: &Config, keywords: &[String]) -> Result<()> {
    println!("Searching for: {keywords:?}");
    println!("================================");

    let results = open(config).search(keywords)?;

    if results.is_empty() {
        println!("\nNo results found");
        return Ok(());
    }

    println!("\nFound {} results:\n", results.len());

    for (i, article) in results.iter().enumerate() {
        println!("{}. {}", i + 1, article.title);
        println!("   ID: {}", article.id);
        println!("   Updated: {}", article.update_time.to_rfc3339());
        println!("   URL: {}", article.source_url);
        println!();
    }

    Ok(())
}

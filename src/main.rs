use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ucpnz::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "ucpnz",
    version,
    about = "Fetch ucpnz.co.nz news articles into markdown documents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch articles by URL
    Fetch {
        /// Article URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print articles without storing them
        #[arg(long, default_value = "false")]
        no_save: bool,
    },

    /// List stored articles, oldest first
    List,

    /// Print one stored article
    Get {
        /// Article ID
        id: String,
    },

    /// Search stored articles by keyword
    Search {
        /// Keywords; an article matching any of them is shown
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::info!(site = %config.site.domain, "ucpnz starting");

    match cli.command {
        Commands::Fetch { urls, no_save } => commands::fetch(&config, urls, no_save).await?,
        Commands::List => commands::list(&config)?,
        Commands::Get { id } => commands::get(&config, &id)?,
        Commands::Search { keywords } => commands::search(&config, &keywords)?,
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ucpnz=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("ucpnz={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

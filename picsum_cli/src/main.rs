mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use picsum_lib::GalleryConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "picsum")]
#[command(about = "Browse the Lorem Picsum photo catalog")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Catalog base URL (overrides the config file and PICSUM_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through the photo grid
    Browse(commands::browse::BrowseArgs),
    /// Show the details of one photo
    Show(commands::show::ShowArgs),
    /// Print a sized image URL for a photo
    Url(commands::url::UrlArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("picsum=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);

    let mut config = GalleryConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate()?;
    }
    let client = config.client();

    match &cli.command {
        Commands::Browse(args) => commands::browse::run(args, &client, &config, &format).await?,
        Commands::Show(args) => commands::show::run(args, &client, &format).await?,
        Commands::Url(args) => commands::url::run(args, &client)?,
    }

    Ok(())
}

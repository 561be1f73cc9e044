use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use picsum_lib::validation;
use picsum_lib::{Client, FetchOutcome, GalleryConfig, PhotoLoader};

use crate::output::{
    print_json, print_photos_csv, print_photos_markdown, print_photos_table, OutputFormat,
};

#[derive(Args)]
pub struct BrowseArgs {
    /// Number of pages to load; 0 keeps loading until the catalog runs out
    #[arg(long, default_value = "1")]
    pub pages: u32,

    /// Photos per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<u32>,
}

pub async fn run(
    args: &BrowseArgs,
    client: &Client,
    config: &GalleryConfig,
    format: &OutputFormat,
) -> Result<()> {
    let page_size = validation::validate_page_size(args.page_size.unwrap_or(config.page_size))?;
    let loader = PhotoLoader::new(Arc::new(client.clone()), page_size);

    let pb = super::spinner("loading photos...");
    let mut pages_loaded = 0u32;
    while args.pages == 0 || pages_loaded < args.pages {
        // Scrolling to the last card fires the trigger; an empty grid signals directly.
        let handle = match loader.observed_item() {
            Some(id) => loader.on_item_visible(&id),
            None => loader.on_load_more_signal(),
        };
        let Some(handle) = handle else {
            break;
        };
        pb.set_message(format!("loading page {}...", handle.page()));
        match handle.wait().await {
            FetchOutcome::Appended { .. } => pages_loaded += 1,
            _ => break,
        }
    }
    pb.finish_and_clear();

    let state = loader.get_state();
    if state.is_initial_failure() {
        if let Some(err) = &state.last_error {
            bail!("{} ({})", err, err.cause());
        }
    }

    match format {
        OutputFormat::Table => print_photos_table(&state.photos, client),
        OutputFormat::Json => print_json(&*state.photos),
        OutputFormat::Csv => print_photos_csv(&state.photos, client)?,
        OutputFormat::Markdown => print_photos_markdown(&state.photos, client),
    }

    if let Some(err) = &state.last_error {
        eprintln!("{}", err);
    }
    if state.reached_end() {
        eprintln!("You've reached the end of our collection");
    }
    eprintln!(
        "Loaded {} photos from {} page(s)",
        state.photos.len(),
        pages_loaded
    );

    Ok(())
}

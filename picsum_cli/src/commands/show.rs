use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use picsum_lib::validation;
use picsum_lib::{Client, DetailLoader, DetailState, PhotoDetail};

use crate::output::{print_detail_markdown, print_detail_table, print_json, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Photo id (e.g. 237)
    pub id: String,
}

pub async fn run(args: &ShowArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let id = validation::validate_photo_id(&args.id)?;

    let pb = super::spinner(&format!("loading photo {}...", id));
    let mut loader = DetailLoader::mount(Arc::new(client.clone()), &id);
    let state = loader.wait().await;
    pb.finish_and_clear();

    let photo = match state {
        DetailState::Loaded(photo) => photo,
        DetailState::Failed(err) => bail!("{} ({})", err, err.cause()),
        DetailState::Loading => bail!("photo {} did not finish loading", id),
    };
    let detail = PhotoDetail::new(&photo, client);

    match format {
        OutputFormat::Json => print_json(&detail),
        OutputFormat::Markdown => print_detail_markdown(&detail),
        OutputFormat::Table | OutputFormat::Csv => print_detail_table(&detail),
    }

    Ok(())
}

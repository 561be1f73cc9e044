use anyhow::Result;
use clap::Args;
use picsum_lib::types::ImageSize;
use picsum_lib::validation;
use picsum_lib::Client;

#[derive(Args)]
pub struct UrlArgs {
    /// Photo id (e.g. 237)
    pub id: String,

    /// Width in pixels (defaults to 400, or 1200 with --full)
    #[arg(long)]
    pub width: Option<u32>,

    /// Height in pixels (defaults to 300, or 800 with --full)
    #[arg(long)]
    pub height: Option<u32>,

    /// Print the full-size URL instead of the thumbnail
    #[arg(long)]
    pub full: bool,
}

pub fn run(args: &UrlArgs, client: &Client) -> Result<()> {
    println!("{}", image_url(args, client)?);
    Ok(())
}

fn image_url(args: &UrlArgs, client: &Client) -> Result<String> {
    let id = validation::validate_photo_id(&args.id)?;
    let default = if args.full {
        ImageSize::FULL
    } else {
        ImageSize::THUMBNAIL
    };
    let width = validation::validate_dimension(args.width.unwrap_or(default.width))?;
    let height = validation::validate_dimension(args.height.unwrap_or(default.height))?;

    Ok(if args.full {
        client.full_size_url(&id, width, height)
    } else {
        client.thumbnail_url(&id, width, height)
    })
}

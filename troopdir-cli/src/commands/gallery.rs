use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use troopdir_core::gallery::{GalleryImage, gallery_key};
use troopdir_core::store::{Store, list_records, put_record};

use crate::render;

#[derive(Subcommand)]
pub enum GalleryCommand {
    /// Record an image already uploaded to the content host
    Add {
        title: String,

        /// Public URL at the content host
        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        album: Option<String>,

        #[arg(short, long)]
        caption: Option<String>,
    },

    /// List gallery images
    List {
        /// Only this album
        #[arg(short, long)]
        album: Option<String>,
    },
}

pub fn run(cmd: GalleryCommand, store: &dyn Store) -> Result<()> {
    match cmd {
        GalleryCommand::Add {
            title,
            url,
            album,
            caption,
        } => {
            let mut image = GalleryImage::new(title, url);
            image.album = album;
            image.caption = caption.unwrap_or_default();

            put_record(store, &gallery_key(&image.id), &image)?;
            render::success(&format!("Added {} to the gallery", image.title));
            Ok(())
        }

        GalleryCommand::List { album } => {
            let images: Vec<GalleryImage> = list_records(store, "gallery/images")?
                .into_iter()
                .map(|(_, image)| image)
                .filter(|i: &GalleryImage| {
                    album.as_deref().is_none_or(|a| i.album.as_deref() == Some(a))
                })
                .collect();

            if images.is_empty() {
                render::empty("No gallery images");
                return Ok(());
            }

            for image in &images {
                let album = image.album.as_deref().unwrap_or("unfiled");
                println!(
                    "  {} {} {}",
                    image.title,
                    format!("[{album}]").dimmed(),
                    image.url.dimmed()
                );
            }
            Ok(())
        }
    }
}

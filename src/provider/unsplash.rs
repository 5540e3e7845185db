use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::api::unsplash::client::Client;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::helpers::{staging_path, write_atomic};
use crate::image_data::ImageData;

pub struct Unsplash {
    client: Client,
}

impl Unsplash {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads a random photo to the current wallpaper path and records its
    /// attribution next to it.
    pub async fn download_wallpaper(&self, config: &Config) -> Result<PathBuf> {
        let access_key = config.access_key()?;

        fs::create_dir_all(&config.wallpaper_dir).await?;

        info!("Fetching a random image from Unsplash...");
        let image: ImageData = self
            .client
            .random_photo(access_key, &config.query, config.orientation)
            .await?
            .into();
        info!("Photo by {} (ID: {})", image.photographer(), image.id());

        let destination = config.current_wallpaper();
        self.save_image(&image, &destination).await?;
        info!("Image saved: {}", destination.display());

        let metadata = image.metadata(chrono::Local::now());
        write_atomic(&config.metadata_file(), metadata.as_bytes()).await?;

        Ok(destination)
    }

    async fn save_image(&self, image: &ImageData, destination: &Path) -> Result<()> {
        let mut response = self.client.download(image.url()).await?;

        let staging = staging_path(destination);
        let mut file = fs::File::create(&staging).await?;
        let streamed = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<_, Error>(())
        }
        .await;
        drop(file);

        if let Err(err) = streamed {
            let _ = fs::remove_file(&staging).await;
            return Err(err);
        }

        fs::rename(&staging, destination).await?;
        Ok(())
    }
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tokio::fs;

use super::gnome::Gnome;
use super::DesktopEnvironment;
use crate::core::command::Runner;
use crate::error::{Error, Result};

const BACKGROUND_CONFIG: &str = "cosmic/com.system76.CosmicBackground/v1";

/// cosmic-bg watches its config files, writing them in place is enough.
pub struct Cosmic {
    config: PathBuf,
}

impl Cosmic {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config: config_dir.join(BACKGROUND_CONFIG),
        }
    }
}

fn background_entry(path: &Path) -> String {
    format!(
        r#"(
    output: "all",
    source: Path({:?}),
    filter_by_theme: true,
    rotation_frequency: 300,
    filter_method: Lanczos,
    scaling_mode: Zoom,
    sampling_method: Alphanumeric,
)"#,
        path.to_string_lossy()
    )
}

#[async_trait]
impl DesktopEnvironment for Cosmic {
    fn name(&self) -> &str {
        "COSMIC"
    }

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()> {
        if self.config.is_dir() {
            fs::write(self.config.join("all"), background_entry(path)).await?;

            let same_on_all = self.config.join("same-on-all");
            if same_on_all.exists() {
                fs::write(&same_on_all, "true").await?;
            }

            info!("COSMIC background config updated");
            return Ok(());
        }

        debug!("{} missing, trying gsettings", self.config.display());
        Gnome::set_background(runner, path).await.map_err(|err| {
            debug!("gsettings fallback failed: {}", err);
            Error::ToolNotFound("no supported tool for COSMIC".into())
        })
    }
}

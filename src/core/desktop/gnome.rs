use std::path::Path;

use async_trait::async_trait;
use log::warn;

use super::DesktopEnvironment;
use crate::core::command::{Invocation, Runner};
use crate::error::Result;
use crate::helpers::file_uri;

const SCHEMA: &str = "org.gnome.desktop.background";

pub struct Gnome {}

impl Gnome {
    fn set_key(key: &str, path: &Path) -> Invocation {
        Invocation::new("gsettings", ["set", SCHEMA, key, file_uri(path).as_str()])
    }

    /// Sets the light and dark variants. The dark key only exists since
    /// GNOME 42, so failing to set it is not an error.
    pub(super) async fn set_background(runner: &dyn Runner, path: &Path) -> Result<()> {
        runner.run(&Self::set_key("picture-uri", path)).await?;

        if let Err(err) = runner.run(&Self::set_key("picture-uri-dark", path)).await {
            warn!("Could not set the dark wallpaper variant: {}", err);
        }

        Ok(())
    }
}

#[async_trait]
impl DesktopEnvironment for Gnome {
    fn name(&self) -> &str {
        "GNOME"
    }

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()> {
        Self::set_background(runner, path).await
    }
}

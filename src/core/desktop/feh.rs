use std::path::Path;

use async_trait::async_trait;

use super::DesktopEnvironment;
use crate::core::command::{Invocation, Runner};
use crate::error::Result;

/// Fallback for window managers without their own settings daemon.
pub struct Feh {}

#[async_trait]
impl DesktopEnvironment for Feh {
    fn name(&self) -> &str {
        "feh"
    }

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()> {
        let path = path.to_string_lossy().into_owned();
        runner
            .run(&Invocation::new("feh", ["--bg-scale", path.as_str()]))
            .await
    }
}

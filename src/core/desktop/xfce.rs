use std::path::Path;

use async_trait::async_trait;

use super::DesktopEnvironment;
use crate::core::command::{Invocation, Runner};
use crate::error::Result;

const LAST_IMAGE: &str = "/backdrop/screen0/monitor0/workspace0/last-image";

pub struct Xfce {}

#[async_trait]
impl DesktopEnvironment for Xfce {
    fn name(&self) -> &str {
        "XFCE"
    }

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()> {
        let path = path.to_string_lossy().into_owned();
        runner
            .run(&Invocation::new(
                "xfconf-query",
                [
                    "--channel",
                    "xfce4-desktop",
                    "--property",
                    LAST_IMAGE,
                    "--set",
                    path.as_str(),
                ],
            ))
            .await
    }
}

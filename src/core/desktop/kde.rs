use std::path::Path;

use async_trait::async_trait;
use log::debug;

use super::DesktopEnvironment;
use crate::core::command::{Invocation, Runner};
use crate::error::{Error, Result};
use crate::helpers::file_uri;

/// Plasma 6 ships `qdbus6`, Plasma 5 ships `qdbus`.
const QDBUS: [&str; 2] = ["qdbus6", "qdbus"];

pub struct Kde {}

fn script(path: &Path) -> String {
    format!(
        r#"
var allDesktops = desktops();
for (var i = 0; i < allDesktops.length; i++) {{
    var d = allDesktops[i];
    d.wallpaperPlugin = "org.kde.image";
    d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
    d.writeConfig("Image", {:?});
}}
"#,
        file_uri(path)
    )
}

#[async_trait]
impl DesktopEnvironment for Kde {
    fn name(&self) -> &str {
        "KDE Plasma"
    }

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()> {
        let script = script(path);

        for qdbus in QDBUS {
            let invocation = Invocation::new(
                qdbus,
                [
                    "org.kde.plasmashell",
                    "/PlasmaShell",
                    "org.kde.PlasmaShell.evaluateScript",
                    script.as_str(),
                ],
            );

            match runner.run(&invocation).await {
                Err(err) if err.is_tool_not_found() => debug!("{} not installed", qdbus),
                result => return result,
            }
        }

        Err(Error::ToolNotFound(QDBUS.join("/")))
    }
}

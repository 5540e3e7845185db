use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;

pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Printed when no backend could apply the wallpaper.
pub fn print_manual_steps(image: &Path) {
    println!("Please install the tools for your desktop environment.");
    println!("The image was downloaded to: {}", image.display());
    println!("You can set it manually in your desktop settings.");
}

/// Sibling path a file is staged under before it replaces `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.part", name))
}

/// Writes through a staging file so readers never see a partial file.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let staging = staging_path(path);
    fs::write(&staging, contents).await?;
    fs::rename(&staging, path).await?;
    Ok(())
}

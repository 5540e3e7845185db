use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{error, info, warn};

use crate::core::command::Runner;
use crate::core::desktop::cosmic::Cosmic;
use crate::core::desktop::feh::Feh;
use crate::core::desktop::gnome::Gnome;
use crate::core::desktop::kde::Kde;
use crate::core::desktop::xfce::Xfce;
use crate::error::Result;
use crate::helpers::print_manual_steps;

mod cosmic;
mod feh;
mod gnome;
mod kde;
mod xfce;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopKind {
    Cosmic,
    Gnome,
    Kde,
    Xfce,
    Other,
}

/// Substrings checked in order, the first hit decides.
const PRIORITY: &[(&str, DesktopKind)] = &[
    ("cosmic", DesktopKind::Cosmic),
    ("gnome", DesktopKind::Gnome),
    ("ubuntu", DesktopKind::Gnome),
    ("kde", DesktopKind::Kde),
    ("plasma", DesktopKind::Kde),
    ("xfce", DesktopKind::Xfce),
];

impl DesktopKind {
    pub fn classify(desktop: &str) -> Self {
        let desktop = desktop.to_lowercase();

        PRIORITY
            .iter()
            .find(|(needle, _)| desktop.contains(needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(DesktopKind::Other)
    }
}

#[async_trait]
pub trait DesktopEnvironment: Send + Sync {
    fn name(&self) -> &str;

    async fn set_wallpaper(&self, runner: &dyn Runner, path: &Path) -> Result<()>;
}

pub fn initialize(kind: DesktopKind, config_dir: &Path) -> Box<dyn DesktopEnvironment> {
    match kind {
        DesktopKind::Cosmic => Box::new(Cosmic::new(config_dir)),
        DesktopKind::Gnome => Box::new(Gnome {}),
        DesktopKind::Kde => Box::new(Kde {}),
        DesktopKind::Xfce => Box::new(Xfce {}),
        DesktopKind::Other => Box::new(Feh {}),
    }
}

pub struct Dispatcher<'a> {
    runner: &'a dyn Runner,
    config_dir: PathBuf,
}

impl<'a> Dispatcher<'a> {
    pub fn new(runner: &'a dyn Runner, config_dir: &Path) -> Self {
        Self {
            runner,
            config_dir: config_dir.to_path_buf(),
        }
    }

    /// Applies the wallpaper with the backend matching `desktop`.
    ///
    /// Backend failures are reported here and never returned; the result only
    /// says whether the wallpaper was applied.
    pub async fn set_wallpaper(&self, desktop: &str, path: &Path) -> bool {
        let kind = DesktopKind::classify(desktop);
        if kind == DesktopKind::Other {
            info!("Desktop environment '{}' not recognized, trying feh", desktop);
        }

        let backend = initialize(kind, &self.config_dir);
        match backend.set_wallpaper(self.runner, path).await {
            Ok(()) => {
                info!("Wallpaper set for {}", backend.name());
                true
            }
            Err(err) if err.is_tool_not_found() => {
                warn!("{} ({})", err, backend.name());
                print_manual_steps(path);
                false
            }
            Err(err) => {
                error!("Failed to set wallpaper for {}: {}", backend.name(), err);
                false
            }
        }
    }
}

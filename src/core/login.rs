//! Best-effort login screen background.
//!
//! Greeters read their background from system locations, so most of the
//! time the user has to finish the job with `sudo`. Nothing in here fails
//! the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::fs;

use crate::core::command::{Invocation, Runner};
use crate::core::desktop::DesktopKind;
use crate::error::Result;

const COSMIC_BACKGROUNDS: &str = "/usr/share/backgrounds/cosmic";
const ACCOUNTS_SERVICE: &str = "/var/lib/AccountsService";
const SUDO_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LoginScreen<'a> {
    runner: &'a dyn Runner,
    user: String,
    wallpaper_dir: PathBuf,
    cosmic_backgrounds: PathBuf,
    accounts_service: PathBuf,
}

impl<'a> LoginScreen<'a> {
    pub fn new(runner: &'a dyn Runner, user: &str, wallpaper_dir: &Path) -> Self {
        Self {
            runner,
            user: user.to_string(),
            wallpaper_dir: wallpaper_dir.to_path_buf(),
            cosmic_backgrounds: PathBuf::from(COSMIC_BACKGROUNDS),
            accounts_service: PathBuf::from(ACCOUNTS_SERVICE),
        }
    }

    #[cfg(test)]
    pub fn system_dirs(mut self, cosmic_backgrounds: &Path, accounts_service: &Path) -> Self {
        self.cosmic_backgrounds = cosmic_backgrounds.to_path_buf();
        self.accounts_service = accounts_service.to_path_buf();
        self
    }

    /// Returns whether any greeter mechanism took the image.
    pub async fn set_wallpaper(&self, desktop: &str, path: &Path) -> bool {
        info!("Setting login screen background");

        if DesktopKind::classify(desktop) == DesktopKind::Cosmic && self.cosmic_greeter(path).await {
            return true;
        }

        let handled = match self.gdm(path).await {
            Ok(handled) => handled,
            Err(err) => {
                warn!("Could not prepare the GDM background config: {}", err);
                false
            }
        };

        if !handled {
            println!("The login screen background could not be set automatically.");
            println!("The image is available at: {}", path.display());
        }

        handled
    }

    async fn cosmic_greeter(&self, path: &Path) -> bool {
        let image = path.to_string_lossy().into_owned();

        match self
            .runner
            .run(&Invocation::new(
                "cosmic-greeter-config",
                ["background", image.as_str()],
            ))
            .await
        {
            Ok(()) => {
                info!("Login background set for COSMIC Greeter");
                return true;
            }
            Err(err) => debug!("cosmic-greeter-config: {}", err),
        }

        let target = self.cosmic_backgrounds.join("login-wallpaper.jpg");
        if !self.cosmic_backgrounds.is_dir() {
            println!();
            println!("To set the COSMIC Greeter login background:");
            println!("1. Copy the image to a system-wide directory:");
            println!("   sudo mkdir -p {}", self.cosmic_backgrounds.display());
            println!("   sudo cp {} {}", path.display(), target.display());
            println!("2. The COSMIC Greeter should then pick it up automatically.");
            return false;
        }

        // -n: never block on a password prompt.
        let copy = Invocation::new(
            "sudo",
            [
                "-n".to_string(),
                "cp".to_string(),
                image,
                target.to_string_lossy().into_owned(),
            ],
        )
        .timeout(SUDO_TIMEOUT);

        match self.runner.run(&copy).await {
            Ok(()) => {
                info!("Login background set for COSMIC Greeter");
                true
            }
            Err(err) => {
                warn!("Could not set the login background automatically: {}", err);
                false
            }
        }
    }

    /// GDM reads the user background from AccountsService, which needs root.
    /// Writes the snippet and prints how to install it.
    async fn gdm(&self, path: &Path) -> Result<bool> {
        if !self.accounts_service.is_dir() {
            debug!("{} not found, skipping GDM", self.accounts_service.display());
            return Ok(false);
        }

        let snippet = self.wallpaper_dir.join("gdm-background-config.txt");
        fs::write(&snippet, format!("[User]\nBackground={}\n", path.display())).await?;

        let user_file = self.accounts_service.join("users").join(&self.user);
        println!("GDM config written: {}", snippet.display());
        println!("To set the GDM login background, run:");
        println!("  sudo cp {} {}", snippet.display(), user_file.display());
        println!("  sudo chmod 644 {}", user_file.display());

        Ok(true)
    }
}

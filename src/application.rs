use std::path::PathBuf;

use log::info;

use crate::api::unsplash::client::Client;
use crate::config::{Config, APP_NAME};
use crate::core::command::Runner;
use crate::core::desktop::Dispatcher;
use crate::core::login::LoginScreen;
use crate::error::Result;
use crate::provider::unsplash::Unsplash;

pub struct Application<'a> {
    config: Config,
    provider: Unsplash,
    runner: &'a dyn Runner,
    login_screen: Option<LoginScreen<'a>>,
}

impl<'a> Application<'a> {
    pub fn new(config: Config, client: Client, runner: &'a dyn Runner) -> Self {
        let login_screen = config
            .login_screen
            .then(|| LoginScreen::new(runner, &config.user, &config.wallpaper_dir));

        Self {
            config,
            provider: Unsplash::new(client),
            runner,
            login_screen,
        }
    }

    #[cfg(test)]
    fn with_login_screen(mut self, login_screen: Option<LoginScreen<'a>>) -> Self {
        self.login_screen = login_screen;
        self
    }

    /// Only fetching can fail the run. Wallpaper and login screen problems
    /// are reported and swallowed.
    pub async fn run(&self) -> Result<PathBuf> {
        info!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
        info!("Wallpaper directory: {}", self.config.wallpaper_dir.display());

        let image = self.provider.download_wallpaper(&self.config).await?;

        Dispatcher::new(self.runner, &self.config.config_dir)
            .set_wallpaper(&self.config.desktop, &image)
            .await;

        if let Some(login_screen) = &self.login_screen {
            login_screen.set_wallpaper(&self.config.desktop, &image).await;
        }

        info!("Done!");
        Ok(image)
    }
}

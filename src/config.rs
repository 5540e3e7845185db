use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::debug;

use crate::error::{Error, Result};

pub const APP_NAME: &str = "unsplash-wallpaper";
pub const DEFAULT_QUERY: &str = "nature,landscape";

/// Fetch a random Unsplash photo and set it as the desktop background.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Unsplash API access key
    #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Comma separated search terms
    #[arg(short, long, env = "UNSPLASH_QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    #[arg(short, long, env = "UNSPLASH_ORIENTATION", value_enum, default_value_t = Orientation::Landscape)]
    pub orientation: Orientation,

    /// Directory holding the current wallpaper and its metadata
    #[arg(long, env = "WALLPAPER_DIR")]
    pub wallpaper_dir: Option<PathBuf>,

    /// Desktop environment identifier, e.g. "GNOME" or "KDE"
    #[arg(long, env = "XDG_CURRENT_DESKTOP", default_value = "")]
    pub desktop: String,

    /// Don't try to update the login screen background
    #[arg(long)]
    pub no_login_screen: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    pub fn value(&self) -> &str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Squarish => "squarish",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub access_key: Option<String>,
    pub query: String,
    pub orientation: Orientation,
    pub wallpaper_dir: PathBuf,
    pub config_dir: PathBuf,
    /// Lowercased `XDG_CURRENT_DESKTOP`.
    pub desktop: String,
    pub user: String,
    pub login_screen: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Configuration("Unable to locate the config directory".into()))?;

        let wallpaper_dir = match args.wallpaper_dir {
            Some(dir) if dir.is_relative() => std::env::current_dir()?.join(dir),
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or_else(|| Error::Configuration("Unable to locate the data directory".into()))?
                .join("wallpapers"),
        };

        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_default();

        Ok(Self {
            access_key: args.access_key,
            query: args.query,
            orientation: args.orientation,
            wallpaper_dir,
            config_dir,
            desktop: args.desktop.to_lowercase(),
            user,
            login_screen: !args.no_login_screen,
        })
    }

    pub fn current_wallpaper(&self) -> PathBuf {
        self.wallpaper_dir.join("current_wallpaper.jpg")
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.wallpaper_dir.join("metadata.txt")
    }

    /// Access key, if it is set to something other than whitespace.
    pub fn access_key(&self) -> Result<&str> {
        self.access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "UNSPLASH_ACCESS_KEY is not set. Create a .env file or pass --access-key."
                        .into(),
                )
            })
    }
}

/// Loads `.env` from the working directory and from the per-user config
/// directory. Variables already present in the environment win.
pub fn load_env_files() {
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    if let Some(path) = dirs::config_dir().map(|dir| dir.join(APP_NAME).join(".env")) {
        if dotenv::from_path(&path).is_ok() {
            debug!("Loaded environment from {}", path.display());
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config(wallpaper_dir: PathBuf, desktop: &str) -> Config {
    Config {
        access_key: Some("test-key".to_string()),
        query: DEFAULT_QUERY.to_string(),
        orientation: Orientation::Landscape,
        config_dir: wallpaper_dir.join("config"),
        wallpaper_dir,
        desktop: desktop.to_lowercase(),
        user: "alice".to_string(),
        login_screen: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once(APP_NAME).chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--query",
            "city",
            "--orientation",
            "squarish",
            "--desktop",
            "ubuntu:GNOME",
            "--wallpaper-dir",
            "/tmp/walls",
            "--access-key",
            "abc",
            "--no-login-screen",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.query, "city");
        assert_eq!(config.orientation, Orientation::Squarish);
        assert_eq!(config.desktop, "ubuntu:gnome");
        assert_eq!(
            config.current_wallpaper(),
            PathBuf::from("/tmp/walls/current_wallpaper.jpg")
        );
        assert_eq!(config.metadata_file(), PathBuf::from("/tmp/walls/metadata.txt"));
        assert!(!config.login_screen);
        assert_eq!(config.access_key().unwrap(), "abc");
    }

    #[test]
    fn relative_wallpaper_dir_is_made_absolute() {
        let config = Config::from_args(parse(&["--wallpaper-dir", "walls", "--access-key", "k"]))
            .unwrap();

        assert!(config.wallpaper_dir.is_absolute());
        assert_eq!(
            config.wallpaper_dir,
            std::env::current_dir().unwrap().join("walls")
        );
        assert!(crate::helpers::file_uri(&config.current_wallpaper()).starts_with("file:///"));
    }

    #[test]
    fn rejects_unknown_orientation() {
        let result = Args::try_parse_from([APP_NAME, "--orientation", "diagonal"]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_access_key_is_a_configuration_error() {
        let mut config = test_config(PathBuf::from("/tmp/walls"), "gnome");

        config.access_key = Some("   ".to_string());
        assert!(matches!(config.access_key(), Err(Error::Configuration(_))));

        config.access_key = None;
        assert!(matches!(config.access_key(), Err(Error::Configuration(_))));
    }
}

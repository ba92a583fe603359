use anyhow::{Context, Result};
use app_dirs::{app_root, AppDataType, AppInfo};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_INFO: AppInfo = AppInfo {
    name: "bookmark",
    author: "bookmark",
};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_STORE_FILE_NAME: &str = "bookmarks.json";

/// Where the user's bookmarks live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub store: PathBuf,
}

impl Config {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
        }
    }

    /// returns the config file in the platform's user config folder,
    /// e.g. ~/.config/bookmark/config.json. The folder is created if
    /// necessary.
    pub fn default_path() -> Result<PathBuf> {
        let folder = app_root(AppDataType::UserConfig, &APP_INFO)
            .context("Unable to locate the user config folder")?;
        Ok(folder.join(CONFIG_FILE_NAME))
    }

    /// returns the default store file in the platform's user data folder,
    /// e.g. ~/.local/share/bookmark/bookmarks.json
    pub fn default_store_path() -> Result<PathBuf> {
        let folder = app_root(AppDataType::UserData, &APP_INFO)
            .context("Unable to locate the user data folder")?;
        Ok(folder.join(DEFAULT_STORE_FILE_NAME))
    }

    /// Reads the config at `path`. If there is none yet, a config pointing
    /// at the store returned by `default_store` is written first.
    pub fn load_or_create<F>(path: &Path, default_store: F) -> Result<Config>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        if !path.exists() {
            let config = Config::new(default_store()?);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Unable to create {:?}", parent))?;
            }
            config.save(path)?;
            info!("created config {:?} using store {:?}", path, config.store);
        }
        Config::load(path)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let raw = fs::read(path).with_context(|| format!("Unable to read config {:?}", path))?;
        serde_json::from_slice(&raw).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload).with_context(|| format!("Unable to write config {:?}", path))
    }
}

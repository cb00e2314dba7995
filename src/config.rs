use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000";
pub(crate) const DB_FILE_NAME: &str = "cachebudget.db";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
}

/// Keys accepted in `config.toml`. Anything else in the file is ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    data_dir: Option<String>,
}

impl Config {
    /// Defaults, then `config.toml`, then `CACHEBUDGET_*` environment variables.
    /// The data directory is created if missing.
    pub fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "cachebudget", "CacheBudget")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        let mut config = Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: proj_dirs.data_dir().to_path_buf(),
        };

        let config_path = proj_dirs.config_dir().join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            config
                .apply_toml(&raw)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;
        }

        config.apply_env(|key| std::env::var(key).ok());

        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        Ok(config)
    }

    pub fn apply_toml(&mut self, raw: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(raw)?;
        if let Some(url) = file.api_url {
            self.api_url = url;
        }
        if let Some(dir) = file.data_dir {
            self.data_dir = expand_home(&dir);
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("CACHEBUDGET_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(dir) = var("CACHEBUDGET_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = expand_home(&dir);
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

/// Resolve a leading `~/` against the user's home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new() {
            return home.home_dir().join(rest);
        }
    }
    Path::new(path).to_path_buf()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

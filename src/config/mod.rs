//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! API location, API key and log verbosity. The same directory holds the
//! client storage file.

mod error;

pub use error::ConfigError;

use crate::api::DEFAULT_BASE_URL;
use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/todolist-client";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub log_level: String,
    dir_path: PathBuf,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Return an instance with default values rooted at the given directory.
    ///
    pub fn new(dir_path: &Path) -> Config {
        Config {
            base_url: default_base_url(),
            api_key: None,
            log_level: default_log_level(),
            dir_path: dir_path.to_path_buf(),
        }
    }

    /// Load the configuration from the custom directory if provided, or the
    /// default one otherwise. A missing file yields the defaults.
    ///
    pub fn load(custom_path: Option<&str>) -> Result<Config, AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };
        let mut config = Config::new(&dir_path);

        let file_path = config.file_path();
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            config.base_url = data.base_url;
            config.api_key = data.api_key;
            config.log_level = data.log_level;
        }

        Ok(config)
    }

    /// Serialize the configuration and write it to the disk, creating the
    /// directory if needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let data = FileSpec {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if !self.dir_path.exists() {
            fs::create_dir_all(&self.dir_path).map_err(|e| {
                ConfigError::CreateDirectoryFailed {
                    path: self.dir_path.clone(),
                    source: e,
                }
            })?;
        }

        let file_path = self.file_path();
        fs::write(&file_path, content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Parsed log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, AppError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()).into())
    }

    /// Directory holding the configuration and storage files.
    ///
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }

    fn file_path(&self) -> PathBuf {
        self.dir_path.join(FILE_NAME)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("todolist-client-config-{}", Uuid::new_v4()))
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<(), AppError> {
        let dir = temp_dir();
        let config = Config::load(dir.to_str())?;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.level_filter()?, LevelFilter::Warn);
        assert_eq!(config.dir_path(), dir.as_path());
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn save_then_load() -> Result<(), AppError> {
        let dir = temp_dir();
        let mut config = Config::new(&dir);
        config.base_url = "http://localhost:8080/api".to_string();
        config.api_key = Some("key".to_string());
        config.log_level = "debug".to_string();
        config.save()?;

        let loaded = Config::load(dir.to_str())?;
        assert_eq!(loaded.base_url, "http://localhost:8080/api");
        assert_eq!(loaded.api_key, Some("key".to_string()));
        assert_eq!(loaded.level_filter()?, LevelFilter::Debug);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn partial_file_fills_defaults() -> Result<(), AppError> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDirectoryFailed {
            path: dir.clone(),
            source: e,
        })?;
        fs::write(dir.join(FILE_NAME), "api_key: abc\n").map_err(|e| {
            ConfigError::SaveFailed {
                path: dir.clone(),
                source: e,
            }
        })?;

        let config = Config::load(dir.to_str())?;
        assert_eq!(config.api_key, Some("abc".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn invalid_log_level() {
        let mut config = Config::new(&temp_dir());
        config.log_level = "loud".to_string();
        assert!(matches!(
            config.level_filter(),
            Err(AppError::Config(ConfigError::InvalidLogLevel(_)))
        ));
    }
}

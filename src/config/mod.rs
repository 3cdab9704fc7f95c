use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_HTTP_TIMEOUT_SECONDS, LOG_FILE_NAME, env_vars,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_default_data_file_path, get_log_dir_path};
use user_prompts::prompt_for_media_url;
use validation::validate_config;

/// Media host settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MediaConfig {
    /// Upload endpoint, e.g. `https://api.cloudinary.com/v1_1/<cloud>/image/upload`
    pub upload_url: String,
    /// Unsigned upload preset sent with every upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path to the taxonomy snapshot. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Timeout in seconds for media uploads
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    pub media: MediaConfig,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: default_bind_address(),
            data_file: None,
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            media: MediaConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts for the media upload URL and creates one.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `SPORTS_ADMIN_BIND` - Override bind address
    /// - `SPORTS_ADMIN_DATA_FILE` - Override snapshot path
    /// - `SPORTS_ADMIN_MEDIA_URL` - Override media upload URL
    /// - `SPORTS_ADMIN_UPLOAD_PRESET` - Override upload preset
    /// - `SPORTS_ADMIN_LOG_FILE` - Override log file path
    /// - `SPORTS_ADMIN_HTTP_TIMEOUT` - Override upload timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if std::env::var(env_vars::MEDIA_URL).is_ok() {
            // Filled in by the override below
            Config::default()
        } else {
            let config = Config {
                media: MediaConfig {
                    upload_url: prompt_for_media_url().await?,
                    ..MediaConfig::default()
                },
                ..Config::default()
            };
            config.validate()?;
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `SPORTS_ADMIN_*` environment variables on top of the loaded values.
    /// A timeout that doesn't parse as a number is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var(env_vars::BIND_ADDRESS) {
            self.bind_address = bind;
        }

        if let Ok(data_file) = std::env::var(env_vars::DATA_FILE) {
            self.data_file = Some(data_file);
        }

        if let Ok(upload_url) = std::env::var(env_vars::MEDIA_URL) {
            self.media.upload_url = upload_url;
        }

        if let Ok(preset) = std::env::var(env_vars::UPLOAD_PRESET) {
            self.media.upload_preset = Some(preset);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Resolved snapshot location
    pub fn data_file_path(&self) -> PathBuf {
        self.data_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_default_data_file_path)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout. The API key is masked.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let mut config = Config::load_from_path(&config_path).await?;
            config.apply_env_overrides();
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Bind Address:");
            println!("{}", config.bind_address);
            println!("────────────────────────────────────");
            println!("Data File:");
            println!("{}", config.data_file_path().display());
            if config.data_file.is_none() {
                println!("(Default location)");
            }
            println!("────────────────────────────────────");
            println!("Media Upload URL:");
            println!("{}", config.media.upload_url);
            println!("Upload Preset:");
            println!(
                "{}",
                config.media.upload_preset.as_deref().unwrap_or("(none)")
            );
            println!("API Key:");
            let api_key = if config.media.api_key.is_some() {
                "(set)"
            } else {
                "(none)"
            };
            println!("{api_key}");
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{LOG_FILE_NAME}");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if needed.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the file at `path` as stored, or defaults when there is no file.
    /// A file that exists but can't be read or parsed is an error.
    pub async fn load_stored_or_default(path: &str) -> Result<Self, AppError> {
        if Path::new(path).exists() {
            Self::load_from_path(path).await
        } else {
            Ok(Config::default())
        }
    }
}

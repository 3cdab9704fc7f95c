use crate::error::AppError;
use std::net::SocketAddr;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Bind address must parse as a socket address (`host:port`)
/// - Media upload URL cannot be empty and must use http or https
/// - HTTP timeout must be positive
/// - If a log file path is provided it cannot be empty, and its parent
///   directory must exist or be creatable
/// - If a data file path is provided it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        AppError::config_error(format!(
            "Bind address '{}' is not a valid socket address: {}",
            config.bind_address, e
        ))
    })?;

    validate_media_url(&config.media.upload_url)?;

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be greater than zero",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if config.data_file.as_deref().is_some_and(str::is_empty) {
        return Err(AppError::config_error("Data file path cannot be empty"));
    }

    Ok(())
}

pub fn validate_media_url(upload_url: &str) -> Result<(), AppError> {
    if upload_url.is_empty() {
        return Err(AppError::config_error("Media upload URL cannot be empty"));
    }
    if !upload_url.starts_with("http://") && !upload_url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "Media upload URL must start with http:// or https://, got '{upload_url}'"
        )));
    }
    Ok(())
}

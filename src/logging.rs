use crate::cli::{Args, is_config_command};
use crate::config::Config;
use crate::constants::LOG_FILE_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(debug: bool) -> Result<EnvFilter, AppError> {
    let directive = if debug {
        "sports_admin=debug"
    } else {
        "sports_admin=info"
    };
    let directive = directive.parse().map_err(|e| {
        AppError::log_setup_error(format!("Invalid log directive: {e}"))
    })?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Splits a custom log path into directory and file name, falling back to
/// the default directory and file name.
fn resolve_log_location(custom_path: Option<&String>) -> (String, String) {
    match custom_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging for the process.
///
/// - Server mode: logs to stdout and to the file
/// - Config commands: logs only to the file, stdout is left to the command output
/// - Uses a daily rolling file appender, creating the log directory if needed
///
/// `config_log_path` is the log path from an already-loaded config, if any.
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(
    args: &Args,
    config_log_path: Option<&String>,
) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) = resolve_log_location(args.log_file.as_ref().or(config_log_path));

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry();
    let result = if is_config_command(args) {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(env_filter(args.debug)?),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter(args.debug)?),
            )
            .with(
                fmt::Layer::new()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(env_filter(args.debug)?),
            )
            .try_init()
    };
    result.map_err(|e| {
        AppError::log_setup_error(format!("Failed to install subscriber: {e}"))
    })?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

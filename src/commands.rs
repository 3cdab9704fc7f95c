use crate::api::build_router;
use crate::cli::Args;
use crate::config::Config;
use crate::config::user_prompts::prompt_for_media_url;
use crate::config::validation::validate_media_url;
use crate::error::AppError;
use crate::media::HttpMediaUploader;
use crate::service::AdminService;
use crate::store::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-media-url, --set-upload-preset,
/// --set-log-file, --clear-log-file) and saves the result.
///
/// Works on the file as stored, so environment overrides never end up saved.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    update_config_file(args, &Config::get_config_path()).await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Applies the configuration flags to the file at `config_path`. A missing
/// file starts from defaults; an unreadable one is reported and left alone.
pub async fn update_config_file(args: &Args, config_path: &str) -> Result<(), AppError> {
    let mut config = Config::load_stored_or_default(config_path).await?;

    if let Some(new_url) = &args.new_media_url {
        let url = if new_url.trim().is_empty() {
            prompt_for_media_url().await?
        } else {
            new_url.trim().to_string()
        };
        validate_media_url(&url)?;
        config.media.upload_url = url;
    }

    if let Some(preset) = &args.new_upload_preset {
        config.media.upload_preset = Some(preset.clone());
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save_to_path(config_path).await?;
    info!("Config saved to {}", config_path);
    Ok(())
}

/// Applies the --bind and --data-file flags on top of the loaded config.
pub fn apply_server_flags(args: &Args, config: &mut Config) -> Result<(), AppError> {
    if let Some(bind) = &args.bind {
        config.bind_address = bind.clone();
    }
    if let Some(data_file) = &args.data_file {
        config.data_file = Some(data_file.clone());
    }
    config.validate()
}

/// Opens the snapshot, wires the media uploader and serves the API until
/// Ctrl-C.
pub async fn run_server(args: &Args, mut config: Config) -> Result<(), AppError> {
    apply_server_flags(args, &mut config)?;

    let data_file: PathBuf = config.data_file_path();
    let db = Database::open(&data_file).await?;
    let media = HttpMediaUploader::from_config(&config.media, config.http_timeout_seconds)?;
    let service = AdminService::new(Arc::new(db), Arc::new(media));
    let app = build_router(service);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        "Serving on http://{} (data file {})",
        listener.local_addr()?,
        data_file.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;

    fn config() -> Config {
        Config {
            media: MediaConfig {
                upload_url: "https://media.example.com/upload".to_string(),
                ..MediaConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_server_flags_override_config() {
        let args = Args {
            bind: Some("0.0.0.0:8081".to_string()),
            data_file: Some("/tmp/sports_admin/taxonomy.json".to_string()),
            ..Args::default()
        };
        let mut config = config();
        apply_server_flags(&args, &mut config).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8081");
        assert_eq!(
            config.data_file_path(),
            PathBuf::from("/tmp/sports_admin/taxonomy.json")
        );
    }

    #[tokio::test]
    async fn test_update_keeps_unreadable_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_string_lossy();
        tokio::fs::write(&path, "[media\nupload_url = ")
            .await
            .unwrap();

        let args = Args {
            new_upload_preset: Some("unsigned".to_string()),
            ..Args::default()
        };
        let err = update_config_file(&args, &path_str).await.unwrap_err();
        assert!(matches!(err, AppError::TomlDeserialize(_)));
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            "[media\nupload_url = "
        );
    }

    #[tokio::test]
    async fn test_update_creates_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_string_lossy();

        let args = Args {
            new_media_url: Some("https://media.example.com/upload".to_string()),
            new_upload_preset: Some("unsigned".to_string()),
            ..Args::default()
        };
        update_config_file(&args, &path_str).await.unwrap();

        let saved = Config::load_from_path(&path_str).await.unwrap();
        assert_eq!(saved.media.upload_url, "https://media.example.com/upload");
        assert_eq!(saved.media.upload_preset.as_deref(), Some("unsigned"));
    }

    #[test]
    fn test_invalid_bind_flag_rejected() {
        let args = Args {
            bind: Some("not an address".to_string()),
            ..Args::default()
        };
        let mut config = config();
        assert!(matches!(
            apply_server_flags(&args, &mut config),
            Err(AppError::Config(_))
        ));
    }
}

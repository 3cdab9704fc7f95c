// src/main.rs
use clap::Parser;
use sports_admin::cli::{Args, is_config_command};
use sports_admin::commands;
use sports_admin::config::Config;
use sports_admin::error::AppError;
use sports_admin::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if is_config_command(&args) {
        // The stored log path, if any; a missing or broken file is not an error here
        let config_log_path = Config::load_from_path(&Config::get_config_path())
            .await
            .ok()
            .and_then(|config| config.log_file_path);
        let (_log_file_path, _guard) = setup_logging(&args, config_log_path.as_ref()).await?;

        if args.list_config {
            return commands::handle_list_config_command().await;
        }
        return commands::handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;
    let (log_file_path, _guard) = setup_logging(&args, config.log_file_path.as_ref()).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    commands::run_server(&args, config).await
}

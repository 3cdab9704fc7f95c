use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the invocation only edits or shows configuration and the
/// server should not start.
pub fn is_config_command(args: &Args) -> bool {
    args.new_media_url.is_some()
        || args.new_upload_preset.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Sports taxonomy administration service
///
/// Serves the HTTP API for managing sports, tournaments, teams and league
/// editions with their final standings. Images are uploaded to the
/// configured media host; records are kept in a JSON snapshot file.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Address to listen on, e.g. 0.0.0.0:4000. Overrides the config file.
    #[arg(long = "bind", short = 'b', help_heading = "Server")]
    pub bind: Option<String>,

    /// Path of the JSON snapshot holding all records. Overrides the config file.
    #[arg(long = "data-file", help_heading = "Server")]
    pub data_file: Option<String>,

    /// Update the media upload URL in config. Will prompt for a new URL if not provided.
    #[arg(
        long = "set-media-url",
        help_heading = "Configuration",
        value_name = "UPLOAD_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_media_url: Option<String>,

    /// Update the unsigned upload preset in config
    #[arg(long = "set-upload-preset", help_heading = "Configuration")]
    pub new_upload_preset: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Log at debug level for this crate
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

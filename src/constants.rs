//! Application-wide constants and configuration values
//!
//! This module centralizes defaults and names shared by the configuration,
//! the HTTP surface and the media adapter.

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:4000";

/// Default timeout for media upload requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Largest multipart body accepted by the router (images included)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Prefix every CRUD route is mounted under
pub const API_PREFIX: &str = "/api/v1/post";

/// Application directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "sports_admin";

/// Default log file name
pub const LOG_FILE_NAME: &str = "sports_admin.log";

/// Default snapshot file name
pub const DATA_FILE_NAME: &str = "taxonomy.json";

/// Environment variable names
pub mod env_vars {
    /// Override for the server bind address
    pub const BIND_ADDRESS: &str = "SPORTS_ADMIN_BIND";

    /// Override for the snapshot file path
    pub const DATA_FILE: &str = "SPORTS_ADMIN_DATA_FILE";

    /// Override for the media host upload endpoint
    pub const MEDIA_URL: &str = "SPORTS_ADMIN_MEDIA_URL";

    /// Override for the media host unsigned upload preset
    pub const UPLOAD_PRESET: &str = "SPORTS_ADMIN_UPLOAD_PRESET";

    /// Override for the log file path
    pub const LOG_FILE: &str = "SPORTS_ADMIN_LOG_FILE";

    /// Override for the media upload timeout in seconds
    pub const HTTP_TIMEOUT: &str = "SPORTS_ADMIN_HTTP_TIMEOUT";
}

/// Positions used by the standings convention
pub mod standings {
    /// Winner position; shared by joint winners
    pub const WINNER: u32 = 1;

    /// Runner-up position; left empty when two teams share the win
    pub const RUNNER_UP: u32 = 2;
}

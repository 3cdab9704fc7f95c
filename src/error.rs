use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Request validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Malformed form data: {0}")]
    Multipart(String),

    // Media host errors
    #[error("Media upload failed: {0}")]
    Upstream(String),

    #[error("Failed to reach media host: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Create a validation error for a user-correctable request problem
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error for the given entity kind and id
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a malformed multipart error
    pub fn multipart(msg: impl Into<String>) -> Self {
        Self::Multipart(msg.into())
    }

    /// Create a media upload error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an error for a condition the service does not expect to reach
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// HTTP status code the error maps to at the handler boundary
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::Multipart(_) => 400,
            AppError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Check if the caller can fix the request and retry (4xx class)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Check if error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Check if error comes from the media host
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Upstream(_) | AppError::ApiFetch(_))
    }
}

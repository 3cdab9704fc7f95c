//! Sports taxonomy administration service
//!
//! Manages sports, tournaments, teams and league editions (a tournament's
//! year-by-year final standings) behind an HTTP API. Team records that share
//! a city or a country within a sport form one identity across renames, and
//! their won and runner-up editions are aggregated together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sports_admin::api::build_router;
//! use sports_admin::config::MediaConfig;
//! use sports_admin::error::AppError;
//! use sports_admin::media::HttpMediaUploader;
//! use sports_admin::service::AdminService;
//! use sports_admin::store::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let db = Database::open(std::path::Path::new("taxonomy.json")).await?;
//!     let media = HttpMediaUploader::from_config(
//!         &MediaConfig {
//!             upload_url: "https://api.cloudinary.com/v1_1/demo/image/upload".to_string(),
//!             upload_preset: Some("unsigned".to_string()),
//!             api_key: None,
//!         },
//!         30,
//!     )?;
//!
//!     let app = build_router(AdminService::new(Arc::new(db), Arc::new(media)));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod lineage;
pub mod logging;
pub mod media;
pub mod models;
pub mod service;
pub mod store;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use api::build_router;
pub use config::Config;
pub use error::AppError;
pub use lineage::{Lineage, TeamHistory};
pub use models::{EntityId, LeagueEdition, Sport, Standings, Team, TeamKind, Tournament};
pub use service::AdminService;
pub use store::Database;

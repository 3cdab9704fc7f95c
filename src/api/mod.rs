//! HTTP surface. Handlers are thin: read the query or form, call the
//! service, wrap the result in the envelope.

pub mod form;
pub mod response;

mod leagues;
mod sports;
mod teams;
mod tournaments;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use serde_json::json;

use crate::constants::{API_PREFIX, MAX_UPLOAD_BYTES};
use crate::error::AppError;
use crate::models::{EntityId, optional_text};
use crate::service::AdminService;

pub use response::{ApiError, Envelope};

pub fn build_router(service: AdminService) -> Router {
    let api = Router::new()
        .route("/createSport", post(sports::create))
        .route("/getSport", get(sports::list))
        .route("/updateSport/{id}", put(sports::update))
        .route("/deleteSport/{id}", delete(sports::remove))
        .route("/createTournament", post(tournaments::create))
        .route("/getTournament", get(tournaments::list))
        .route("/updateTournament/{id}", put(tournaments::update))
        .route("/deleteTournament/{id}", delete(tournaments::remove))
        .route("/createTeam", post(teams::create))
        .route("/getTeam", get(teams::list))
        .route("/getTeamHistory", get(teams::history))
        .route("/updateTeam/{id}", put(teams::update))
        .route("/deleteTeam/{id}", delete(teams::remove))
        .route("/createLeague", post(leagues::create))
        .route("/getLeague", get(leagues::list))
        .route("/updateLeague/{id}", put(leagues::update))
        .route("/deleteLeague/{id}", delete(leagues::remove));

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(service)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "success": true, "message": "ok" }))
}

/// Parses an optional id query parameter; blank means absent
fn query_id(value: &Option<String>) -> Result<Option<EntityId>, AppError> {
    optional_text(value)
        .map(|raw| EntityId::parse(&raw))
        .transpose()
}

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::form::FormData;
use super::query_id;
use super::response::{ApiError, OrReply, created, ok};
use crate::error::AppError;
use crate::models::{EntityId, TournamentType, optional_text};
use crate::service::AdminService;
use crate::store::TournamentFilter;

#[derive(Debug, Default, Deserialize)]
pub(super) struct TournamentQuery {
    sport: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl TournamentQuery {
    fn filter(&self) -> Result<TournamentFilter, AppError> {
        Ok(TournamentFilter {
            sport: query_id(&self.sport)?,
            kind: optional_text(&self.kind)
                .map(|k| k.parse::<TournamentType>())
                .transpose()?,
        })
    }
}

pub(super) async fn create(
    State(service): State<AdminService>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let image = form.take_image();
    let tournament = service
        .create_tournament(form.tournament_draft(), image)
        .await
        .or_reply("Tournament cannot be created. Please try again.")?;
    Ok(created(tournament, "Tournament created successfully"))
}

pub(super) async fn list(
    State(service): State<AdminService>,
    Query(query): Query<TournamentQuery>,
) -> Result<Response, ApiError> {
    let filter = query.filter()?;
    let tournaments = service.list_tournaments(&filter).await;
    Ok(ok(tournaments, "All tournaments data are fetched"))
}

pub(super) async fn update(
    State(service): State<AdminService>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let image = form.take_image();
    let tournament = service
        .update_tournament(&id, form.tournament_draft(), image)
        .await
        .or_reply("Tournament cannot be updated. Please try again.")?;
    Ok(ok(tournament, "Tournament updated successfully"))
}

pub(super) async fn remove(
    State(service): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let tournament = service
        .delete_tournament(&id)
        .await
        .or_reply("Server error while deleting tournament")?;
    let message = format!("Tournament '{}' deleted successfully", tournament.name);
    Ok(ok(tournament, message))
}

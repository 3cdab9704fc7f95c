use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::form::FormData;
use super::query_id;
use super::response::{ApiError, OrReply, created, ok};
use crate::error::AppError;
use crate::models::EntityId;
use crate::service::AdminService;

#[derive(Debug, Default, Deserialize)]
pub(super) struct LeagueQuery {
    sport: Option<String>,
    tournament: Option<String>,
    #[serde(rename = "teamId")]
    team_id: Option<String>,
}

pub(super) async fn create(
    State(service): State<AdminService>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let image = form.take_image();
    let draft = form.league_draft()?;
    let league = service
        .create_league(draft, image)
        .await
        .or_reply("League cannot be created. Please try again.")?;
    Ok(created(league, "League created successfully"))
}

/// `?teamId=` lists the editions of one team record; otherwise both
/// `sport` and `tournament` are required.
pub(super) async fn list(
    State(service): State<AdminService>,
    Query(query): Query<LeagueQuery>,
) -> Result<Response, ApiError> {
    if let Some(team) = query_id(&query.team_id)? {
        let leagues = service.list_leagues_for_team(&team).await;
        return Ok(ok(leagues, "All leagues data are fetched"));
    }

    let sport = query_id(&query.sport)?;
    let tournament = query_id(&query.tournament)?;
    let (Some(sport), Some(tournament)) = (sport, tournament) else {
        let err = AppError::validation("sport and tournament are required");
        return Err(err.into());
    };
    let leagues = service.list_leagues(&sport, &tournament).await;
    Ok(ok(leagues, "All leagues data are fetched"))
}

pub(super) async fn update(
    State(service): State<AdminService>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let image = form.take_image();
    let draft = form.league_draft()?;
    let league = service
        .update_league(&id, draft, image)
        .await
        .or_reply("League cannot be updated. Please try again.")?;
    Ok(ok(league, "League updated successfully"))
}

pub(super) async fn remove(
    State(service): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let league = service
        .delete_league(&id)
        .await
        .or_reply("Server error while deleting league")?;
    let message = format!(
        "League '{} {}' deleted successfully",
        league.name, league.year
    );
    Ok(ok(league, message))
}

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::form::FormData;
use super::query_id;
use super::response::{ApiError, OrReply, created, ok};
use crate::error::AppError;
use crate::models::{EntityId, TeamType, optional_text, parse_flag};
use crate::service::AdminService;
use crate::store::TeamFilter;

#[derive(Debug, Default, Deserialize)]
pub(super) struct TeamQuery {
    sport: Option<String>,
    tournament: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    city: Option<String>,
    country: Option<String>,
    inactive: Option<String>,
    #[serde(rename = "_id")]
    id: Option<String>,
}

impl TeamQuery {
    fn filter(&self) -> Result<TeamFilter, AppError> {
        let inactive = optional_text(&self.inactive)
            .map(|_| parse_flag(&self.inactive, "inactive"))
            .transpose()?;

        Ok(TeamFilter {
            sport: query_id(&self.sport)?,
            tournament: query_id(&self.tournament)?,
            kind: optional_text(&self.kind)
                .map(|k| k.parse::<TeamType>())
                .transpose()?,
            city: optional_text(&self.city),
            country: optional_text(&self.country),
            inactive,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct HistoryQuery {
    #[serde(rename = "_id")]
    id: Option<String>,
}

pub(super) async fn create(
    State(service): State<AdminService>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let image = form.take_image();
    let team = service
        .create_team(form.team_draft(), image)
        .await
        .or_reply("Team cannot be created. Please try again.")?;
    Ok(created(team, "Team created successfully"))
}

/// With `_id` the single team is returned; otherwise every team matching
/// the remaining filters.
pub(super) async fn list(
    State(service): State<AdminService>,
    Query(query): Query<TeamQuery>,
) -> Result<Response, ApiError> {
    if let Some(id) = query_id(&query.id)? {
        let team = service.get_team(&id).await.or_reply("Server error")?;
        return Ok(ok(team, "Team data is fetched"));
    }

    let filter = query.filter()?;
    let teams = service.list_teams(&filter).await;
    Ok(ok(teams, "All teams data are fetched"))
}

pub(super) async fn history(
    State(service): State<AdminService>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, ApiError> {
    let id = query_id(&query.id)?
        .ok_or_else(|| AppError::validation("_id is required"))?;
    let history = service
        .team_history(&id)
        .await
        .or_reply("Team history cannot be fetched. Please try again.")?;
    Ok(ok(history, "Team history is fetched"))
}

pub(super) async fn update(
    State(service): State<AdminService>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let image = form.take_image();
    let team = service
        .update_team(&id, form.team_draft(), image)
        .await
        .or_reply("Team cannot be updated. Please try again.")?;
    Ok(ok(team, "Team updated successfully"))
}

pub(super) async fn remove(
    State(service): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let team = service
        .delete_team(&id)
        .await
        .or_reply("Server error while deleting team")?;
    let message = format!("Team '{}' deleted successfully", team.name);
    Ok(ok(team, message))
}

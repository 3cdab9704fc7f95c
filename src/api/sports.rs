use axum::extract::{Path, State};
use axum::response::Response;

use super::form::FormData;
use super::response::{ApiError, OrReply, created, ok};
use crate::models::EntityId;
use crate::service::AdminService;

pub(super) async fn create(
    State(service): State<AdminService>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let image = form.take_image();
    let sport = service
        .create_sport(form.sport_draft(), image)
        .await
        .or_reply("Sport cannot be created. Please try again.")?;
    Ok(created(sport, "Sport created successfully"))
}

pub(super) async fn list(State(service): State<AdminService>) -> Response {
    ok(service.list_sports().await, "All sports data are fetched")
}

pub(super) async fn update(
    State(service): State<AdminService>,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let image = form.take_image();
    let sport = service
        .update_sport(&id, form.sport_draft(), image)
        .await
        .or_reply("Sport cannot be updated. Please try again.")?;
    Ok(ok(sport, "Sport updated successfully"))
}

pub(super) async fn remove(
    State(service): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = EntityId::parse(&id)?;
    let sport = service
        .delete_sport(&id)
        .await
        .or_reply("Server error while deleting sport")?;
    let message = format!("Sport '{}' deleted successfully", sport.name);
    Ok(ok(sport, message))
}

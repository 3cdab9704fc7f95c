pub mod id;
pub mod league;
pub mod sport;
pub mod team;
pub mod tournament;
pub mod views;

pub use id::EntityId;
pub use league::{
    LeagueDraft, LeagueEdition, StandingDraft, Standings, TeamStanding, ValidLeague,
    assign_positions,
};
pub use sport::{Sport, SportDraft};
pub use team::{Team, TeamDraft, TeamKind, TeamType, ValidTeam};
pub use tournament::{Tournament, TournamentDraft, TournamentType, ValidTournament};
pub use views::{LeagueView, StandingView, TeamView, TournamentView};

use crate::error::AppError;

/// Returns the trimmed value of a required text field.
/// Missing and blank values are both rejected.
pub(crate) fn required_text(value: &Option<String>, field: &str) -> Result<String, AppError> {
    optional_text(value).ok_or_else(|| AppError::validation(format!("{field} is required")))
}

/// Returns the trimmed value of an optional text field, treating blank as absent.
pub(crate) fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses a required reference field into an id.
pub(crate) fn required_id(value: &Option<String>, field: &str) -> Result<EntityId, AppError> {
    EntityId::parse(&required_text(value, field)?)
}

/// Parses an HTML-form style boolean. Missing means `false`.
pub(crate) fn parse_flag(value: &Option<String>, field: &str) -> Result<bool, AppError> {
    match optional_text(value)
        .as_deref()
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        None => Ok(false),
        Some("true" | "on" | "1" | "yes") => Ok(true),
        Some("false" | "off" | "0" | "no") => Ok(false),
        Some(other) => Err(AppError::validation(format!(
            "{field} must be a boolean, got '{other}'"
        ))),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{EntityId, optional_text, required_id, required_text};
use crate::constants::standings::{RUNNER_UP, WINNER};
use crate::error::AppError;

/// One team's finishing position in a league edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: EntityId,
    pub position: u32,
}

/// A year-by-year instance of a tournament with its final standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueEdition {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub year: i32,
    pub sport: EntityId,
    pub tournament: EntityId,
    #[serde(rename = "leagueImageUrl")]
    pub league_image_url: String,
    #[serde(default)]
    pub teams: Vec<TeamStanding>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Position queries shared by stored editions and their populated views.
///
/// Winner is position 1 and may be held by several teams. Runner-up is
/// position 2; when two teams share the win the next entry is 3, so a
/// joint-winner edition has no runner-up.
pub trait Standings {
    fn placements(&self) -> Vec<(&EntityId, u32)>;

    fn teams_at(&self, position: u32) -> Vec<&EntityId> {
        self.placements()
            .into_iter()
            .filter(|(_, p)| *p == position)
            .map(|(team, _)| team)
            .collect()
    }

    fn winners(&self) -> Vec<&EntityId> {
        self.teams_at(WINNER)
    }

    fn runners_up(&self) -> Vec<&EntityId> {
        self.teams_at(RUNNER_UP)
    }

    fn has_joint_winners(&self) -> bool {
        self.winners().len() > 1
    }

    /// True when any of `team_ids` finished at `position`
    fn placed_any(&self, team_ids: &HashSet<EntityId>, position: u32) -> bool {
        self.placements()
            .into_iter()
            .any(|(team, p)| p == position && team_ids.contains(team))
    }

    fn includes_any(&self, team_ids: &HashSet<EntityId>) -> bool {
        self.placements()
            .into_iter()
            .any(|(team, _)| team_ids.contains(team))
    }
}

impl Standings for LeagueEdition {
    fn placements(&self) -> Vec<(&EntityId, u32)> {
        self.teams.iter().map(|s| (&s.team, s.position)).collect()
    }
}

/// Positions for `count` teams listed in finishing order.
///
/// With `joint_winner` and at least two teams, the first two share position 1
/// and numbering resumes at 3. Otherwise positions are `index + 1`.
pub fn assign_positions(count: usize, joint_winner: bool) -> Vec<u32> {
    (0..count)
        .map(|i| {
            if joint_winner && count >= 2 && i < 2 {
                WINNER
            } else {
                i as u32 + 1
            }
        })
        .collect()
}

/// Raw standing entry from the form
#[derive(Debug, Clone, Default)]
pub struct StandingDraft {
    pub team: Option<String>,
    pub position: Option<String>,
}

/// Raw league edition form fields as submitted
#[derive(Debug, Clone, Default)]
pub struct LeagueDraft {
    pub name: Option<String>,
    pub year: Option<String>,
    pub sport: Option<String>,
    pub tournament: Option<String>,
    pub joint_winner: bool,
    pub teams: Vec<StandingDraft>,
}

/// League edition fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLeague {
    pub name: String,
    pub year: i32,
    pub sport: EntityId,
    pub tournament: EntityId,
    pub teams: Vec<TeamStanding>,
}

impl LeagueDraft {
    pub fn validate(&self) -> Result<ValidLeague, AppError> {
        let name = required_text(&self.name, "name")?;
        let year = parse_year(&required_text(&self.year, "year")?)?;
        let sport = required_id(&self.sport, "sport")?;
        let tournament = required_id(&self.tournament, "tournament")?;
        let teams = self.validate_teams()?;

        Ok(ValidLeague {
            name,
            year,
            sport,
            tournament,
            teams,
        })
    }

    fn validate_teams(&self) -> Result<Vec<TeamStanding>, AppError> {
        let encoded = assign_positions(self.teams.len(), self.joint_winner);
        let mut seen = HashSet::new();
        let mut standings = Vec::with_capacity(self.teams.len());

        for (idx, entry) in self.teams.iter().enumerate() {
            let team = required_id(&entry.team, &format!("team for entry {idx}"))?;
            if !seen.insert(team.clone()) {
                return Err(AppError::validation(format!(
                    "team {team} is listed more than once"
                )));
            }

            let position = if self.joint_winner {
                encoded[idx]
            } else {
                match optional_text(&entry.position) {
                    Some(raw) => parse_position(&raw, idx)?,
                    None => encoded[idx],
                }
            };

            standings.push(TeamStanding { team, position });
        }

        Ok(standings)
    }
}

fn parse_year(raw: &str) -> Result<i32, AppError> {
    match raw.parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(year),
        _ => Err(AppError::validation(format!(
            "year must be a valid year, got '{raw}'"
        ))),
    }
}

fn parse_position(raw: &str, idx: usize) -> Result<u32, AppError> {
    match raw.parse::<u32>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(AppError::validation(format!(
            "position for entry {idx} must be a positive integer, got '{raw}'"
        ))),
    }
}

//! Read models with references resolved to full records.
//!
//! A reference whose target was deleted resolves to `null`; the raw id is kept
//! next to it so clients can still tell what it pointed at.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    EntityId, LeagueEdition, Sport, Standings, Team, TeamType, Tournament, TournamentType,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentView {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub sport: Option<Sport>,
    #[serde(rename = "sportId")]
    pub sport_id: EntityId,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl TournamentView {
    pub fn new(tournament: Tournament, sport: Option<Sport>) -> Self {
        TournamentView {
            id: tournament.id,
            name: tournament.name,
            sport,
            sport_id: tournament.sport,
            kind: tournament.kind,
            image_url: tournament.image_url,
            priority: tournament.priority,
            created_at: tournament.created_at,
            updated_at: tournament.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamView {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub sport: Option<Sport>,
    #[serde(rename = "sportId")]
    pub sport_id: EntityId,
    #[serde(rename = "type")]
    pub kind: TeamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub tournament: Option<Tournament>,
    #[serde(rename = "tournamentId", skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<EntityId>,
    pub inactive: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl TeamView {
    pub fn new(team: Team, sport: Option<Sport>, tournament: Option<Tournament>) -> Self {
        TeamView {
            kind: team.team_type(),
            country: team.kind.country().map(str::to_string),
            city: team.kind.city().map(str::to_string),
            tournament_id: team.kind.tournament().cloned(),
            tournament,
            id: team.id,
            name: team.name,
            image_url: team.image_url,
            sport,
            sport_id: team.sport,
            inactive: team.inactive,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingView {
    pub team: Option<Team>,
    #[serde(rename = "teamId")]
    pub team_id: EntityId,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueView {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub year: i32,
    pub sport: Option<Sport>,
    #[serde(rename = "sportId")]
    pub sport_id: EntityId,
    pub tournament: Option<Tournament>,
    #[serde(rename = "tournamentId")]
    pub tournament_id: EntityId,
    #[serde(rename = "leagueImageUrl")]
    pub league_image_url: String,
    pub teams: Vec<StandingView>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl LeagueView {
    /// Builds the view; `resolve_team` looks up each standing's team record.
    pub fn new<F>(
        edition: LeagueEdition,
        sport: Option<Sport>,
        tournament: Option<Tournament>,
        mut resolve_team: F,
    ) -> Self
    where
        F: FnMut(&EntityId) -> Option<Team>,
    {
        let teams = edition
            .teams
            .into_iter()
            .map(|standing| StandingView {
                team: resolve_team(&standing.team),
                team_id: standing.team,
                position: standing.position,
            })
            .collect();

        LeagueView {
            id: edition.id,
            name: edition.name,
            year: edition.year,
            sport,
            sport_id: edition.sport,
            tournament,
            tournament_id: edition.tournament,
            league_image_url: edition.league_image_url,
            teams,
            created_at: edition.created_at,
            updated_at: edition.updated_at,
        }
    }
}

impl Standings for LeagueView {
    fn placements(&self) -> Vec<(&EntityId, u32)> {
        self.teams
            .iter()
            .map(|s| (&s.team_id, s.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeamKind, TeamStanding};

    fn team(name: &str) -> Team {
        let now = Utc::now();
        Team {
            id: EntityId::generate(),
            name: name.to_string(),
            image_url: format!("https://media.test/teams/{name}.png"),
            sport: EntityId::generate(),
            kind: TeamKind::National {
                country: "India".to_string(),
            },
            inactive: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_team_view_national_has_no_tournament_id() {
        let view = TeamView::new(team("India"), None, None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "National");
        assert_eq!(json["country"], "India");
        assert!(json["sport"].is_null());
        assert!(json.get("tournamentId").is_none());
        assert!(json.get("city").is_none());
    }

    #[test]
    fn test_league_view_keeps_orphaned_team_ids() {
        let now = Utc::now();
        let known = team("Known");
        let orphan = EntityId::generate();
        let edition = LeagueEdition {
            id: EntityId::generate(),
            name: "Asia Cup".to_string(),
            year: 2018,
            sport: EntityId::generate(),
            tournament: EntityId::generate(),
            league_image_url: "https://media.test/leagues/asia.png".to_string(),
            teams: vec![
                TeamStanding {
                    team: known.id.clone(),
                    position: 1,
                },
                TeamStanding {
                    team: orphan.clone(),
                    position: 2,
                },
            ],
            created_at: now,
            updated_at: now,
        };

        let lookup = known.clone();
        let view = LeagueView::new(edition, None, None, |id| {
            (id == &lookup.id).then(|| lookup.clone())
        });

        assert_eq!(view.teams[0].team.as_ref(), Some(&known));
        assert!(view.teams[1].team.is_none());
        assert_eq!(view.teams[1].team_id, orphan);
        assert_eq!(view.runners_up(), vec![&orphan]);
    }
}

use chrono::Utc;
use tracing::{info, instrument};

use super::{Database, Undo};
use crate::error::AppError;
use crate::models::{EntityId, Team, TeamType, TeamView, ValidTeam};

/// Optional filters for listing teams; every set field must match
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    pub sport: Option<EntityId>,
    pub tournament: Option<EntityId>,
    pub kind: Option<TeamType>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub inactive: Option<bool>,
}

impl TeamFilter {
    pub fn matches(&self, team: &Team) -> bool {
        self.sport.as_ref().is_none_or(|s| &team.sport == s)
            && self
                .tournament
                .as_ref()
                .is_none_or(|t| team.kind.tournament() == Some(t))
            && self.kind.is_none_or(|k| team.team_type() == k)
            && self
                .city
                .as_deref()
                .is_none_or(|c| team.kind.city() == Some(c.trim()))
            && self
                .country
                .as_deref()
                .is_none_or(|c| team.kind.country() == Some(c.trim()))
            && self.inactive.is_none_or(|i| team.inactive == i)
    }
}

impl Database {
    #[instrument(skip(self, image_url))]
    pub async fn create_team(
        &self,
        fields: ValidTeam,
        image_url: String,
    ) -> Result<Team, AppError> {
        let now = Utc::now();
        let team = Team {
            id: EntityId::generate(),
            name: fields.name,
            image_url,
            sport: fields.sport,
            kind: fields.kind,
            inactive: fields.inactive,
            created_at: now,
            updated_at: now,
        };
        self.teams.write().await.push(team.clone());

        self.commit(&self.teams, Undo::Insert(team.id.clone()))
            .await?;
        info!("Created team {} ({})", team.name, team.id);
        Ok(team)
    }

    /// Raw team records matching `filter`, in creation order
    pub async fn find_teams(&self, filter: &TeamFilter) -> Vec<Team> {
        self.teams
            .read()
            .await
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Matching teams with sport and tournament populated, ordered by name
    pub async fn list_teams(&self, filter: &TeamFilter) -> Vec<TeamView> {
        let mut teams = self.find_teams(filter).await;
        teams.sort_by_key(|t| t.name.to_lowercase());

        let mut views = Vec::with_capacity(teams.len());
        for team in teams {
            views.push(self.populate_team(team).await);
        }
        views
    }

    pub async fn find_team(&self, id: &EntityId) -> Option<Team> {
        self.teams
            .read()
            .await
            .iter()
            .find(|t| &t.id == id)
            .cloned()
    }

    pub async fn get_team(&self, id: &EntityId) -> Result<Team, AppError> {
        self.find_team(id)
            .await
            .ok_or_else(|| AppError::not_found("Team", id.as_str()))
    }

    /// Replaces every mutable field. The kind is replaced as a whole, so a
    /// type change drops the fields of the old kind.
    #[instrument(skip(self, image_url))]
    pub async fn update_team(
        &self,
        id: &EntityId,
        fields: ValidTeam,
        image_url: Option<String>,
    ) -> Result<Team, AppError> {
        let (team, previous) = {
            let mut teams = self.teams.write().await;
            let team = teams
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| AppError::not_found("Team", id.as_str()))?;
            let previous = team.clone();
            if team.team_type() != fields.kind.team_type() {
                info!(
                    "Team {} changes type {} -> {}",
                    team.id,
                    team.team_type(),
                    fields.kind.team_type()
                );
            }
            team.name = fields.name;
            team.sport = fields.sport;
            team.kind = fields.kind;
            team.inactive = fields.inactive;
            if let Some(url) = image_url {
                team.image_url = url;
            }
            team.updated_at = Utc::now();
            (team.clone(), previous)
        };

        self.commit(&self.teams, Undo::Update(previous)).await?;
        Ok(team)
    }

    /// Removes a team. Editions that list it keep the dangling reference.
    #[instrument(skip(self))]
    pub async fn delete_team(&self, id: &EntityId) -> Result<Team, AppError> {
        let (idx, removed) = {
            let mut teams = self.teams.write().await;
            let idx = teams
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| AppError::not_found("Team", id.as_str()))?;
            (idx, teams.remove(idx))
        };

        self.commit(&self.teams, Undo::Remove(idx, removed.clone()))
            .await?;
        info!("Deleted team {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    pub async fn populate_team(&self, team: Team) -> TeamView {
        let sport = self.find_sport(&team.sport).await;
        let tournament = match team.kind.tournament() {
            Some(id) => self.find_tournament(id).await,
            None => None,
        };
        TeamView::new(team, sport, tournament)
    }
}

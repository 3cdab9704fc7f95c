use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use super::{Database, Undo};
use crate::error::AppError;
use crate::models::{EntityId, LeagueEdition, LeagueView, Team, ValidLeague};

impl Database {
    #[instrument(
        skip(self, fields, league_image_url),
        fields(name = %fields.name, year = fields.year)
    )]
    pub async fn create_league(
        &self,
        fields: ValidLeague,
        league_image_url: String,
    ) -> Result<LeagueView, AppError> {
        let now = Utc::now();
        let edition = LeagueEdition {
            id: EntityId::generate(),
            name: fields.name,
            year: fields.year,
            sport: fields.sport,
            tournament: fields.tournament,
            league_image_url,
            teams: fields.teams,
            created_at: now,
            updated_at: now,
        };
        self.leagues.write().await.push(edition.clone());

        self.commit(&self.leagues, Undo::Insert(edition.id.clone()))
            .await?;
        info!(
            "Created league edition {} {} ({}) with {} teams",
            edition.name,
            edition.year,
            edition.id,
            edition.teams.len()
        );
        Ok(self.populate_league(edition).await)
    }

    /// Every edition of `tournament` within `sport`, populated, by ascending year.
    /// Editions sharing a year keep creation order.
    pub async fn list_leagues_by_tournament(
        &self,
        sport: &EntityId,
        tournament: &EntityId,
    ) -> Vec<LeagueView> {
        let editions = self
            .select_leagues(|e| &e.sport == sport && &e.tournament == tournament)
            .await;
        debug!(
            "Found {} editions for sport={} tournament={}",
            editions.len(),
            sport,
            tournament
        );
        self.populate_leagues(editions).await
    }

    /// Every edition whose standings list `team`, populated, by ascending year
    pub async fn list_leagues_by_team(&self, team: &EntityId) -> Vec<LeagueView> {
        let editions = self
            .select_leagues(|e| e.teams.iter().any(|s| &s.team == team))
            .await;
        self.populate_leagues(editions).await
    }

    pub async fn get_league(&self, id: &EntityId) -> Result<LeagueView, AppError> {
        let edition = self
            .leagues
            .read()
            .await
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("League", id.as_str()))?;
        Ok(self.populate_league(edition).await)
    }

    /// Full replacement of the edition's fields and standings. The image is
    /// only replaced when a new one was uploaded.
    #[instrument(skip(self, fields, league_image_url))]
    pub async fn update_league(
        &self,
        id: &EntityId,
        fields: ValidLeague,
        league_image_url: Option<String>,
    ) -> Result<LeagueView, AppError> {
        let (edition, previous) = {
            let mut leagues = self.leagues.write().await;
            let edition = leagues
                .iter_mut()
                .find(|e| &e.id == id)
                .ok_or_else(|| AppError::not_found("League", id.as_str()))?;
            let previous = edition.clone();
            edition.name = fields.name;
            edition.year = fields.year;
            edition.sport = fields.sport;
            edition.tournament = fields.tournament;
            edition.teams = fields.teams;
            if let Some(url) = league_image_url {
                edition.league_image_url = url;
            }
            edition.updated_at = Utc::now();
            (edition.clone(), previous)
        };

        self.commit(&self.leagues, Undo::Update(previous)).await?;
        Ok(self.populate_league(edition).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_league(&self, id: &EntityId) -> Result<LeagueEdition, AppError> {
        let (idx, removed) = {
            let mut leagues = self.leagues.write().await;
            let idx = leagues
                .iter()
                .position(|e| &e.id == id)
                .ok_or_else(|| AppError::not_found("League", id.as_str()))?;
            (idx, leagues.remove(idx))
        };

        self.commit(&self.leagues, Undo::Remove(idx, removed.clone()))
            .await?;
        info!(
            "Deleted league edition {} {} ({})",
            removed.name, removed.year, removed.id
        );
        Ok(removed)
    }

    async fn select_leagues<P>(&self, predicate: P) -> Vec<LeagueEdition>
    where
        P: Fn(&LeagueEdition) -> bool,
    {
        let mut editions: Vec<LeagueEdition> = self
            .leagues
            .read()
            .await
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect();
        // Stable sort keeps insertion order within a year
        editions.sort_by_key(|e| e.year);
        editions
    }

    async fn populate_leagues(&self, editions: Vec<LeagueEdition>) -> Vec<LeagueView> {
        let mut views = Vec::with_capacity(editions.len());
        for edition in editions {
            views.push(self.populate_league(edition).await);
        }
        views
    }

    async fn populate_league(&self, edition: LeagueEdition) -> LeagueView {
        let sport = self.find_sport(&edition.sport).await;
        let tournament = self.find_tournament(&edition.tournament).await;
        let teams: HashMap<EntityId, Team> = {
            let all = self.teams.read().await;
            edition
                .teams
                .iter()
                .filter_map(|s| all.iter().find(|t| t.id == s.team))
                .map(|t| (t.id.clone(), t.clone()))
                .collect()
        };

        LeagueView::new(edition, sport, tournament, |id| teams.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Standings, TeamStanding};

    fn fields(
        year: i32,
        sport: &EntityId,
        tournament: &EntityId,
        teams: Vec<TeamStanding>,
    ) -> ValidLeague {
        ValidLeague {
            name: "IPL".to_string(),
            year,
            sport: sport.clone(),
            tournament: tournament.clone(),
            teams,
        }
    }

    fn standing(team: &EntityId, position: u32) -> TeamStanding {
        TeamStanding {
            team: team.clone(),
            position,
        }
    }

    #[tokio::test]
    async fn test_list_by_tournament_sorted_by_year() {
        let db = Database::in_memory();
        let sport = EntityId::generate();
        let tournament = EntityId::generate();
        let other = EntityId::generate();
        let url = || "https://media.test/leagues/ipl.png".to_string();

        for year in [2021, 2019, 2023, 2020] {
            db.create_league(fields(year, &sport, &tournament, vec![]), url())
                .await
                .unwrap();
        }
        db.create_league(fields(2018, &sport, &other, vec![]), url())
            .await
            .unwrap();

        let years: Vec<i32> = db
            .list_leagues_by_tournament(&sport, &tournament)
            .await
            .iter()
            .map(|l| l.year)
            .collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2023]);
    }

    #[tokio::test]
    async fn test_list_by_team() {
        let db = Database::in_memory();
        let sport = EntityId::generate();
        let tournament = EntityId::generate();
        let team = EntityId::generate();
        let url = || "https://media.test/leagues/ipl.png".to_string();

        db.create_league(
            fields(2020, &sport, &tournament, vec![standing(&team, 2)]),
            url(),
        )
        .await
        .unwrap();
        db.create_league(fields(2021, &sport, &tournament, vec![]), url())
            .await
            .unwrap();

        let found = db.list_leagues_by_team(&team).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].runners_up(), vec![&team]);
        // Team record doesn't exist, so the standing is unresolved
        assert!(found[0].teams[0].team.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_standings_and_keeps_image() {
        let db = Database::in_memory();
        let sport = EntityId::generate();
        let tournament = EntityId::generate();
        let a = EntityId::generate();
        let b = EntityId::generate();

        let standings = vec![standing(&a, 1), standing(&b, 2)];
        let created = db
            .create_league(
                fields(2022, &sport, &tournament, standings),
                "https://media.test/leagues/old.png".to_string(),
            )
            .await
            .unwrap();

        let updated = db
            .update_league(
                &created.id,
                fields(2022, &sport, &tournament, vec![standing(&b, 1)]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.teams.len(), 1);
        assert_eq!(updated.winners(), vec![&b]);
        assert_eq!(
            updated.league_image_url,
            "https://media.test/leagues/old.png"
        );
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let db = Database::in_memory();
        let sport = EntityId::generate();
        let tournament = EntityId::generate();
        let created = db
            .create_league(
                fields(2022, &sport, &tournament, vec![]),
                "https://media.test/leagues/ipl.png".to_string(),
            )
            .await
            .unwrap();

        db.delete_league(&created.id).await.unwrap();
        assert!(
            db.list_leagues_by_tournament(&sport, &tournament)
                .await
                .is_empty()
        );
        assert!(db.get_league(&created.id).await.unwrap_err().is_not_found());
        assert!(
            db.delete_league(&created.id)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}

use chrono::Utc;
use tracing::{info, instrument};

use super::{Database, Undo};
use crate::error::AppError;
use crate::models::{EntityId, Tournament, TournamentType, TournamentView, ValidTournament};

/// Optional filters for listing tournaments
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub sport: Option<EntityId>,
    pub kind: Option<TournamentType>,
}

impl TournamentFilter {
    pub fn matches(&self, tournament: &Tournament) -> bool {
        self.sport.as_ref().is_none_or(|s| &tournament.sport == s)
            && self.kind.is_none_or(|k| tournament.kind == k)
    }
}

impl Database {
    #[instrument(skip(self, image_url))]
    pub async fn create_tournament(
        &self,
        fields: ValidTournament,
        image_url: String,
    ) -> Result<Tournament, AppError> {
        let now = Utc::now();
        let tournament = Tournament {
            id: EntityId::generate(),
            name: fields.name,
            sport: fields.sport,
            kind: fields.kind,
            image_url,
            priority: fields.priority,
            created_at: now,
            updated_at: now,
        };
        self.tournaments.write().await.push(tournament.clone());

        self.commit(&self.tournaments, Undo::Insert(tournament.id.clone()))
            .await?;
        info!("Created tournament {} ({})", tournament.name, tournament.id);
        Ok(tournament)
    }

    /// Matching tournaments ordered by priority (unset last), then name
    pub async fn list_tournaments(&self, filter: &TournamentFilter) -> Vec<TournamentView> {
        let mut tournaments: Vec<Tournament> = self
            .tournaments
            .read()
            .await
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tournaments.sort_by(|a, b| {
            (a.priority.is_none(), a.priority, a.name.to_lowercase())
                .cmp(&(b.priority.is_none(), b.priority, b.name.to_lowercase()))
        });

        let mut views = Vec::with_capacity(tournaments.len());
        for tournament in tournaments {
            views.push(self.populate_tournament(tournament).await);
        }
        views
    }

    pub async fn find_tournament(&self, id: &EntityId) -> Option<Tournament> {
        self.tournaments
            .read()
            .await
            .iter()
            .find(|t| &t.id == id)
            .cloned()
    }

    pub async fn get_tournament(&self, id: &EntityId) -> Result<TournamentView, AppError> {
        let tournament = self
            .find_tournament(id)
            .await
            .ok_or_else(|| AppError::not_found("Tournament", id.as_str()))?;
        Ok(self.populate_tournament(tournament).await)
    }

    #[instrument(skip(self, image_url))]
    pub async fn update_tournament(
        &self,
        id: &EntityId,
        fields: ValidTournament,
        image_url: Option<String>,
    ) -> Result<TournamentView, AppError> {
        let (tournament, previous) = {
            let mut tournaments = self.tournaments.write().await;
            let tournament = tournaments
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| AppError::not_found("Tournament", id.as_str()))?;
            let previous = tournament.clone();
            tournament.name = fields.name;
            tournament.sport = fields.sport;
            tournament.kind = fields.kind;
            tournament.priority = fields.priority;
            if let Some(url) = image_url {
                tournament.image_url = url;
            }
            tournament.updated_at = Utc::now();
            (tournament.clone(), previous)
        };

        self.commit(&self.tournaments, Undo::Update(previous))
            .await?;
        Ok(self.populate_tournament(tournament).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_tournament(&self, id: &EntityId) -> Result<Tournament, AppError> {
        let (idx, removed) = {
            let mut tournaments = self.tournaments.write().await;
            let idx = tournaments
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| AppError::not_found("Tournament", id.as_str()))?;
            (idx, tournaments.remove(idx))
        };

        self.commit(&self.tournaments, Undo::Remove(idx, removed.clone()))
            .await?;
        info!("Deleted tournament {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    pub(crate) async fn populate_tournament(&self, tournament: Tournament) -> TournamentView {
        let sport = self.find_sport(&tournament.sport).await;
        TournamentView::new(tournament, sport)
    }
}

use tracing::{info, instrument};

use super::{AdminService, require_image};
use crate::error::AppError;
use crate::media::{ImageUpload, MediaFolder};
use crate::models::{EntityId, LeagueDraft, LeagueEdition, LeagueView, Standings, ValidLeague};

impl AdminService {
    #[instrument(skip(self, draft, image))]
    pub async fn create_league(
        &self,
        draft: LeagueDraft,
        image: Option<ImageUpload>,
    ) -> Result<LeagueView, AppError> {
        let fields = draft.validate()?;
        let image = require_image(image.as_ref())?;
        self.check_league_references(&fields).await?;

        let image_url = self.upload(image, MediaFolder::Leagues).await?;
        let league = self.db.create_league(fields, image_url).await?;
        if league.has_joint_winners() {
            info!("{} {} has joint winners", league.name, league.year);
        }
        Ok(league)
    }

    /// Editions of one tournament in one sport, oldest first
    pub async fn list_leagues(&self, sport: &EntityId, tournament: &EntityId) -> Vec<LeagueView> {
        self.db.list_leagues_by_tournament(sport, tournament).await
    }

    /// Editions a single team record took part in, oldest first
    pub async fn list_leagues_for_team(&self, team: &EntityId) -> Vec<LeagueView> {
        self.db.list_leagues_by_team(team).await
    }

    pub async fn get_league(&self, id: &EntityId) -> Result<LeagueView, AppError> {
        self.db.get_league(id).await
    }

    #[instrument(skip(self, draft, image))]
    pub async fn update_league(
        &self,
        id: &EntityId,
        draft: LeagueDraft,
        image: Option<ImageUpload>,
    ) -> Result<LeagueView, AppError> {
        let fields = draft.validate()?;
        self.db.get_league(id).await?;
        self.check_league_references(&fields).await?;

        let image_url = self
            .upload_optional(image.as_ref(), MediaFolder::Leagues)
            .await?;
        self.db.update_league(id, fields, image_url).await
    }

    #[instrument(skip(self))]
    pub async fn delete_league(&self, id: &EntityId) -> Result<LeagueEdition, AppError> {
        self.db.delete_league(id).await
    }

    async fn check_league_references(&self, fields: &ValidLeague) -> Result<(), AppError> {
        self.require_sport(&fields.sport).await?;
        let tournament = self.require_tournament(&fields.tournament).await?;
        if tournament.sport != fields.sport {
            return Err(AppError::validation(format!(
                "tournament '{}' belongs to another sport",
                tournament.name
            )));
        }

        for standing in &fields.teams {
            if self.db.find_team(&standing.team).await.is_none() {
                return Err(AppError::not_found("Team", standing.team.as_str()));
            }
        }
        Ok(())
    }
}

use tracing::instrument;

use super::{AdminService, require_image};
use crate::error::AppError;
use crate::media::{ImageUpload, MediaFolder};
use crate::models::{EntityId, Tournament, TournamentDraft, TournamentView};
use crate::store::TournamentFilter;

impl AdminService {
    #[instrument(skip(self, image))]
    pub async fn create_tournament(
        &self,
        draft: TournamentDraft,
        image: Option<ImageUpload>,
    ) -> Result<TournamentView, AppError> {
        let fields = draft.validate()?;
        let image = require_image(image.as_ref())?;
        self.require_sport(&fields.sport).await?;

        let image_url = self.upload(image, MediaFolder::Tournaments).await?;
        let tournament = self.db.create_tournament(fields, image_url).await?;
        Ok(self.db.populate_tournament(tournament).await)
    }

    pub async fn list_tournaments(&self, filter: &TournamentFilter) -> Vec<TournamentView> {
        self.db.list_tournaments(filter).await
    }

    pub async fn get_tournament(&self, id: &EntityId) -> Result<TournamentView, AppError> {
        self.db.get_tournament(id).await
    }

    #[instrument(skip(self, image))]
    pub async fn update_tournament(
        &self,
        id: &EntityId,
        draft: TournamentDraft,
        image: Option<ImageUpload>,
    ) -> Result<TournamentView, AppError> {
        let fields = draft.validate()?;
        self.require_tournament(id).await?;
        self.require_sport(&fields.sport).await?;

        let image_url = self
            .upload_optional(image.as_ref(), MediaFolder::Tournaments)
            .await?;
        self.db.update_tournament(id, fields, image_url).await
    }

    #[instrument(skip(self))]
    pub async fn delete_tournament(&self, id: &EntityId) -> Result<Tournament, AppError> {
        self.db.delete_tournament(id).await
    }
}

use tracing::instrument;

use super::{AdminService, require_image};
use crate::error::AppError;
use crate::media::{ImageUpload, MediaFolder};
use crate::models::{EntityId, Sport, SportDraft, optional_text};

impl AdminService {
    #[instrument(skip(self, image))]
    pub async fn create_sport(
        &self,
        draft: SportDraft,
        image: Option<ImageUpload>,
    ) -> Result<Sport, AppError> {
        let name = draft.validate()?;
        let image = require_image(image.as_ref())?;
        let image_url = self.upload(image, MediaFolder::Sports).await?;
        self.db.create_sport(name, image_url).await
    }

    pub async fn list_sports(&self) -> Vec<Sport> {
        self.db.list_sports().await
    }

    pub async fn get_sport(&self, id: &EntityId) -> Result<Sport, AppError> {
        self.db.get_sport(id).await
    }

    /// Both the name and the image are optional; whatever is absent is kept.
    #[instrument(skip(self, image))]
    pub async fn update_sport(
        &self,
        id: &EntityId,
        draft: SportDraft,
        image: Option<ImageUpload>,
    ) -> Result<Sport, AppError> {
        let existing = self.db.get_sport(id).await?;
        let name = optional_text(&draft.name).unwrap_or(existing.name);
        let image_url = self
            .upload_optional(image.as_ref(), MediaFolder::Sports)
            .await?;
        self.db.update_sport(id, name, image_url).await
    }

    #[instrument(skip(self))]
    pub async fn delete_sport(&self, id: &EntityId) -> Result<Sport, AppError> {
        self.db.delete_sport(id).await
    }
}

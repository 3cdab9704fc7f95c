//! Request orchestration: validation, reference checks, image upload and the
//! store write, always in that order. A request that fails validation never
//! reaches the media host, and a failed upload never leaves a record behind.

mod leagues;
mod sports;
mod teams;
mod tournaments;

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::media::{ImageUpload, MediaFolder, MediaUploader};
use crate::models::{EntityId, Sport, Tournament};
use crate::store::Database;

#[derive(Clone)]
pub struct AdminService {
    db: Arc<Database>,
    media: Arc<dyn MediaUploader>,
}

impl AdminService {
    pub fn new(db: Arc<Database>, media: Arc<dyn MediaUploader>) -> Self {
        AdminService { db, media }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Uploads an image when one was submitted
    async fn upload_optional(
        &self,
        image: Option<&ImageUpload>,
        folder: MediaFolder,
    ) -> Result<Option<String>, AppError> {
        match image {
            Some(image) => Ok(Some(self.upload(image, folder).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, image), fields(file = image.file_name()))]
    async fn upload(&self, image: &ImageUpload, folder: MediaFolder) -> Result<String, AppError> {
        let url = self.media.upload(image.path(), folder).await?;
        debug!("Stored image at {}", url);
        Ok(url)
    }

    async fn require_sport(&self, id: &EntityId) -> Result<Sport, AppError> {
        self.db.get_sport(id).await
    }

    async fn require_tournament(&self, id: &EntityId) -> Result<Tournament, AppError> {
        self.db
            .find_tournament(id)
            .await
            .ok_or_else(|| AppError::not_found("Tournament", id.as_str()))
    }
}

/// Creates need an image; the check runs with the other field validation
fn require_image(image: Option<&ImageUpload>) -> Result<&ImageUpload, AppError> {
    image.ok_or_else(|| AppError::validation("image is required"))
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("snapshot", &self.db.snapshot_path())
            .finish_non_exhaustive()
    }
}

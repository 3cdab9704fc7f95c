use chrono::Utc;
use tracing::{info, instrument};

use super::{Database, Undo};
use crate::error::AppError;
use crate::models::{EntityId, Sport};

impl Database {
    /// Inserts a sport. The uniqueness check and the insert happen under the
    /// same write lock.
    #[instrument(skip(self, image_url))]
    pub async fn create_sport(&self, name: String, image_url: String) -> Result<Sport, AppError> {
        let sport = {
            let mut sports = self.sports.write().await;
            if sports.iter().any(|s| s.has_name(&name)) {
                return Err(AppError::validation(format!(
                    "Sport '{name}' already exists"
                )));
            }

            let now = Utc::now();
            let sport = Sport {
                id: EntityId::generate(),
                name,
                image_url,
                created_at: now,
                updated_at: now,
            };
            sports.push(sport.clone());
            sport
        };

        self.commit(&self.sports, Undo::Insert(sport.id.clone()))
            .await?;
        info!("Created sport {} ({})", sport.name, sport.id);
        Ok(sport)
    }

    /// All sports ordered by name
    pub async fn list_sports(&self) -> Vec<Sport> {
        let mut sports = self.sports.read().await.clone();
        sports.sort_by_key(|s| s.name.to_lowercase());
        sports
    }

    pub async fn find_sport(&self, id: &EntityId) -> Option<Sport> {
        self.sports
            .read()
            .await
            .iter()
            .find(|s| &s.id == id)
            .cloned()
    }

    pub async fn get_sport(&self, id: &EntityId) -> Result<Sport, AppError> {
        self.find_sport(id)
            .await
            .ok_or_else(|| AppError::not_found("Sport", id.as_str()))
    }

    /// Renames a sport and, when `image_url` is given, replaces its image.
    #[instrument(skip(self, image_url))]
    pub async fn update_sport(
        &self,
        id: &EntityId,
        name: String,
        image_url: Option<String>,
    ) -> Result<Sport, AppError> {
        let (sport, previous) = {
            let mut sports = self.sports.write().await;
            if sports.iter().any(|s| &s.id != id && s.has_name(&name)) {
                return Err(AppError::validation(format!(
                    "Sport '{name}' already exists"
                )));
            }

            let sport = sports
                .iter_mut()
                .find(|s| &s.id == id)
                .ok_or_else(|| AppError::not_found("Sport", id.as_str()))?;
            let previous = sport.clone();
            sport.name = name;
            if let Some(url) = image_url {
                sport.image_url = url;
            }
            sport.updated_at = Utc::now();
            (sport.clone(), previous)
        };

        self.commit(&self.sports, Undo::Update(previous)).await?;
        Ok(sport)
    }

    /// Removes a sport. Tournaments, teams and editions that reference it are
    /// left as they are.
    #[instrument(skip(self))]
    pub async fn delete_sport(&self, id: &EntityId) -> Result<Sport, AppError> {
        let (idx, removed) = {
            let mut sports = self.sports.write().await;
            let idx = sports
                .iter()
                .position(|s| &s.id == id)
                .ok_or_else(|| AppError::not_found("Sport", id.as_str()))?;
            (idx, sports.remove(idx))
        };

        self.commit(&self.sports, Undo::Remove(idx, removed.clone()))
            .await?;
        info!("Deleted sport {} ({})", removed.name, removed.id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (Database, Sport) {
        let db = Database::in_memory();
        let sport = db
            .create_sport(
                "Cricket".to_string(),
                "https://media.test/c.png".to_string(),
            )
            .await
            .unwrap();
        (db, sport)
    }

    #[tokio::test]
    async fn test_duplicate_names_rejected() {
        let (db, _) = seeded().await;
        let err = db
            .create_sport(
                "CRICKET".to_string(),
                "https://media.test/x.png".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_non_ascii_names_rejected() {
        let db = Database::in_memory();
        db.create_sport(
            "Échecs".to_string(),
            "https://media.test/echecs.png".to_string(),
        )
        .await
        .unwrap();
        let err = db
            .create_sport(
                "échecs".to_string(),
                "https://media.test/echecs-2.png".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let (db, _) = seeded().await;
        db.create_sport(
            "Athletics".to_string(),
            "https://media.test/a.png".to_string(),
        )
        .await
        .unwrap();

        let names: Vec<String> = db.list_sports().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Athletics", "Cricket"]);
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_not_supplied() {
        let (db, sport) = seeded().await;
        let updated = db
            .update_sport(&sport.id, "Test Cricket".to_string(), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Test Cricket");
        assert_eq!(updated.image_url, sport.image_url);
        assert!(updated.updated_at >= sport.updated_at);
    }

    #[tokio::test]
    async fn test_update_allows_keeping_own_name() {
        let (db, sport) = seeded().await;
        let updated = db
            .update_sport(
                &sport.id,
                "cricket".to_string(),
                Some("https://media.test/n.png".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(updated.image_url, "https://media.test/n.png");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let (db, sport) = seeded().await;
        db.delete_sport(&sport.id).await.unwrap();
        assert!(db.get_sport(&sport.id).await.unwrap_err().is_not_found());
        assert!(db.delete_sport(&sport.id).await.unwrap_err().is_not_found());
    }
}

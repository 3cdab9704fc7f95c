use tracing::{info, instrument};

use super::{AdminService, require_image};
use crate::error::AppError;
use crate::lineage::{self, TeamHistory};
use crate::media::{ImageUpload, MediaFolder};
use crate::models::{EntityId, Team, TeamDraft, TeamKind, TeamView, ValidTeam};
use crate::store::TeamFilter;

impl AdminService {
    #[instrument(skip(self, image))]
    pub async fn create_team(
        &self,
        draft: TeamDraft,
        image: Option<ImageUpload>,
    ) -> Result<TeamView, AppError> {
        let fields = draft.validate()?;
        let image = require_image(image.as_ref())?;
        self.check_team_references(&fields).await?;

        let image_url = self.upload(image, MediaFolder::Teams).await?;
        let team = self.db.create_team(fields, image_url).await?;
        Ok(self.db.populate_team(team).await)
    }

    pub async fn list_teams(&self, filter: &TeamFilter) -> Vec<TeamView> {
        self.db.list_teams(filter).await
    }

    pub async fn get_team(&self, id: &EntityId) -> Result<TeamView, AppError> {
        let team = self.db.get_team(id).await?;
        Ok(self.db.populate_team(team).await)
    }

    /// Lineage of the team plus the editions the whole group won or finished
    /// second in.
    #[instrument(skip(self))]
    pub async fn team_history(&self, id: &EntityId) -> Result<TeamHistory, AppError> {
        let lineage = lineage::resolve(&self.db, id).await?;
        let history = TeamHistory::build(&self.db, lineage).await;
        info!(
            "History for {}: {} members, {} won, {} runner-up",
            id,
            history.members.len(),
            history.won.len(),
            history.runner_up.len()
        );
        Ok(history)
    }

    #[instrument(skip(self, image))]
    pub async fn update_team(
        &self,
        id: &EntityId,
        draft: TeamDraft,
        image: Option<ImageUpload>,
    ) -> Result<TeamView, AppError> {
        let fields = draft.validate()?;
        self.db.get_team(id).await?;
        self.check_team_references(&fields).await?;

        let image_url = self
            .upload_optional(image.as_ref(), MediaFolder::Teams)
            .await?;
        let team = self.db.update_team(id, fields, image_url).await?;
        Ok(self.db.populate_team(team).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_team(&self, id: &EntityId) -> Result<Team, AppError> {
        self.db.delete_team(id).await
    }

    /// The sport must exist. A league team's tournament must exist, be a
    /// League tournament and belong to the same sport.
    async fn check_team_references(&self, fields: &ValidTeam) -> Result<(), AppError> {
        self.require_sport(&fields.sport).await?;

        if let TeamKind::League { tournament, .. } = &fields.kind {
            let tournament = self.require_tournament(tournament).await?;
            if tournament.kind.team_type() != fields.kind.team_type() {
                return Err(AppError::validation(format!(
                    "tournament '{}' is {} and does not take {} teams",
                    tournament.name,
                    tournament.kind,
                    fields.kind.team_type()
                )));
            }
            if tournament.sport != fields.sport {
                return Err(AppError::validation(format!(
                    "tournament '{}' belongs to another sport",
                    tournament.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::models::{EntityId, TeamType};
    use crate::testing_utils::{TestDataBuilder, test_image, test_service};

    #[tokio::test]
    async fn test_league_team_needs_league_tournament_of_same_sport() {
        let (service, uploader) = test_service();
        let data = TestDataBuilder::new(&service);
        let cricket = data.sport("Cricket").await;
        let football = data.sport("Football").await;
        let world_cup = data
            .tournament("World Cup", &cricket.id, "International")
            .await;
        let isl = data.tournament("ISL", &football.id, "League").await;
        let before = uploader.upload_count();

        let wrong_type = service
            .create_team(
                TestDataBuilder::league_team_draft(
                    "Mumbai Indians",
                    &cricket.id,
                    "Mumbai",
                    &world_cup.id,
                ),
                Some(test_image()),
            )
            .await
            .unwrap_err();
        assert!(matches!(wrong_type, AppError::Validation(_)));
        assert!(
            wrong_type
                .to_string()
                .contains("is International and does not take League teams")
        );

        let wrong_sport = service
            .create_team(
                TestDataBuilder::league_team_draft(
                    "Mumbai Indians",
                    &cricket.id,
                    "Mumbai",
                    &isl.id,
                ),
                Some(test_image()),
            )
            .await
            .unwrap_err();
        assert!(matches!(wrong_sport, AppError::Validation(_)));

        let missing = service
            .create_team(
                TestDataBuilder::league_team_draft(
                    "Mumbai Indians",
                    &cricket.id,
                    "Mumbai",
                    &EntityId::generate(),
                ),
                Some(test_image()),
            )
            .await
            .unwrap_err();
        assert!(missing.is_not_found());

        assert_eq!(uploader.upload_count(), before);
    }

    #[tokio::test]
    async fn test_update_switches_kind() {
        let (service, _) = test_service();
        let data = TestDataBuilder::new(&service);
        let cricket = data.sport("Cricket").await;
        let ipl = data.tournament("IPL", &cricket.id, "League").await;
        let team = data
            .league_team("Mumbai Indians", &cricket.id, "Mumbai", &ipl.id)
            .await;
        assert_eq!(
            team.tournament.as_ref().map(|t| t.id.clone()),
            Some(ipl.id.clone())
        );

        let updated = service
            .update_team(
                &team.id,
                TestDataBuilder::national_team_draft("India", &cricket.id, "India"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.kind, TeamType::National);
        assert_eq!(updated.country.as_deref(), Some("India"));
        assert!(updated.city.is_none());
        assert!(updated.tournament.is_none());
        assert!(updated.tournament_id.is_none());
        assert_eq!(updated.image_url, team.image_url);
    }

    #[tokio::test]
    async fn test_history_of_unknown_team() {
        let (service, _) = test_service();
        let err = service
            .team_history(&EntityId::generate())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

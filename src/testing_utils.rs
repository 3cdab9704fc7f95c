//! Fixtures shared by unit and integration tests.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::AppError;
use crate::media::{ImageUpload, MediaFolder, MediaUploader};
use crate::models::{
    EntityId, LeagueDraft, LeagueView, Sport, SportDraft, StandingDraft, TeamDraft, TeamView,
    TournamentDraft, TournamentView,
};
use crate::service::AdminService;
use crate::store::Database;

/// Media uploader that hands out predictable URLs without any network.
#[derive(Debug, Default)]
pub struct StubUploader {
    uploads: AtomicUsize,
    fail_next: AtomicBool,
}

impl StubUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Makes the next upload fail with an upstream error
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaUploader for StubUploader {
    async fn upload(&self, file_path: &Path, folder: MediaFolder) -> Result<String, AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::upstream("stub media host is down"));
        }
        if !file_path.exists() {
            return Err(AppError::unexpected(format!(
                "upload file {} is missing",
                file_path.display()
            )));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://media.test/{folder}/{n}.png"))
    }
}

/// In-memory service wired to a stub uploader
pub fn test_service() -> (AdminService, Arc<StubUploader>) {
    let uploader = Arc::new(StubUploader::new());
    let service = AdminService::new(Arc::new(Database::in_memory()), uploader.clone());
    (service, uploader)
}

/// A small fake PNG spooled to a temp file
pub fn test_image() -> ImageUpload {
    ImageUpload::from_bytes("logo.png", b"\x89PNG\r\n\x1a\nfake")
        .unwrap_or_else(|e| panic!("failed to spool test image: {e}"))
}

/// Test utilities for creating drafts and seeding a service
pub struct TestDataBuilder<'a> {
    service: &'a AdminService,
}

impl<'a> TestDataBuilder<'a> {
    pub fn new(service: &'a AdminService) -> Self {
        TestDataBuilder { service }
    }

    pub fn sport_draft(name: &str) -> SportDraft {
        SportDraft {
            name: Some(name.to_string()),
        }
    }

    pub fn tournament_draft(name: &str, sport: &EntityId, kind: &str) -> TournamentDraft {
        TournamentDraft {
            name: Some(name.to_string()),
            sport: Some(sport.to_string()),
            kind: Some(kind.to_string()),
            priority: None,
        }
    }

    pub fn league_team_draft(
        name: &str,
        sport: &EntityId,
        city: &str,
        tournament: &EntityId,
    ) -> TeamDraft {
        TeamDraft {
            name: Some(name.to_string()),
            sport: Some(sport.to_string()),
            kind: Some("League".to_string()),
            country: None,
            city: Some(city.to_string()),
            tournament: Some(tournament.to_string()),
            inactive: None,
        }
    }

    pub fn national_team_draft(name: &str, sport: &EntityId, country: &str) -> TeamDraft {
        TeamDraft {
            name: Some(name.to_string()),
            sport: Some(sport.to_string()),
            kind: Some("National".to_string()),
            country: Some(country.to_string()),
            city: None,
            tournament: None,
            inactive: None,
        }
    }

    /// Edition draft listing `teams` in finishing order without explicit positions
    pub fn league_draft(
        name: &str,
        year: i32,
        sport: &EntityId,
        tournament: &EntityId,
        teams: &[&EntityId],
    ) -> LeagueDraft {
        LeagueDraft {
            name: Some(name.to_string()),
            year: Some(year.to_string()),
            sport: Some(sport.to_string()),
            tournament: Some(tournament.to_string()),
            joint_winner: false,
            teams: teams
                .iter()
                .map(|id| StandingDraft {
                    team: Some(id.to_string()),
                    position: None,
                })
                .collect(),
        }
    }

    pub async fn sport(&self, name: &str) -> Sport {
        self.service
            .create_sport(Self::sport_draft(name), Some(test_image()))
            .await
            .unwrap_or_else(|e| panic!("seeding sport {name}: {e}"))
    }

    pub async fn tournament(&self, name: &str, sport: &EntityId, kind: &str) -> TournamentView {
        self.service
            .create_tournament(
                Self::tournament_draft(name, sport, kind),
                Some(test_image()),
            )
            .await
            .unwrap_or_else(|e| panic!("seeding tournament {name}: {e}"))
    }

    pub async fn team(&self, draft: TeamDraft) -> TeamView {
        let name = draft.name.clone().unwrap_or_default();
        self.service
            .create_team(draft, Some(test_image()))
            .await
            .unwrap_or_else(|e| panic!("seeding team {name}: {e}"))
    }

    pub async fn league_team(
        &self,
        name: &str,
        sport: &EntityId,
        city: &str,
        tournament: &EntityId,
    ) -> TeamView {
        self.team(Self::league_team_draft(name, sport, city, tournament))
            .await
    }

    /// A league team already marked inactive, as left behind by a rename
    pub async fn retired_league_team(
        &self,
        name: &str,
        sport: &EntityId,
        city: &str,
        tournament: &EntityId,
    ) -> TeamView {
        let mut draft = Self::league_team_draft(name, sport, city, tournament);
        draft.inactive = Some("true".to_string());
        self.team(draft).await
    }

    pub async fn national_team(&self, name: &str, sport: &EntityId, country: &str) -> TeamView {
        self.team(Self::national_team_draft(name, sport, country))
            .await
    }

    pub async fn league(
        &self,
        name: &str,
        year: i32,
        sport: &EntityId,
        tournament: &EntityId,
        teams: &[&EntityId],
    ) -> LeagueView {
        self.service
            .create_league(
                Self::league_draft(name, year, sport, tournament, teams),
                Some(test_image()),
            )
            .await
            .unwrap_or_else(|e| panic!("seeding league {name} {year}: {e}"))
    }
}

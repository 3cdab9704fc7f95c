//! End-to-end scenarios through the admin service with an in-memory store
//! and a stub media host.

use sports_admin::Standings;
use sports_admin::lineage;
use sports_admin::models::{EntityId, StandingDraft};
use sports_admin::store::Database;
use sports_admin::testing_utils::{TestDataBuilder, test_image, test_service};

#[tokio::test]
async fn test_mumbai_rename_scenario() {
    let (service, _) = test_service();
    let data = TestDataBuilder::new(&service);

    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;
    let old = data
        .retired_league_team("Bombay Blues", &cricket.id, "Mumbai", &premier.id)
        .await;
    let new = data
        .league_team("Mumbai Indians", &cricket.id, "Mumbai", &premier.id)
        .await;

    for id in [&old.id, &new.id] {
        let group = lineage::resolve(service.database(), id).await.unwrap();
        let ids = group.member_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&old.id) && ids.contains(&new.id));
        assert_eq!(group.current_name(), "Mumbai Indians");
    }

    let mut draft =
        TestDataBuilder::league_draft("Premier League", 2023, &cricket.id, &premier.id, &[]);
    draft.teams = vec![
        StandingDraft {
            team: Some(old.id.to_string()),
            position: Some("1".to_string()),
        },
        StandingDraft {
            team: Some(new.id.to_string()),
            position: Some("2".to_string()),
        },
    ];
    let edition = service
        .create_league(draft, Some(test_image()))
        .await
        .unwrap();

    let listed = service.list_leagues(&cricket.id, &premier.id).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].year, 2023);
    assert_eq!(
        listed[0].teams[0].team.as_ref().map(|t| t.name.as_str()),
        Some("Bombay Blues")
    );
    assert_eq!(
        listed[0].tournament.as_ref().map(|t| t.name.as_str()),
        Some("Premier League")
    );

    let history = service.team_history(&new.id).await.unwrap();
    assert_eq!(history.current_name, "Mumbai Indians");
    assert_eq!(history.members.len(), 2);
    assert_eq!(history.won.len(), 1);
    assert_eq!(history.won[0].id, edition.id);
    assert_eq!(history.runner_up.len(), 1);
    assert_eq!(history.runner_up[0].id, edition.id);
}

#[tokio::test]
async fn test_edition_without_results() {
    let (service, _) = test_service();
    let data = TestDataBuilder::new(&service);
    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;

    let edition = data
        .league("Premier League", 2024, &cricket.id, &premier.id, &[])
        .await;
    assert!(edition.teams.is_empty());
    assert!(edition.winners().is_empty());
    assert!(!edition.has_joint_winners());
}

#[tokio::test]
async fn test_positions_follow_submission_order() {
    let (service, _) = test_service();
    let data = TestDataBuilder::new(&service);
    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;

    let mut ids = Vec::new();
    for (name, city) in [
        ("Alpha", "Agra"),
        ("Bravo", "Bhopal"),
        ("Charlie", "Chennai"),
        ("Delta", "Delhi"),
    ] {
        let team = data
            .league_team(name, &cricket.id, city, &premier.id)
            .await;
        ids.push(team.id);
    }
    let refs: Vec<&EntityId> = ids.iter().collect();

    let sequential = data
        .league("Premier League", 2020, &cricket.id, &premier.id, &refs)
        .await;
    let positions: Vec<u32> = sequential.teams.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);

    let mut joint =
        TestDataBuilder::league_draft("Premier League", 2021, &cricket.id, &premier.id, &refs);
    joint.joint_winner = true;
    let joint = service
        .create_league(joint, Some(test_image()))
        .await
        .unwrap();
    let positions: Vec<u32> = joint.teams.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 1, 3, 4]);
    assert!(joint.runners_up().is_empty());

    // Bravo shares the 2021 title and was second in 2020
    let history = service.team_history(&ids[1]).await.unwrap();
    let won: Vec<i32> = history.won.iter().map(|e| e.year).collect();
    assert_eq!(won, vec![2021]);
    let runner_up: Vec<i32> = history.runner_up.iter().map(|e| e.year).collect();
    assert_eq!(runner_up, vec![2020]);
}

#[tokio::test]
async fn test_listing_sorted_by_year_and_delete() {
    let (service, _) = test_service();
    let data = TestDataBuilder::new(&service);
    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;

    let mut created = Vec::new();
    for year in [2018, 2011, 2023, 2015] {
        let edition = data
            .league("Premier League", year, &cricket.id, &premier.id, &[])
            .await;
        created.push(edition);
    }

    let years: Vec<i32> = service
        .list_leagues(&cricket.id, &premier.id)
        .await
        .iter()
        .map(|e| e.year)
        .collect();
    assert_eq!(years, vec![2011, 2015, 2018, 2023]);

    let removed = service.delete_league(&created[0].id).await.unwrap();
    assert_eq!(removed.year, 2018);
    assert!(
        service
            .get_league(&created[0].id)
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        service
            .delete_league(&created[0].id)
            .await
            .unwrap_err()
            .is_not_found()
    );
    let remaining = service.list_leagues(&cricket.id, &premier.id).await;
    assert_eq!(remaining.len(), 3);
}

#[tokio::test]
async fn test_deleted_team_renders_as_null() {
    let (service, _) = test_service();
    let data = TestDataBuilder::new(&service);
    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;
    let team = data
        .league_team("Alpha", &cricket.id, "Agra", &premier.id)
        .await;
    data.league(
        "Premier League",
        2022,
        &cricket.id,
        &premier.id,
        &[&team.id],
    )
    .await;

    service.delete_team(&team.id).await.unwrap();

    let listed = service.list_leagues(&cricket.id, &premier.id).await;
    assert!(listed[0].teams[0].team.is_none());
    assert_eq!(listed[0].teams[0].team_id, team.id);
    assert_eq!(listed[0].winners(), vec![&team.id]);
}

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");

    let db = std::sync::Arc::new(Database::open(&path).await.unwrap());
    let uploader = std::sync::Arc::new(sports_admin::testing_utils::StubUploader::new());
    let service = sports_admin::AdminService::new(db, uploader);
    let data = TestDataBuilder::new(&service);
    let cricket = data.sport("Cricket").await;
    let premier = data
        .tournament("Premier League", &cricket.id, "League")
        .await;
    let team = data
        .league_team("Alpha", &cricket.id, "Agra", &premier.id)
        .await;
    let edition = data
        .league(
            "Premier League",
            2022,
            &cricket.id,
            &premier.id,
            &[&team.id],
        )
        .await;

    let reopened = Database::open(&path).await.unwrap();
    let league = reopened.get_league(&edition.id).await.unwrap();
    assert_eq!(league.year, 2022);
    assert_eq!(
        league.teams[0].team.as_ref().map(|t| t.name.as_str()),
        Some("Alpha")
    );
    assert_eq!(
        league.sport.as_ref().map(|s| s.name.as_str()),
        Some("Cricket")
    );
}

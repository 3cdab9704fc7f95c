use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument};

use super::Lineage;
use crate::constants::standings::{RUNNER_UP, WINNER};
use crate::models::{EntityId, LeagueView, Standings, TeamView};
use crate::store::Database;

/// Editions an identity group won and finished second in, each by ascending year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditionHistory {
    pub won: Vec<LeagueView>,
    #[serde(rename = "runnerUp")]
    pub runner_up: Vec<LeagueView>,
}

/// Response body of the team history lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHistory {
    pub team: TeamView,
    #[serde(rename = "currentName")]
    pub current_name: String,
    pub members: Vec<TeamView>,
    pub won: Vec<LeagueView>,
    #[serde(rename = "runnerUp")]
    pub runner_up: Vec<LeagueView>,
}

/// Splits `editions` into won and runner-up sets for the group `member_ids`.
///
/// An edition reached through several members is counted once. With joint
/// winners an edition lands in `won` for both sharing teams and has no
/// runner-up entry.
pub fn split_history(member_ids: &HashSet<EntityId>, editions: Vec<LeagueView>) -> EditionHistory {
    let mut seen = HashSet::new();
    let mut unique: Vec<LeagueView> = editions
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect();
    unique.sort_by_key(|e| e.year);

    let mut history = EditionHistory::default();
    for edition in unique {
        let won = edition.placed_any(member_ids, WINNER);
        let second = edition.placed_any(member_ids, RUNNER_UP);
        match (won, second) {
            (true, true) => {
                history.won.push(edition.clone());
                history.runner_up.push(edition);
            }
            (true, false) => history.won.push(edition),
            (false, true) => history.runner_up.push(edition),
            (false, false) => {}
        }
    }
    history
}

/// Collects the editions of every lineage member concurrently and splits them.
#[instrument(skip(db, lineage), fields(team = %lineage.team.id, members = lineage.members.len()))]
pub async fn aggregate(db: &Database, lineage: &Lineage) -> EditionHistory {
    let per_member = join_all(
        lineage
            .members
            .iter()
            .map(|member| db.list_leagues_by_team(&member.id)),
    )
    .await;

    let editions: Vec<LeagueView> = per_member.into_iter().flatten().collect();
    debug!(
        "Fetched {} edition entries across the lineage",
        editions.len()
    );
    split_history(&lineage.member_ids(), editions)
}

impl TeamHistory {
    /// Populates the lineage members and aggregates their editions
    pub async fn build(db: &Database, lineage: Lineage) -> Self {
        let history = aggregate(db, &lineage).await;
        let current_name = lineage.current_name().to_string();

        let mut members = Vec::with_capacity(lineage.members.len());
        for member in lineage.members {
            members.push(db.populate_team(member).await);
        }

        TeamHistory {
            team: db.populate_team(lineage.team).await,
            current_name,
            members,
            won: history.won,
            runner_up: history.runner_up,
        }
    }
}

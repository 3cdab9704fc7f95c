//! Team identity over time.
//!
//! A club or national side is stored as several team records when it is
//! renamed: the old records are flagged inactive and a new one is created.
//! Records that share a city (league teams) or a country (national teams)
//! within one sport are treated as the same identity.

pub mod history;

pub use history::{EditionHistory, TeamHistory, aggregate, split_history};

use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use crate::error::AppError;
use crate::models::{EntityId, Team, TeamKind};
use crate::store::{Database, TeamFilter};

/// A team together with every record sharing its identity, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    pub team: Team,
    pub members: Vec<Team>,
}

impl Lineage {
    /// Builds a lineage from already-matched records. Members are ordered by
    /// creation time; records created at the same instant keep their input order.
    pub fn new(team: Team, mut members: Vec<Team>) -> Self {
        if members.is_empty() {
            members.push(team.clone());
        }
        members.sort_by_key(|m| m.created_at);
        Lineage { team, members }
    }

    /// Most recently created active member, or the queried team when every
    /// member is inactive.
    pub fn current(&self) -> &Team {
        self.members
            .iter()
            .rev()
            .find(|m| m.is_active())
            .unwrap_or(&self.team)
    }

    pub fn current_name(&self) -> &str {
        &self.current().name
    }

    pub fn member_ids(&self) -> HashSet<EntityId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }
}

/// Filter selecting every record with the same identity as `team`
pub fn identity_filter(team: &Team) -> TeamFilter {
    let mut filter = TeamFilter {
        sport: Some(team.sport.clone()),
        kind: Some(team.team_type()),
        ..TeamFilter::default()
    };
    match &team.kind {
        TeamKind::League { city, .. } => filter.city = Some(city.clone()),
        TeamKind::National { country } => filter.country = Some(country.clone()),
    }
    filter
}

/// Resolves the identity group of the team with `id`.
#[instrument(skip(db))]
pub async fn resolve(db: &Database, id: &EntityId) -> Result<Lineage, AppError> {
    let team = db.get_team(id).await?;
    let members = db.find_teams(&identity_filter(&team)).await;

    if !members.iter().any(|m| &m.id == id) {
        warn!("Team {} did not match its own identity filter", id);
        return Ok(Lineage::new(team, Vec::new()));
    }

    debug!("Team {} resolves to {} records", id, members.len());
    Ok(Lineage::new(team, members))
}

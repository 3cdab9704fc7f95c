use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{EntityId, parse_flag, required_id, required_text};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamType {
    National,
    League,
}

impl TeamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamType::National => "National",
            TeamType::League => "League",
        }
    }
}

impl FromStr for TeamType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "national" => Ok(TeamType::National),
            "league" => Ok(TeamType::League),
            other => Err(AppError::validation(format!(
                "type must be National or League, got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific team fields. Serialized flat next to the common fields,
/// discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TeamKind {
    National {
        country: String,
    },
    League {
        city: String,
        tournament: EntityId,
    },
}

impl TeamKind {
    pub fn team_type(&self) -> TeamType {
        match self {
            TeamKind::National { .. } => TeamType::National,
            TeamKind::League { .. } => TeamType::League,
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            TeamKind::National { country } => Some(country),
            TeamKind::League { .. } => None,
        }
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            TeamKind::League { city, .. } => Some(city),
            TeamKind::National { .. } => None,
        }
    }

    pub fn tournament(&self) -> Option<&EntityId> {
        match self {
            TeamKind::League { tournament, .. } => Some(tournament),
            TeamKind::National { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub sport: EntityId,
    #[serde(flatten)]
    pub kind: TeamKind,
    #[serde(default)]
    pub inactive: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn team_type(&self) -> TeamType {
        self.kind.team_type()
    }

    pub fn is_active(&self) -> bool {
        !self.inactive
    }
}

/// Raw team form fields as submitted
#[derive(Debug, Clone, Default)]
pub struct TeamDraft {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub kind: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub tournament: Option<String>,
    pub inactive: Option<String>,
}

/// Team fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTeam {
    pub name: String,
    pub sport: EntityId,
    pub kind: TeamKind,
    pub inactive: bool,
}

impl TeamDraft {
    /// Builds the team kind from `type`, requiring exactly the fields that kind
    /// needs. Fields belonging to the other kind are dropped.
    pub fn validate(&self) -> Result<ValidTeam, AppError> {
        let name = required_text(&self.name, "name")?;
        let sport = required_id(&self.sport, "sport")?;
        let team_type = required_text(&self.kind, "type")?.parse::<TeamType>()?;

        let kind = match team_type {
            TeamType::National => TeamKind::National {
                country: required_text(&self.country, "country")?,
            },
            TeamType::League => TeamKind::League {
                city: required_text(&self.city, "city")?,
                tournament: required_id(&self.tournament, "tournament")?,
            },
        };

        Ok(ValidTeam {
            name,
            sport,
            kind,
            inactive: parse_flag(&self.inactive, "inactive")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league_draft() -> TeamDraft {
        TeamDraft {
            name: Some("Mumbai Indians".to_string()),
            sport: Some(EntityId::generate().to_string()),
            kind: Some("League".to_string()),
            country: None,
            city: Some(" Mumbai ".to_string()),
            tournament: Some(EntityId::generate().to_string()),
            inactive: None,
        }
    }

    #[test]
    fn test_league_team_requires_city_and_tournament() {
        let valid = league_draft().validate().unwrap();
        assert_eq!(valid.kind.city(), Some("Mumbai"));
        assert!(valid.kind.tournament().is_some());
        assert!(!valid.inactive);

        let mut missing_city = league_draft();
        missing_city.city = None;
        assert_eq!(
            missing_city.validate().unwrap_err().to_string(),
            "Validation failed: city is required"
        );

        let mut missing_tournament = league_draft();
        missing_tournament.tournament = Some("".to_string());
        assert!(missing_tournament.validate().is_err());
    }

    #[test]
    fn test_national_team_requires_country() {
        let mut draft = league_draft();
        draft.kind = Some("National".to_string());
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Validation failed: country is required"
        );

        draft.country = Some("India".to_string());
        let valid = draft.validate().unwrap();
        assert_eq!(
            valid.kind,
            TeamKind::National {
                country: "India".to_string()
            }
        );
    }

    #[test]
    fn test_switching_kind_drops_other_fields() {
        let mut draft = league_draft();
        draft.kind = Some("national".to_string());
        draft.country = Some("India".to_string());

        let valid = draft.validate().unwrap();
        assert_eq!(valid.kind.city(), None);
        assert_eq!(valid.kind.tournament(), None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut draft = league_draft();
        draft.kind = Some("Franchise".to_string());
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_team_serializes_flat() {
        let now = Utc::now();
        let tournament = EntityId::generate();
        let team = Team {
            id: EntityId::generate(),
            name: "Mumbai Indians".to_string(),
            image_url: "https://media.test/teams/mi.png".to_string(),
            sport: EntityId::generate(),
            kind: TeamKind::League {
                city: "Mumbai".to_string(),
                tournament: tournament.clone(),
            },
            inactive: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["type"], "League");
        assert_eq!(json["city"], "Mumbai");
        assert_eq!(json["tournament"], tournament.as_str());
        assert!(json.get("country").is_none());

        let back: Team = serde_json::from_value(json).unwrap();
        assert_eq!(back, team);
    }
}

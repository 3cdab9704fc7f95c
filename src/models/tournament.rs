use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::team::TeamType;
use super::{EntityId, optional_text, required_id, required_text};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentType {
    International,
    League,
}

impl TournamentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentType::International => "International",
            TournamentType::League => "League",
        }
    }

    /// The team type allowed to take part in this kind of tournament
    pub fn team_type(&self) -> TeamType {
        match self {
            TournamentType::International => TeamType::National,
            TournamentType::League => TeamType::League,
        }
    }
}

impl FromStr for TournamentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "international" => Ok(TournamentType::International),
            "league" => Ok(TournamentType::League),
            other => Err(AppError::validation(format!(
                "type must be International or League, got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub sport: EntityId,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Raw tournament form fields as submitted
#[derive(Debug, Clone, Default)]
pub struct TournamentDraft {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
}

/// Tournament fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTournament {
    pub name: String,
    pub sport: EntityId,
    pub kind: TournamentType,
    pub priority: Option<i64>,
}

impl TournamentDraft {
    pub fn validate(&self) -> Result<ValidTournament, AppError> {
        let name = required_text(&self.name, "name")?;
        let sport = required_id(&self.sport, "sport")?;
        let kind = required_text(&self.kind, "type")?.parse::<TournamentType>()?;
        let priority = optional_text(&self.priority)
            .map(|p| {
                p.parse::<i64>().map_err(|_| {
                    AppError::validation(format!("priority must be a number, got '{p}'"))
                })
            })
            .transpose()?;

        Ok(ValidTournament {
            name,
            sport,
            kind,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TournamentDraft {
        TournamentDraft {
            name: Some("Premier League".to_string()),
            sport: Some(EntityId::generate().to_string()),
            kind: Some("league".to_string()),
            priority: None,
        }
    }

    #[test]
    fn test_type_parses_case_insensitively() {
        assert_eq!(
            "INTERNATIONAL".parse::<TournamentType>().unwrap(),
            TournamentType::International
        );
        assert_eq!(
            " League ".parse::<TournamentType>().unwrap(),
            TournamentType::League
        );
        assert!("Cup".parse::<TournamentType>().is_err());
    }

    #[test]
    fn test_type_pairs_with_team_type() {
        assert_eq!(
            TournamentType::International.team_type(),
            TeamType::National
        );
        assert_eq!(TournamentType::League.team_type(), TeamType::League);
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        let valid = draft().validate().unwrap();
        assert_eq!(valid.name, "Premier League");
        assert_eq!(valid.kind, TournamentType::League);
        assert_eq!(valid.priority, None);
    }

    #[test]
    fn test_validate_parses_priority() {
        let mut d = draft();
        d.priority = Some("3".to_string());
        assert_eq!(d.validate().unwrap().priority, Some(3));

        d.priority = Some("first".to_string());
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_requires_type() {
        let mut d = draft();
        d.kind = None;
        let err = d.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: type is required");
    }

    #[test]
    fn test_serialized_type_field() {
        let now = Utc::now();
        let tournament = Tournament {
            id: EntityId::generate(),
            name: "World Cup".to_string(),
            sport: EntityId::generate(),
            kind: TournamentType::International,
            image_url: "https://media.test/tournaments/wc.png".to_string(),
            priority: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&tournament).unwrap();
        assert_eq!(json["type"], "International");
        assert!(json.get("priority").is_none());
    }
}

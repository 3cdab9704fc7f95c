use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, required_text};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Sport {
    /// Sport names are unique ignoring case and surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Raw sport form fields as submitted
#[derive(Debug, Clone, Default)]
pub struct SportDraft {
    pub name: Option<String>,
}

impl SportDraft {
    pub fn validate(&self) -> Result<String, AppError> {
        required_text(&self.name, "name")
    }
}

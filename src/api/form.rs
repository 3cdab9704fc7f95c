//! Multipart form reading.
//!
//! Text parts are collected by name; a part named `image` with a non-empty
//! body is spooled to a temporary file. League standings arrive as indexed
//! fields (`teams[0][team]`, `teams[0][position]`, ...).

use axum::extract::{FromRequest, Multipart, Request};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::response::ApiError;
use crate::error::AppError;
use crate::media::ImageUpload;
use crate::models::{
    LeagueDraft, SportDraft, StandingDraft, TeamDraft, TournamentDraft, parse_flag,
};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::multipart(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::multipart(e.body_text()))?;
                // Browsers send an empty part when no file was picked
                if !bytes.is_empty() {
                    debug!("Received image {} ({} bytes)", file_name, bytes.len());
                    form.image = Some(ImageUpload::from_bytes(file_name, &bytes)?);
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::multipart(e.body_text()))?;
            form.fields.insert(name, value);
        }

        Ok(form)
    }

    #[cfg(test)]
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FormData {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            image: None,
        }
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }

    pub fn sport_draft(&self) -> SportDraft {
        SportDraft {
            name: self.text("name"),
        }
    }

    pub fn tournament_draft(&self) -> TournamentDraft {
        TournamentDraft {
            name: self.text("name"),
            sport: self.text("sport"),
            kind: self.text("type"),
            priority: self.text("priority"),
        }
    }

    pub fn team_draft(&self) -> TeamDraft {
        TeamDraft {
            name: self.text("name"),
            sport: self.text("sport"),
            kind: self.text("type"),
            country: self.text("country"),
            city: self.text("city"),
            tournament: self.text("tournament"),
            inactive: self.text("inactive"),
        }
    }

    pub fn league_draft(&self) -> Result<LeagueDraft, AppError> {
        Ok(LeagueDraft {
            name: self.text("name"),
            year: self.text("year"),
            sport: self.text("sport"),
            tournament: self.text("tournament"),
            joint_winner: parse_flag(&self.text("jointWinner"), "jointWinner")?,
            teams: self.standings()?,
        })
    }

    /// Standing entries ordered by their numeric index. Gaps in the indexes
    /// are allowed; the entries keep their relative order.
    pub fn standings(&self) -> Result<Vec<StandingDraft>, AppError> {
        let mut entries: BTreeMap<usize, StandingDraft> = BTreeMap::new();

        for (key, value) in &self.fields {
            let Some((idx, attr)) = parse_team_key(key)? else {
                continue;
            };
            let entry = entries.entry(idx).or_default();
            match attr {
                "team" => entry.team = Some(value.clone()),
                "position" => entry.position = Some(value.clone()),
                // Older forms also sent display-only attributes
                _ => {}
            }
        }

        Ok(entries.into_values().collect())
    }
}

/// Splits `teams[3][position]` into `(3, "position")`. Keys outside the
/// `teams[` namespace yield `None`.
fn parse_team_key(key: &str) -> Result<Option<(usize, &str)>, AppError> {
    let Some(rest) = key.strip_prefix("teams[") else {
        return Ok(None);
    };

    let malformed = || AppError::validation(format!("malformed team field '{key}'"));
    let (idx, rest) = rest.split_once(']').ok_or_else(malformed)?;
    let idx = idx.parse::<usize>().map_err(|_| malformed())?;
    let attr = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or_else(malformed)?;

    Ok(Some((idx, attr)))
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::multipart(e.body_text()))?;
        Ok(FormData::read(multipart).await?)
    }
}

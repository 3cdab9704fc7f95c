use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::{MediaFolder, MediaUploader};
use crate::config::MediaConfig;
use crate::error::AppError;

/// Creates the HTTP client used for media uploads, with pooled connections
/// and a per-request timeout.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
}

/// Unsigned uploads to a Cloudinary-style endpoint
#[derive(Debug, Clone)]
pub struct HttpMediaUploader {
    client: Client,
    upload_url: String,
    upload_preset: Option<String>,
    api_key: Option<String>,
}

impl HttpMediaUploader {
    pub fn new(client: Client, media: &MediaConfig) -> Self {
        HttpMediaUploader {
            client,
            upload_url: media.upload_url.clone(),
            upload_preset: media.upload_preset.clone(),
            api_key: media.api_key.clone(),
        }
    }

    pub fn from_config(media: &MediaConfig, timeout_seconds: u64) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Ok(Self::new(client, media))
    }
}

#[async_trait]
impl MediaUploader for HttpMediaUploader {
    #[instrument(skip(self), fields(url = %self.upload_url))]
    async fn upload(&self, file_path: &Path, folder: MediaFolder) -> Result<String, AppError> {
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        debug!(
            "Uploading {} bytes as {} to folder {}",
            bytes.len(),
            file_name,
            folder
        );

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("folder", folder.as_str());
        if let Some(preset) = &self.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }
        if let Some(key) = &self.api_key {
            form = form.text("api_key", key.clone());
        }

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Media upload request failed: {}", e);
                AppError::ApiFetch(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(256).collect();
            error!("Media host replied HTTP {}: {}", status.as_u16(), preview);
            return Err(AppError::upstream(format!(
                "media host replied HTTP {}",
                status.as_u16()
            )));
        }

        let reply: UploadReply = response.json().await.map_err(|e| {
            error!("Unreadable media host reply: {}", e);
            AppError::upstream("unreadable reply from media host")
        })?;

        match reply.secure_url {
            Some(url) if !url.trim().is_empty() => {
                info!("Uploaded image to {}", url);
                Ok(url)
            }
            _ => {
                error!("Media host reply has no secure_url");
                Err(AppError::upstream("media host reply has no secure_url"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageUpload;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn uploader(server: &MockServer, preset: Option<&str>) -> HttpMediaUploader {
        let media = MediaConfig {
            upload_url: format!("{}/v1_1/demo/image/upload", server.uri()),
            upload_preset: preset.map(str::to_string),
            api_key: None,
        };
        HttpMediaUploader::from_config(&media, 5).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .and(body_string_contains("sports_admin_unsigned"))
            .and(body_string_contains("tournaments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.media.test/demo/tournaments/ipl.png",
                "public_id": "tournaments/ipl"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = ImageUpload::from_bytes("ipl.png", b"png-bytes").unwrap();
        let url = uploader(&server, Some("sports_admin_unsigned"))
            .upload(image.path(), MediaFolder::Tournaments)
            .await
            .unwrap();
        assert_eq!(url, "https://res.media.test/demo/tournaments/ipl.png");
    }

    #[tokio::test]
    async fn test_server_error_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let image = ImageUpload::from_bytes("x.png", b"x").unwrap();
        let err = uploader(&server, None)
            .upload(image.path(), MediaFolder::Sports)
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_reply_without_secure_url_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"public_id": "x"})),
            )
            .mount(&server)
            .await;

        let image = ImageUpload::from_bytes("x.png", b"x").unwrap();
        let err = uploader(&server, None)
            .upload(image.path(), MediaFolder::Teams)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}

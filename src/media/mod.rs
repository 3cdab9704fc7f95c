//! Media host adapter: turns an uploaded image into a persistent URL.

mod http;

pub use http::{HttpMediaUploader, create_http_client_with_timeout};

use async_trait::async_trait;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::AppError;

/// Destination folder on the media host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFolder {
    Sports,
    Teams,
    Tournaments,
    Leagues,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Sports => "sports",
            MediaFolder::Teams => "teams",
            MediaFolder::Tournaments => "tournaments",
            MediaFolder::Leagues => "leagues",
        }
    }
}

impl fmt::Display for MediaFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Uploads the file at `file_path` into `folder` and returns its public URL.
    async fn upload(&self, file_path: &Path, folder: MediaFolder) -> Result<String, AppError>;
}

/// An image received in a form, spooled to a temporary file.
/// The file is removed when the value is dropped.
#[derive(Debug)]
pub struct ImageUpload {
    file: NamedTempFile,
    file_name: String,
}

impl ImageUpload {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Result<Self, AppError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(ImageUpload {
            file,
            file_name: file_name.into(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

//! Upload preparation.
//!
//! Reads the media and thumbnail from disk, fully into memory, and builds
//! the [`UploadVideo`] that [`VidChainClient::upload_video`] sends in a
//! single call. No chunking and no resumption.
//!
//! [`VidChainClient::upload_video`]: crate::client::VidChainClient::upload_video

use std::path::{Path, PathBuf};

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::debug;

use vidchain_shared::constants::{SHORT_FORM_MAX_BYTES, VIDEO_MIME_PREFIX};
use vidchain_shared::{Category, MediaPayload, UploadVideo};

use crate::error::UploadError;

/// Metadata and file locations for a video that has not been read yet.
#[derive(Debug, Clone)]
pub struct UploadDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub channel: String,
    pub duration_secs: u64,
    pub media_path: PathBuf,
    pub thumbnail_path: Option<PathBuf>,
    /// Explicit short-form flag. When `None`, media under 50 MiB counts as short.
    pub is_short: Option<bool>,
}

impl UploadDraft {
    /// Read both files concurrently and assemble the upload.
    pub async fn prepare(self) -> Result<UploadVideo, UploadError> {
        let content_type = mime_guess::from_path(&self.media_path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        if !content_type.starts_with(VIDEO_MIME_PREFIX) {
            return Err(UploadError::NotVideo {
                path: self.media_path.display().to_string(),
                content_type,
            });
        }

        let (content, thumbnail) = tokio::try_join!(
            read_all(&self.media_path),
            read_thumbnail(self.thumbnail_path.as_deref()),
        )?;

        if content.is_empty() {
            return Err(UploadError::EmptyMedia(self.media_path.display().to_string()));
        }

        let is_short = self
            .is_short
            .unwrap_or((content.len() as u64) < SHORT_FORM_MAX_BYTES);
        let content_hash = content_digest(&content);

        debug!(
            path = %self.media_path.display(),
            size = content.len(),
            thumbnail_size = thumbnail.len(),
            %content_type,
            is_short,
            hash = %content_hash,
            "Upload prepared"
        );

        Ok(UploadVideo {
            title: self.title,
            description: self.description,
            category: self.category,
            channel: self.channel,
            duration_secs: self.duration_secs,
            media: MediaPayload {
                content,
                thumbnail,
                is_short,
                content_type,
            },
            content_hash,
        })
    }
}

/// Lowercase hex SHA-256 of the media bytes.
pub fn content_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

async fn read_all(path: &Path) -> Result<Bytes, UploadError> {
    tokio::fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })
}

async fn read_thumbnail(path: Option<&Path>) -> Result<Bytes, UploadError> {
    match path {
        Some(path) => read_all(path).await,
        None => Ok(Bytes::new()),
    }
}

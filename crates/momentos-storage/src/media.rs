//! Upload validation and placement for avatars, thumbnails, and videos.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{Datelike, Utc};
use tracing::warn;
use uuid::Uuid;

use momentos_core::config::MediaConfig;
use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_core::traits::storage::StorageProvider;

/// The kinds of file users can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Profile picture.
    Avatar,
    /// Moment cover image.
    Thumbnail,
    /// Moment video.
    Video,
}

impl MediaKind {
    /// Form field name carrying this kind of file.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Thumbnail => "thumbnail",
            Self::Video => "video",
        }
    }

    fn directory(&self) -> &'static str {
        match self {
            Self::Avatar => "avatars",
            Self::Thumbnail => "thumbnails",
            Self::Video => "videos",
        }
    }
}

/// Validates uploads and stores them through a [`StorageProvider`].
///
/// Stored paths are relative (`videos/2026/10/<uuid>.mp4`); [`MediaStore::url_for`]
/// turns them into public URLs.
#[derive(Debug, Clone)]
pub struct MediaStore {
    provider: Arc<dyn StorageProvider>,
    config: MediaConfig,
}

impl MediaStore {
    /// Create a media store over `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>, config: MediaConfig) -> Self {
        Self { provider, config }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    fn max_bytes(&self, kind: MediaKind) -> u64 {
        match kind {
            MediaKind::Avatar => self.config.avatar_max_bytes,
            MediaKind::Thumbnail => self.config.thumbnail_max_bytes,
            MediaKind::Video => self.config.video_max_bytes,
        }
    }

    fn allowed_extensions(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Avatar | MediaKind::Thumbnail => &self.config.image_extensions,
            MediaKind::Video => &self.config.video_extensions,
        }
    }

    /// Check size and extension, returning the normalized extension.
    pub fn validate(&self, kind: MediaKind, filename: &str, size: u64) -> AppResult<String> {
        let field = kind.field();
        if size == 0 {
            return Err(AppError::field(field, "The submitted file is empty"));
        }

        let max = self.max_bytes(kind);
        if size > max {
            return Err(AppError::field(
                field,
                format!("File too large: maximum size is {} MB", max / (1024 * 1024)),
            )
            .with_kind(ErrorKind::PayloadTooLarge));
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let allowed = self.allowed_extensions(kind);
        if extension.is_empty() || !allowed.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
            return Err(AppError::field(
                field,
                format!("Unsupported file type; allowed: {}", allowed.join(", ")),
            ));
        }

        Ok(extension)
    }

    /// Relative path for a new file of `kind` with `extension`.
    pub fn path_for(&self, kind: MediaKind, extension: &str) -> String {
        let name = format!("{}.{extension}", Uuid::new_v4());
        match kind {
            MediaKind::Avatar => format!("{}/{name}", kind.directory()),
            MediaKind::Thumbnail | MediaKind::Video => {
                let now = Utc::now();
                format!(
                    "{}/{:04}/{:02}/{name}",
                    kind.directory(),
                    now.year(),
                    now.month()
                )
            }
        }
    }

    /// Validate and store an upload, returning its relative path.
    pub async fn save(&self, kind: MediaKind, filename: &str, data: Bytes) -> AppResult<String> {
        let extension = self.validate(kind, filename, data.len() as u64)?;
        let path = self.path_for(kind, &extension);
        self.provider.write(&path, data).await?;
        Ok(path)
    }

    /// Delete a stored file, logging instead of failing.
    pub async fn remove(&self, path: &str) {
        if let Err(e) = self.provider.delete(path).await {
            warn!(path, error = %e, "Failed to delete media file");
        }
    }

    /// Public URL for a stored relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.url_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

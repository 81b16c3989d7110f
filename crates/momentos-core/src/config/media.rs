//! Media upload configuration.

use serde::{Deserialize, Serialize};

const MB: u64 = 1024 * 1024;

/// Where uploaded media lives and how large it may be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_root")]
    pub root: String,
    /// URL prefix under which `root` is served.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Maximum avatar size in bytes.
    #[serde(default = "default_avatar_max")]
    pub avatar_max_bytes: u64,
    /// Maximum thumbnail size in bytes.
    #[serde(default = "default_thumbnail_max")]
    pub thumbnail_max_bytes: u64,
    /// Maximum video size in bytes.
    #[serde(default = "default_video_max")]
    pub video_max_bytes: u64,
    /// Accepted image extensions (avatars and thumbnails).
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    /// Accepted video extensions.
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
}

impl MediaConfig {
    /// Request body ceiling: the largest single upload plus room for the other form fields.
    pub fn body_limit_bytes(&self) -> usize {
        let largest = self
            .video_max_bytes
            .max(self.avatar_max_bytes)
            .max(self.thumbnail_max_bytes);
        (largest + self.thumbnail_max_bytes + MB) as usize
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            url_prefix: default_url_prefix(),
            avatar_max_bytes: default_avatar_max(),
            thumbnail_max_bytes: default_thumbnail_max(),
            video_max_bytes: default_video_max(),
            image_extensions: default_image_extensions(),
            video_extensions: default_video_extensions(),
        }
    }
}

fn default_root() -> String {
    "./media".to_string()
}

fn default_url_prefix() -> String {
    "/media".to_string()
}

fn default_avatar_max() -> u64 {
    25 * MB
}

fn default_thumbnail_max() -> u64 {
    5 * MB
}

fn default_video_max() -> u64 {
    100 * MB
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_video_extensions() -> Vec<String> {
    ["mp4", "webm", "mov", "m4v", "ogg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

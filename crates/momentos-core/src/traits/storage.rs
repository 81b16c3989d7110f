//! Storage provider trait for uploaded media.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for media storage backends.
///
/// Paths are relative to the provider root and use `/` separators. The
/// local filesystem implementation lives in `momentos-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to a file at the given path, creating parent directories.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read a whole file into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete a file at the given path. Missing files are not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}

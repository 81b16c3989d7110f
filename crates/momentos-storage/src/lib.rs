//! # momentos-storage
//!
//! Media storage for Momentos: a local filesystem provider and the
//! [`MediaStore`] that validates uploads and decides where they live.

pub mod media;
pub mod providers;

pub use media::{MediaKind, MediaStore};
pub use providers::LocalStorageProvider;

//! Core traits defined in `momentos-core` and implemented by other crates.

pub mod mailer;
pub mod storage;

pub use mailer::{EmailMessage, Mailer};
pub use storage::StorageProvider;

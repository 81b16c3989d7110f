//! Notification listing and the best-effort event notifier.

pub mod messages;
pub mod notifier;
pub mod service;

pub use notifier::Notifier;
pub use service::{NotificationFeed, NotificationService};

//! Notification domain entities.

pub mod kind;
pub mod model;

pub use kind::{NotificationKind, NotificationType};
pub use model::{NewNotification, Notification, NotificationRow};

//! # momentos-service
//!
//! Business logic service layer for Momentos. Each service orchestrates
//! repositories, media storage, and authentication primitives to implement
//! one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod comment;
pub mod context;
pub mod mail;
pub mod moment;
pub mod notification;
pub mod upload;

pub use account::{AccountService, PasswordResetService};
pub use comment::CommentService;
pub use context::RequestContext;
pub use mail::SmtpMailer;
pub use moment::{EngagementService, MomentService};
pub use notification::{NotificationFeed, NotificationService, Notifier};
pub use upload::FileUpload;

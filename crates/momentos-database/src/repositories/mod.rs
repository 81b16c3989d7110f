//! Repository implementations for all Momentos tables.

pub mod comment;
pub mod like;
pub mod moment;
pub mod notification;
pub mod session;
pub mod tag;
pub mod user;

pub use comment::CommentRepository;
pub use like::LikeRepository;
pub use moment::MomentRepository;
pub use notification::NotificationRepository;
pub use session::SessionRepository;
pub use tag::TagRepository;
pub use user::UserRepository;

//! Comments on moments.

pub mod service;

pub use service::CommentService;

//! Comment entities.

pub mod model;

pub use model::{Comment, CommentWithAuthor, MAX_COMMENT_LENGTH};

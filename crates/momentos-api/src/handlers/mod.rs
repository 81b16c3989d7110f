//! Route handlers organized by domain.

pub mod auth;
pub mod comment;
pub mod health;
pub mod moment;
pub mod notification;

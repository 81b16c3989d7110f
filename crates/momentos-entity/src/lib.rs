//! # momentos-entity
//!
//! Domain entity models for Momentos. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.
//!
//! Rules that need no I/O live next to the data they govern: tag name
//! normalization, moment visibility, the view milestone, and the
//! password-reset code state machine.

pub mod comment;
pub mod moment;
pub mod notification;
pub mod session;
pub mod tag;
pub mod user;

//! # momentos-database
//!
//! PostgreSQL connection management, the migration runner, and one
//! repository per table. Repositories hold a cloned `PgPool` and map every
//! `sqlx::Error` into `AppError`, translating unique-constraint violations
//! into conflict errors with domain messages.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

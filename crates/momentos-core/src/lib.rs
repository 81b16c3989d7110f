//! # momentos-core
//!
//! Core crate for Momentos. Contains configuration schemas, pagination
//! types, the storage and mail delivery traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Momentos crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

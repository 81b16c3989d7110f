//! # momentos-auth
//!
//! Authentication primitives for Momentos.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `token`: random session/CSRF tokens, token hashing, reset codes
//! - `csrf`: double-submit CSRF checking
//! - `session`: cookie session lifecycle (login, resolve, logout)

pub mod csrf;
pub mod password;
pub mod session;
pub mod token;

pub use csrf::CsrfGuard;
pub use password::{PasswordHasher, PasswordPolicy};
pub use session::{LoginResult, SessionManager, SessionStore};

//! Accounts, profiles, and password reset.

pub mod reset;
pub mod service;

pub use reset::PasswordResetService;
pub use service::{AccountService, ProfileChanges, Registration};

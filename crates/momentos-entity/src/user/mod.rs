//! User domain entities.

pub mod model;
pub mod reset;

pub use model::{CreateUser, UpdateProfile, User, UserSummary, UserWithStats};
pub use reset::{ResetCodeState, ResetOutcome, ResetPolicy};

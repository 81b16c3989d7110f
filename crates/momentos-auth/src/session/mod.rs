//! Cookie session lifecycle: login, resolution, and logout.

pub mod manager;
pub mod store;

pub use manager::{LoginResult, SessionManager};
pub use store::SessionStore;

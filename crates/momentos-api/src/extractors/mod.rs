//! Custom Axum extractors.

pub mod auth;
pub mod form;
pub mod json;
pub mod pagination;
pub mod path;

pub use auth::{AuthUser, MaybeAuthUser};
pub use form::FormData;
pub use json::JsonBody;
pub use pagination::PaginationParams;
pub use path::parse_uuid;

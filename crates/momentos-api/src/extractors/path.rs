//! Typed path parameter helpers.

use uuid::Uuid;

use momentos_core::error::AppError;

/// Parses a resource id from a path segment.
///
/// A malformed id cannot name an existing resource, so it is reported as
/// not found rather than as a validation failure.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found("Not found"))
}

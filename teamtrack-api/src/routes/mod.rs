/// API route handlers
///
/// One module per entity. Every write handler follows the same pipeline:
/// parse/shape-check the input, run the declarative validation over the
/// built entity, run the referential existence checks in their fixed order,
/// and only then touch storage.

pub mod projects;
pub mod tasks;
pub mod users;

use crate::error::ApiError;

/// Parses a path identifier, mapping failure to the entity's fixed
/// "Invalid … ID" message
pub(crate) fn parse_id(raw: &str, label: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid {label} ID")))
}

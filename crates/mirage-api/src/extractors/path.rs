//! Typed path parameter helpers.

use mirage_core::error::AppError;
use mirage_core::types::id::PostId;

/// Parses a post ID from a path segment.
pub fn parse_post_id(s: &str) -> Result<PostId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid post id: {s}")))
}

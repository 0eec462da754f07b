//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};

use mirage_core::types::id::UserId;

/// Context for the current authenticated request.
///
/// Built by the session extractor and passed into service methods that
/// act on behalf of an account.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// The authenticated account.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}

//! Opaque position tokens for newest-first post listings.
//!
//! Listings are ordered by `(created_at DESC, id DESC)`. A cursor names the
//! last row a client has seen; the next page holds rows strictly after it in
//! that order.
//!
//! The wire form is base64url (unpadded) JSON: `{"v":1,"t":<rfc3339>,"id":<uuid>}`.
//! A bare RFC 3339 timestamp is also accepted and resumes strictly before
//! that instant, without a tie-break. A space in place of the offset's `+`
//! is read as `+`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::id::PostId;

/// Token format version written by [`FeedCursor::encode`].
const CURSOR_VERSION: u8 = 1;

/// A decoded position in a post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    /// Creation time of the last seen post.
    pub created_at: DateTime<Utc>,
    /// Identifier of the last seen post. `None` for bare-timestamp cursors.
    pub id: Option<PostId>,
}

#[derive(Serialize, Deserialize)]
struct CursorToken {
    v: u8,
    t: DateTime<Utc>,
    id: PostId,
}

impl FeedCursor {
    /// Position just after the given post.
    pub fn after(created_at: DateTime<Utc>, id: PostId) -> Self {
        Self {
            created_at,
            id: Some(id),
        }
    }

    /// Encode as an opaque token. Bare-timestamp cursors are re-encoded as
    /// timestamps so they keep their meaning.
    pub fn encode(&self) -> String {
        match self.id {
            Some(id) => {
                let token = CursorToken {
                    v: CURSOR_VERSION,
                    t: self.created_at,
                    id,
                };
                // Serializing a struct of a u8, a timestamp, and a uuid is infallible.
                let json = serde_json::to_vec(&token).unwrap_or_default();
                URL_SAFE_NO_PAD.encode(json)
            }
            None => self.created_at.to_rfc3339(),
        }
    }

    /// Decode a client-supplied token.
    pub fn decode(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::validation("Cursor must not be empty"));
        }

        // An unencoded `+` in a query string arrives as a space.
        let parsed = DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw.replace(' ', "+")));
        if let Ok(ts) = parsed {
            return Ok(Self {
                created_at: ts.with_timezone(&Utc),
                id: None,
            });
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|_| AppError::validation("Malformed cursor"))?;
        let token: CursorToken =
            serde_json::from_slice(&bytes).map_err(|_| AppError::validation("Malformed cursor"))?;
        if token.v != CURSOR_VERSION {
            return Err(AppError::validation(format!(
                "Unsupported cursor version {}",
                token.v
            )));
        }
        Ok(Self::after(token.t, token.id))
    }

    /// Whether a row at `(created_at, id)` lies strictly after this cursor
    /// in newest-first order.
    pub fn admits(&self, created_at: DateTime<Utc>, id: PostId) -> bool {
        match self.id {
            Some(cursor_id) => (created_at, id) < (self.created_at, cursor_id),
            None => created_at < self.created_at,
        }
    }
}

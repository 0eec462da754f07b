//! Default avatars.

use sha2::{Digest, Sha256};

/// Gravatar identicon URL for an email address.
///
/// The address is trimmed and lower-cased before hashing, so the same
/// mailbox always yields the same avatar.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("https://gravatar.com/avatar/{digest:x}?d=identicon")
}

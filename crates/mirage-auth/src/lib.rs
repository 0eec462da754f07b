//! # mirage-auth
//!
//! Credential handling for Mirage.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `session`: signed session tokens carried in the session cookie
//! - `avatar`: deterministic default avatar URLs

pub mod avatar;
pub mod password;
pub mod session;

pub use password::PasswordHasher;
pub use session::{SessionClaims, SessionSigner, SessionToken};

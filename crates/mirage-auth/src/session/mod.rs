//! Session tokens.

pub mod token;

pub use token::{SessionClaims, SessionSigner, SessionToken};

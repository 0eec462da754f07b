//! # mirage-core
//!
//! Core crate for Mirage. Contains the configuration schema, typed
//! identifiers, the feed cursor, the storage provider trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Mirage crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

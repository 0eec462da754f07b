//! # mirage-storage
//!
//! Object storage for avatars and post media. Supports the local filesystem
//! (served back by the HTTP layer) and S3-compatible buckets.

pub mod manager;
pub mod media;
pub mod providers;

pub use manager::connect;

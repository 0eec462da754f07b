//! Core type definitions used across the Mirage workspace.

pub mod cursor;
pub mod id;
pub mod page;

pub use cursor::FeedCursor;
pub use id::*;
pub use page::{Page, PageRequest, Positioned};

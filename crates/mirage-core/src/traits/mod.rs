//! Core traits defined in `mirage-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;

//! # mirage-database
//!
//! PostgreSQL connection management, the store-error boundary, and the user
//! and post repositories. An in-memory implementation of the same
//! repository traits backs development setups and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod repositories;

pub use connection::DatabasePool;
pub use error::StoreError;
pub use repositories::{PostRepository, Repositories, UserRepository};

//! Accounts and profiles.

pub mod input;
pub mod service;

pub use input::{EditAccountInput, LoginInput, RegisterInput};
pub use service::UserService;

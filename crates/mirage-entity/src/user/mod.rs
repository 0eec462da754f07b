//! User domain entities.

pub mod model;
pub mod profile;

pub use model::{CreateUser, UpdateUser, UpdatedUser, User};
pub use profile::Profile;

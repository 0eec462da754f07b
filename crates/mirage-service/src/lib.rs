//! # mirage-service
//!
//! Business logic for Mirage. Services validate input, coordinate the
//! repositories with the object store, and return domain models; the HTTP
//! layer only translates.

pub mod context;
pub mod hashtag;
pub mod post;
pub mod upload;
pub mod user;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use post::PostService;
pub use upload::Upload;
pub use user::UserService;

//! Custom Axum extractors.

pub mod auth;
pub mod form;
pub mod json;
pub mod path;
pub mod query;

pub use auth::{AuthUser, MaybeUser};
pub use form::FormData;
pub use json::JsonBody;
pub use query::QueryParams;

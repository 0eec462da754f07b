//! # mirage-api
//!
//! HTTP API layer for Mirage built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, timeouts,
//! CORS), session-cookie extractors, DTOs, and the error envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

//! # mirage-entity
//!
//! Domain entity models for Mirage. Table-backed entities derive
//! `sqlx::FromRow`; read models (`Profile`, `PostView`) are assembled by the
//! repositories relative to a viewing account.

pub mod post;
pub mod user;

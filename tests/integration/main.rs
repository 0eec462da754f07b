//! Router-level integration tests against in-memory repositories and a
//! temporary local object store.

mod helpers;

mod accounts;
mod feed;
mod posts;
mod profiles;

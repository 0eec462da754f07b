//! Posts, reactions, and the newest-first listings.

pub mod input;
pub mod service;

pub use input::CreatePostInput;
pub use service::PostService;

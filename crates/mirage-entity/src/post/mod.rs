//! Post domain entities.

pub mod file;
pub mod model;
pub mod view;

pub use file::{Attachment, NewAttachment};
pub use model::{NewPost, Post};
pub use view::PostView;

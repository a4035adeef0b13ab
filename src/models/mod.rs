pub mod content_type;
pub mod pagination;
pub mod post;

pub use content_type::ContentType;
pub use pagination::Pagination;
pub use post::{Content, NewPost, Post};

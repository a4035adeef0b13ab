pub mod post;

pub use post::{PostController, PostPage};

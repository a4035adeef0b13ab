//! Persistence for posts.
//!
//! Adapters are thin: no validation or business rules live here, only
//! storage access. Every method can fail with a [`StorageError`].

use crate::error::StorageError;
use crate::models::{NewPost, Post};

pub mod memory;
pub mod mysql;

pub use memory::MemoryPostRepository;
pub use mysql::MySqlPostRepository;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[rocket::async_trait]
pub trait PostRepository: Send + Sync {
    /// Stores a fully built record and returns it as persisted.
    async fn insert(&self, post: Post) -> StorageResult<Post>;

    /// Page of posts, newest first.
    async fn find_page(&self, skip: u64, limit: u64) -> StorageResult<Vec<Post>>;

    async fn count(&self) -> StorageResult<u64>;

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Post>>;

    /// Applies the changes and returns the updated record, or `None` when no
    /// post has this id.
    async fn update_by_id(&self, id: &str, changes: NewPost) -> StorageResult<Option<Post>>;

    /// Sets `deleted_at` if unset and returns the record, or `None` when no
    /// post has this id.
    async fn soft_delete_by_id(&self, id: &str) -> StorageResult<Option<Post>>;
}

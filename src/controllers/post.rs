//! Orchestration of post requests: validate, then hit the repository, then
//! turn whatever happened into a [`PostError`] or a value.

use crate::error::{PostError, Result};
use crate::models::{NewPost, Pagination, Post};
use crate::repository::PostRepository;
use crate::validation::{validate, Validated};
use serde_json::Value;
use tracing::{error, info, warn};

/// One page of a listing together with the overall record count.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub pagination: Pagination,
}

pub struct PostController {
    repo: Box<dyn PostRepository>,
}

impl PostController {
    pub fn new(repo: impl PostRepository + 'static) -> Self {
        PostController {
            repo: Box::new(repo),
        }
    }

    pub async fn create(&self, payload: &Value) -> Result<Post> {
        let new_post = validated("create", payload)?;
        let post = Post::create(new_post);
        let post = self
            .repo
            .insert(post)
            .await
            .map_err(|e| storage_failure("create", e))?;
        info!(id = %post.id, "post created");
        Ok(post)
    }

    pub async fn list(&self, pagination: Pagination) -> Result<PostPage> {
        let posts = self
            .repo
            .find_page(pagination.offset(), pagination.limit)
            .await
            .map_err(|e| storage_failure("list", e))?;
        let total = self
            .repo
            .count()
            .await
            .map_err(|e| storage_failure("list", e))?;

        Ok(PostPage {
            posts,
            total,
            pagination,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Post> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure("get", e))?
            .ok_or_else(|| not_found("get", id))
    }

    pub async fn update(&self, id: &str, payload: &Value) -> Result<Post> {
        let changes = validated("update", payload)?;
        let post = self
            .repo
            .update_by_id(id, changes)
            .await
            .map_err(|e| storage_failure("update", e))?
            .ok_or_else(|| not_found("update", id))?;
        info!(id = %post.id, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: &str) -> Result<Post> {
        let post = self
            .repo
            .soft_delete_by_id(id)
            .await
            .map_err(|e| storage_failure("delete", e))?
            .ok_or_else(|| not_found("delete", id))?;
        info!(id = %post.id, "post soft-deleted");
        Ok(post)
    }
}

fn validated(operation: &str, payload: &Value) -> Result<NewPost> {
    match validate(payload) {
        Validated::Valid(new_post) => Ok(new_post),
        Validated::Invalid(errors) => {
            warn!(operation, errors = %errors, "post payload rejected");
            Err(PostError::Validation(errors))
        }
    }
}

fn not_found(operation: &str, id: &str) -> PostError {
    warn!(operation, id, "post not found");
    PostError::NotFound(id.to_string())
}

fn storage_failure(operation: &str, err: crate::error::StorageError) -> PostError {
    error!(operation, error = %err, "storage failure");
    PostError::Storage(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::repository::{MemoryPostRepository, StorageResult};
    use serde_json::json;

    /// Repository whose every call fails, for the storage error path.
    struct BrokenRepository;

    fn broken() -> StorageError {
        StorageError::CorruptRow {
            id: "n/a".to_string(),
            reason: "storage offline".to_string(),
        }
    }

    #[rocket::async_trait]
    impl PostRepository for BrokenRepository {
        async fn insert(&self, _: Post) -> StorageResult<Post> {
            Err(broken())
        }
        async fn find_page(&self, _: u64, _: u64) -> StorageResult<Vec<Post>> {
            Err(broken())
        }
        async fn count(&self) -> StorageResult<u64> {
            Err(broken())
        }
        async fn find_by_id(&self, _: &str) -> StorageResult<Option<Post>> {
            Err(broken())
        }
        async fn update_by_id(&self, _: &str, _: NewPost) -> StorageResult<Option<Post>> {
            Err(broken())
        }
        async fn soft_delete_by_id(&self, _: &str) -> StorageResult<Option<Post>> {
            Err(broken())
        }
    }

    fn payload() -> Value {
        json!({
            "email": "user@example.com",
            "password": "password123",
            "content": { "type": "text", "data": "hello" }
        })
    }

    #[rocket::async_test]
    async fn storage_faults_become_storage_errors() {
        let controller = PostController::new(BrokenRepository);
        assert!(matches!(
            controller.create(&payload()).await,
            Err(PostError::Storage(_))
        ));
        assert!(matches!(
            controller.list(Pagination::default()).await,
            Err(PostError::Storage(_))
        ));
        assert!(matches!(
            controller.delete("anything").await,
            Err(PostError::Storage(_))
        ));
    }

    #[rocket::async_test]
    async fn validation_runs_before_storage() {
        let controller = PostController::new(BrokenRepository);
        let result = controller.update("anything", &json!({})).await;
        match result {
            Err(PostError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[rocket::async_test]
    async fn update_of_unknown_id_is_not_found() {
        let controller = PostController::new(MemoryPostRepository::new());
        let result = controller.update("missing", &payload()).await;
        assert!(matches!(result, Err(PostError::NotFound(id)) if id == "missing"));
    }
}

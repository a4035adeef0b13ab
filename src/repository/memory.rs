use super::{PostRepository, StorageResult};
use crate::models::post::now;
use crate::models::{NewPost, Post};
use tokio::sync::RwLock;

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: Post) -> StorageResult<Post> {
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> StorageResult<Vec<Post>> {
        let posts = self.posts.read().await;
        // Reverse first so the stable sort keeps later inserts ahead on ties.
        let mut newest_first: Vec<&Post> = posts.iter().rev().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest_first
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self) -> StorageResult<u64> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Post>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update_by_id(&self, id: &str, changes: NewPost) -> StorageResult<Option<Post>> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.apply(changes, now());
            post.clone()
        }))
    }

    async fn soft_delete_by_id(&self, id: &str) -> StorageResult<Option<Post>> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.soft_delete(now());
            post.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Content, ContentType};

    fn new_post(data: &str) -> NewPost {
        NewPost {
            user_id: None,
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
            content: Content {
                content_type: ContentType::Text,
                data: data.to_string(),
            },
        }
    }

    #[rocket::async_test]
    async fn pages_newest_first_even_on_equal_timestamps() {
        let repo = MemoryPostRepository::new();
        let stamp = now();
        for i in 0..4 {
            let mut post = Post::create(new_post(&format!("post {i}")));
            post.created_at = stamp;
            repo.insert(post).await.unwrap();
        }

        let page = repo.find_page(1, 2).await.unwrap();
        let data: Vec<&str> = page.iter().map(|p| p.content.data.as_str()).collect();
        assert_eq!(data, vec!["post 2", "post 1"]);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[rocket::async_test]
    async fn update_and_delete_report_missing_ids() {
        let repo = MemoryPostRepository::new();
        assert!(repo
            .update_by_id("missing", new_post("x"))
            .await
            .unwrap()
            .is_none());
        assert!(repo.soft_delete_by_id("missing").await.unwrap().is_none());
    }

    #[rocket::async_test]
    async fn soft_deleted_posts_stay_visible() {
        let repo = MemoryPostRepository::new();
        let post = repo.insert(Post::create(new_post("kept"))).await.unwrap();

        let deleted = repo.soft_delete_by_id(&post.id).await.unwrap().unwrap();
        assert!(deleted.is_deleted());

        let found = repo.find_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(found.deleted_at, deleted.deleted_at);
        assert_eq!(repo.find_page(0, 10).await.unwrap().len(), 1);
    }
}

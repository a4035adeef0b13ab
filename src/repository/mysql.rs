use super::{PostRepository, StorageResult};
use crate::error::StorageError;
use crate::models::post::now;
use crate::models::{Content, ContentType, NewPost, Post};
use chrono::{NaiveDateTime, TimeZone, Utc};
use mysql_async::{params, prelude::*, Pool};

const CREATE_POSTS_TABLE: &str = r"CREATE TABLE IF NOT EXISTS posts (
    seq BIGINT NOT NULL AUTO_INCREMENT,
    id CHAR(36) NOT NULL,
    user_id VARCHAR(255) NULL,
    email VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL,
    content_type VARCHAR(16) NOT NULL,
    content_data TEXT NOT NULL,
    created_at DATETIME(6) NOT NULL,
    updated_at DATETIME(6) NOT NULL,
    deleted_at DATETIME(6) NULL,
    PRIMARY KEY (id),
    UNIQUE KEY posts_seq (seq),
    KEY posts_created_at (created_at)
)";

const SELECT_COLUMNS: &str = "SELECT id, user_id, email, password, content_type, content_data, \
     created_at, updated_at, deleted_at FROM posts";

type PostRow = (
    String,                // id
    Option<String>,        // user_id
    String,                // email
    String,                // password
    String,                // content_type
    String,                // content_data
    NaiveDateTime,         // created_at
    NaiveDateTime,         // updated_at
    Option<NaiveDateTime>, // deleted_at
);

fn post_from_row(row: PostRow) -> StorageResult<Post> {
    let (id, user_id, email, password, content_type, data, created, updated, deleted) = row;
    let content_type =
        ContentType::try_from(content_type.as_str()).map_err(|reason| StorageError::CorruptRow {
            id: id.clone(),
            reason: format!("{reason}: {content_type}"),
        })?;

    Ok(Post {
        id,
        user_id,
        email,
        password,
        content: Content { content_type, data },
        created_at: Utc.from_utc_datetime(&created),
        updated_at: Utc.from_utc_datetime(&updated),
        deleted_at: deleted.map(|naive| Utc.from_utc_datetime(&naive)),
    })
}

/// Creates the `posts` table when it does not exist yet.
pub async fn ensure_schema(pool: &Pool) -> StorageResult<()> {
    let mut conn = pool.get_conn().await?;
    conn.query_drop(CREATE_POSTS_TABLE).await?;
    Ok(())
}

/// MySQL adapter. Holds a handle on the shared connection pool.
#[derive(Clone)]
pub struct MySqlPostRepository {
    pool: Pool,
}

impl MySqlPostRepository {
    pub fn new(pool: Pool) -> Self {
        MySqlPostRepository { pool }
    }
}

#[rocket::async_trait]
impl PostRepository for MySqlPostRepository {
    async fn insert(&self, post: Post) -> StorageResult<Post> {
        let mut conn = self.pool.get_conn().await?;
        conn.exec_drop(
            r"INSERT INTO posts (id, user_id, email, password, content_type, content_data, created_at, updated_at, deleted_at)
              VALUES (:id, :user_id, :email, :password, :content_type, :content_data, :created_at, :updated_at, NULL)",
            params! {
                "id" => post.id.as_str(),
                "user_id" => post.user_id.clone(),
                "email" => post.email.as_str(),
                "password" => post.password.as_str(),
                "content_type" => post.content.content_type.as_str(),
                "content_data" => post.content.data.as_str(),
                "created_at" => post.created_at.naive_utc(),
                "updated_at" => post.updated_at.naive_utc(),
            },
        )
        .await?;

        Ok(post)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> StorageResult<Vec<Post>> {
        let mut conn = self.pool.get_conn().await?;
        let query = format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, seq DESC LIMIT :limit OFFSET :skip"
        );
        let rows: Vec<PostRow> = conn
            .exec(query, params! { "limit" => limit, "skip" => skip })
            .await?;

        rows.into_iter().map(post_from_row).collect()
    }

    async fn count(&self) -> StorageResult<u64> {
        let mut conn = self.pool.get_conn().await?;
        let total: Option<u64> = conn.query_first("SELECT COUNT(*) FROM posts").await?;
        Ok(total.unwrap_or(0))
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Post>> {
        let mut conn = self.pool.get_conn().await?;
        let row: Option<PostRow> = conn
            .exec_first(
                format!("{SELECT_COLUMNS} WHERE id = :id LIMIT 1"),
                params! { "id" => id },
            )
            .await?;

        row.map(post_from_row).transpose()
    }

    async fn update_by_id(&self, id: &str, changes: NewPost) -> StorageResult<Option<Post>> {
        {
            let mut conn = self.pool.get_conn().await?;
            conn.exec_drop(
                r"UPDATE posts
                  SET user_id = COALESCE(:user_id, user_id),
                      email = :email,
                      password = :password,
                      content_type = :content_type,
                      content_data = :content_data,
                      updated_at = :updated_at
                  WHERE id = :id",
                params! {
                    "user_id" => changes.user_id,
                    "email" => changes.email,
                    "password" => changes.password,
                    "content_type" => changes.content.content_type.as_str(),
                    "content_data" => changes.content.data,
                    "updated_at" => now().naive_utc(),
                    "id" => id,
                },
            )
            .await?;
        }

        // Re-select: affected rows is zero both for a missing id and for an
        // unchanged row, so only the lookup tells them apart.
        self.find_by_id(id).await
    }

    async fn soft_delete_by_id(&self, id: &str) -> StorageResult<Option<Post>> {
        {
            let mut conn = self.pool.get_conn().await?;
            // MySQL applies SET clauses left to right, so updated_at must
            // read deleted_at before it is filled in.
            conn.exec_drop(
                r"UPDATE posts
                  SET updated_at = IF(deleted_at IS NULL, :now, updated_at),
                      deleted_at = COALESCE(deleted_at, :now)
                  WHERE id = :id",
                params! {
                    "now" => now().naive_utc(),
                    "id" => id,
                },
            )
            .await?;
        }

        self.find_by_id(id).await
    }
}

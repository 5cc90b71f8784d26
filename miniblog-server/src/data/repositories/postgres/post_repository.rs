use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::reaction::{PostWithReactions, ReactionSummary};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    author: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostReactionsRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    author: String,
    created_at: DateTime<Utc>,
    likes: i64,
    dislikes: i64,
    user_liked: bool,
    user_disliked: bool,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (title, content, author_id)
                VALUES ($1, $2, $3)
                RETURNING id, title, content, author_id, created_at
            )
            SELECT i.id, i.title, i.content, i.author_id, u.username AS author, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, u.username AS author, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        // Reaction rows go with the post via ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts_with_reactions(
        &self,
        viewer: Option<i64>,
    ) -> Result<Vec<PostWithReactions>, DomainError> {
        // user_id = NULL never matches, so an anonymous viewer gets false
        // for both EXISTS probes.
        let rows = sqlx::query_as::<_, PostReactionsRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.author_id,
                u.username AS author,
                p.created_at,
                (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes,
                (SELECT COUNT(*) FROM dislikes d WHERE d.post_id = p.id) AS dislikes,
                EXISTS(
                    SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1
                ) AS user_liked,
                EXISTS(
                    SELECT 1 FROM dislikes d WHERE d.post_id = p.id AND d.user_id = $1
                ) AS user_disliked
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(viewer)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter()
            .map(|row| {
                let summary = ReactionSummary {
                    likes: row.likes,
                    dislikes: row.dislikes,
                    user_liked: row.user_liked,
                    user_disliked: row.user_disliked,
                };
                let post = Post::new(
                    row.id,
                    row.title,
                    row.content,
                    row.author_id,
                    row.author,
                    row.created_at,
                )
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;
                Ok(PostWithReactions { post, summary })
            })
            .collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.author_id,
        row.author,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

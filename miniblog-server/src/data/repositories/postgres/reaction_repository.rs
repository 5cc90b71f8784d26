use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::reaction_repository::ReactionRepository;
use crate::domain::error::DomainError;
use crate::domain::reaction::{ReactionKind, ReactionSummary};

#[derive(Debug, Clone)]
pub(crate) struct PostgresReactionRepository {
    pool: PgPool,
}

impl PostgresReactionRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    likes: i64,
    dislikes: i64,
    user_liked: bool,
    user_disliked: bool,
}

fn table_name(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "likes",
        ReactionKind::Dislike => "dislikes",
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn toggle(
        &self,
        kind: ReactionKind,
        post_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError> {
        let table = table_name(kind);

        let deleted = sqlx::query(&format!(
            "DELETE FROM {table} WHERE post_id = $1 AND user_id = $2"
        ))
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_reaction_db_error)?;

        if deleted.rows_affected() > 0 {
            return Ok(false);
        }

        // A concurrent identical toggle may have inserted first; the unique
        // constraint plus DO NOTHING turns that into a no-op and the
        // reaction stays active either way.
        sqlx::query(&format!(
            "INSERT INTO {table} (post_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (post_id, user_id) DO NOTHING"
        ))
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_reaction_db_error)?;

        Ok(true)
    }

    async fn summary(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<ReactionSummary, DomainError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM likes WHERE post_id = $1) AS likes,
                (SELECT COUNT(*) FROM dislikes WHERE post_id = $1) AS dislikes,
                EXISTS(
                    SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2
                ) AS user_liked,
                EXISTS(
                    SELECT 1 FROM dislikes WHERE post_id = $1 AND user_id = $2
                ) AS user_disliked
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_reaction_db_error)?;

        Ok(ReactionSummary {
            likes: row.likes,
            dislikes: row.dislikes,
            user_liked: row.user_liked,
            user_disliked: row.user_disliked,
        })
    }
}

fn map_reaction_db_error(err: sqlx::Error) -> DomainError {
    // FK violation means the post vanished between the existence check and
    // the insert.
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("post".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

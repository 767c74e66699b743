//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fanverse_core::entities::{ItemType, Like};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{LikeRepository, RepoResult};
use fanverse_core::value_objects::Snowflake;

use crate::models::{LikeCountModel, LikeModel};

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    /// Single statement upsert keyed on `(user_id, item_id, item_type)`; a
    /// repeated call keeps the original row id and creation time
    #[instrument(skip(self, like), fields(user_id = %like.user_id, item_id = %like.item_id))]
    async fn upsert(&self, like: &Like) -> RepoResult<Like> {
        let result = sqlx::query_as::<_, LikeModel>(
            r"
            INSERT INTO likes (id, user_id, item_id, item_type, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, item_id, item_type)
            DO UPDATE SET status = EXCLUDED.status, updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, item_id, item_type, status, created_at, updated_at
            ",
        )
        .bind(like.id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.item_id.into_inner())
        .bind(like.item_type.as_str())
        .bind(like.status)
        .bind(like.created_at)
        .bind(like.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate like id {}", like.id)),
                || DomainError::UserNotFound(like.user_id),
            )
        })?;

        Ok(Like::from(result))
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: Snowflake,
        item_id: Snowflake,
        item_type: ItemType,
    ) -> RepoResult<Option<Like>> {
        let result = sqlx::query_as::<_, LikeModel>(
            r"
            SELECT id, user_id, item_id, item_type, status, created_at, updated_at
            FROM likes
            WHERE user_id = $1 AND item_id = $2 AND item_type = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(item_id.into_inner())
        .bind(item_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Like::from))
    }

    #[instrument(skip(self))]
    async fn count_active(&self, item_id: Snowflake, item_type: ItemType) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM likes
            WHERE item_id = $1 AND item_type = $2 AND status
            ",
        )
        .bind(item_id.into_inner())
        .bind(item_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, item_ids), fields(count = item_ids.len()))]
    async fn count_active_for(
        &self,
        item_ids: &[Snowflake],
        item_type: ItemType,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, LikeCountModel>(
            r"
            SELECT item_id, COUNT(*) AS count
            FROM likes
            WHERE item_id = ANY($1) AND item_type = $2 AND status
            GROUP BY item_id
            ",
        )
        .bind(Snowflake::raw_all(item_ids))
        .bind(item_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (Snowflake::new(row.item_id), row.count))
            .collect())
    }
}

//! PostgreSQL implementation of LiveRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use fanverse_core::entities::Live;
use fanverse_core::error::DomainError;
use fanverse_core::traits::{LiveRepository, RepoResult};
use fanverse_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::LiveModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of LiveRepository
#[derive(Clone)]
pub struct PgLiveRepository {
    pool: PgPool,
}

impl PgLiveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LiveRepository for PgLiveRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Live>> {
        let result = sqlx::query_as::<_, LiveModel>(
            r"
            SELECT id, community_id, artist_id, title, thumbnail_image, stream_url,
                   started_at, ended_at
            FROM lives
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Live::from))
    }

    #[instrument(skip(self))]
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Live>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lives WHERE community_id = $1")
                .bind(community_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, LiveModel>(
            r"
            SELECT id, community_id, artist_id, title, thumbnail_image, stream_url,
                   started_at, ended_at
            FROM lives
            WHERE community_id = $1
            ORDER BY (ended_at IS NULL) DESC, started_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(community_id.into_inner())
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Live::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self, live), fields(live_id = %live.id))]
    async fn create(&self, live: &Live) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO lives (id, community_id, artist_id, title, thumbnail_image, stream_url, started_at, ended_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(live.id.into_inner())
        .bind(live.community_id.into_inner())
        .bind(live.artist_id.into_inner())
        .bind(&live.title)
        .bind(&live.thumbnail_image)
        .bind(&live.stream_url)
        .bind(live.started_at)
        .bind(live.ended_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate live id {}", live.id)),
                || DomainError::ArtistNotFound(live.artist_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn end(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE lives
            SET ended_at = $2
            WHERE id = $1 AND ended_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(ended_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Either missing or already ended
            return match self.find_by_id(id).await? {
                Some(_) => Err(DomainError::LiveAlreadyEnded),
                None => Err(DomainError::LiveNotFound(id)),
            };
        }

        Ok(())
    }
}

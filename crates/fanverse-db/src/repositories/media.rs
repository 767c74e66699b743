//! PostgreSQL implementation of MediaRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use fanverse_core::entities::Media;
use fanverse_core::error::DomainError;
use fanverse_core::traits::{MediaRepository, RepoResult};
use fanverse_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::MediaModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn replace_files(
    conn: &mut PgConnection,
    media_id: i64,
    files: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM media_files WHERE media_id = $1")
        .bind(media_id)
        .execute(&mut *conn)
        .await?;

    for (position, url) in (0_i32..).zip(files) {
        sqlx::query("INSERT INTO media_files (media_id, position, url) VALUES ($1, $2, $3)")
            .bind(media_id)
            .bind(position)
            .bind(url)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Media>> {
        let result = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT m.id, m.community_id, m.author_id, m.title, m.content, m.thumbnail_image,
                   ARRAY(SELECT f.url FROM media_files f
                         WHERE f.media_id = m.id ORDER BY f.position) AS files,
                   m.created_at, m.updated_at
            FROM media m
            WHERE m.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Media::from))
    }

    #[instrument(skip(self))]
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Media>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media WHERE community_id = $1")
                .bind(community_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT m.id, m.community_id, m.author_id, m.title, m.content, m.thumbnail_image,
                   ARRAY(SELECT f.url FROM media_files f
                         WHERE f.media_id = m.id ORDER BY f.position) AS files,
                   m.created_at, m.updated_at
            FROM media m
            WHERE m.community_id = $1
            ORDER BY m.created_at DESC, m.id DESC
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
            rows.into_iter().map(Media::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self, media), fields(media_id = %media.id))]
    async fn create(&self, media: &Media) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO media (id, community_id, author_id, title, content, thumbnail_image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(media.id.into_inner())
        .bind(media.community_id.into_inner())
        .bind(media.author_id.into_inner())
        .bind(&media.title)
        .bind(&media.content)
        .bind(&media.thumbnail_image)
        .bind(media.created_at)
        .bind(media.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate media id {}", media.id)),
                || DomainError::CommunityNotFound(media.community_id),
            )
        })?;

        replace_files(&mut *tx, media.id.into_inner(), &media.files)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, media), fields(media_id = %media.id))]
    async fn update(&self, media: &Media) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE media
            SET title = $2, content = $3, thumbnail_image = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(media.id.into_inner())
        .bind(&media.title)
        .bind(&media.content)
        .bind(&media.thumbnail_image)
        .bind(media.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MediaNotFound(media.id));
        }

        replace_files(&mut *tx, media.id.into_inner(), &media.files)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM media_files WHERE media_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MediaNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(media_id = %id, "Media deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMediaRepository>();
    }
}

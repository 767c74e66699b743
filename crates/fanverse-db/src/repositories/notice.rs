//! PostgreSQL implementation of NoticeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use fanverse_core::entities::Notice;
use fanverse_core::error::DomainError;
use fanverse_core::traits::{NoticeRepository, RepoResult};
use fanverse_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::NoticeModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of NoticeRepository
#[derive(Clone)]
pub struct PgNoticeRepository {
    pool: PgPool,
}

impl PgNoticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn replace_images(
    conn: &mut PgConnection,
    notice_id: i64,
    images: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notice_images WHERE notice_id = $1")
        .bind(notice_id)
        .execute(&mut *conn)
        .await?;

    for (position, url) in (0_i32..).zip(images) {
        sqlx::query("INSERT INTO notice_images (notice_id, position, url) VALUES ($1, $2, $3)")
            .bind(notice_id)
            .bind(position)
            .bind(url)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl NoticeRepository for PgNoticeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notice>> {
        let result = sqlx::query_as::<_, NoticeModel>(
            r"
            SELECT n.id, n.community_id, n.author_id, n.title, n.content,
                   ARRAY(SELECT i.url FROM notice_images i
                         WHERE i.notice_id = n.id ORDER BY i.position) AS images,
                   n.created_at, n.updated_at
            FROM notices n
            WHERE n.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notice::from))
    }

    #[instrument(skip(self))]
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notice>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notices WHERE community_id = $1")
                .bind(community_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, NoticeModel>(
            r"
            SELECT n.id, n.community_id, n.author_id, n.title, n.content,
                   ARRAY(SELECT i.url FROM notice_images i
                         WHERE i.notice_id = n.id ORDER BY i.position) AS images,
                   n.created_at, n.updated_at
            FROM notices n
            WHERE n.community_id = $1
            ORDER BY n.created_at DESC, n.id DESC
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
            rows.into_iter().map(Notice::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self, notice), fields(notice_id = %notice.id))]
    async fn create(&self, notice: &Notice) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO notices (id, community_id, author_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(notice.id.into_inner())
        .bind(notice.community_id.into_inner())
        .bind(notice.author_id.into_inner())
        .bind(&notice.title)
        .bind(&notice.content)
        .bind(notice.created_at)
        .bind(notice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate notice id {}", notice.id)),
                || DomainError::CommunityNotFound(notice.community_id),
            )
        })?;

        replace_images(&mut *tx, notice.id.into_inner(), &notice.images)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, notice), fields(notice_id = %notice.id))]
    async fn update(&self, notice: &Notice) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE notices
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(notice.id.into_inner())
        .bind(&notice.title)
        .bind(&notice.content)
        .bind(notice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NoticeNotFound(notice.id));
        }

        replace_images(&mut *tx, notice.id.into_inner(), &notice.images)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM notice_images WHERE notice_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NoticeNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(notice_id = %id, "Notice deleted");

        Ok(())
    }
}

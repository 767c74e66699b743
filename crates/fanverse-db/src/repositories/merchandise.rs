//! PostgreSQL implementation of MerchandiseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use fanverse_core::entities::{MerchandiseImage, MerchandiseOption, MerchandisePost};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{MerchandiseRepository, RepoResult};
use fanverse_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::{MerchandiseImageModel, MerchandiseOptionModel, MerchandisePostModel};

use super::cleanup;
use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of MerchandiseRepository
#[derive(Clone)]
pub struct PgMerchandiseRepository {
    pool: PgPool,
}

impl PgMerchandiseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MerchandiseRepository for PgMerchandiseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<MerchandisePost>> {
        let result = sqlx::query_as::<_, MerchandisePostModel>(
            r"
            SELECT id, product_id, community_id, title, content, price, delivery_price,
                   created_at, updated_at
            FROM merchandise_posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MerchandisePost::from))
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<MerchandisePost>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM merchandise_posts WHERE community_id = $1",
        )
        .bind(community_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, MerchandisePostModel>(
            r"
            SELECT id, product_id, community_id, title, content, price, delivery_price,
                   created_at, updated_at
            FROM merchandise_posts
            WHERE community_id = $1
            ORDER BY created_at DESC, id DESC
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
            rows.into_iter().map(MerchandisePost::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self))]
    async fn find_options(
        &self,
        merchandise_post_id: Snowflake,
    ) -> RepoResult<Vec<MerchandiseOption>> {
        let result = sqlx::query_as::<_, MerchandiseOptionModel>(
            r"
            SELECT id, merchandise_post_id, name, price, stock
            FROM merchandise_options
            WHERE merchandise_post_id = $1
            ORDER BY id
            ",
        )
        .bind(merchandise_post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(MerchandiseOption::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_images(
        &self,
        merchandise_post_id: Snowflake,
    ) -> RepoResult<Vec<MerchandiseImage>> {
        let result = sqlx::query_as::<_, MerchandiseImageModel>(
            r"
            SELECT id, merchandise_post_id, url, position
            FROM merchandise_images
            WHERE merchandise_post_id = $1
            ORDER BY position
            ",
        )
        .bind(merchandise_post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(MerchandiseImage::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_option(&self, option_id: Snowflake) -> RepoResult<Option<MerchandiseOption>> {
        let result = sqlx::query_as::<_, MerchandiseOptionModel>(
            r"
            SELECT id, merchandise_post_id, name, price, stock
            FROM merchandise_options
            WHERE id = $1
            ",
        )
        .bind(option_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MerchandiseOption::from))
    }

    #[instrument(
        skip(self, post, options, images),
        fields(merchandise_id = %post.id, options = options.len(), images = images.len())
    )]
    async fn create(
        &self,
        post: &MerchandisePost,
        options: &[MerchandiseOption],
        images: &[MerchandiseImage],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO merchandise_posts (id, product_id, community_id, title, content, price,
                                           delivery_price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.product_id.into_inner())
        .bind(post.community_id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.price)
        .bind(post.delivery_price)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate merchandise id {}", post.id)),
                || DomainError::ProductNotFound(post.product_id),
            )
        })?;

        for option in options {
            sqlx::query(
                r"
                INSERT INTO merchandise_options (id, merchandise_post_id, name, price, stock)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(option.id.into_inner())
            .bind(option.merchandise_post_id.into_inner())
            .bind(&option.name)
            .bind(option.price)
            .bind(option.stock)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        for image in images {
            sqlx::query(
                r"
                INSERT INTO merchandise_images (id, merchandise_post_id, url, position)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(image.id.into_inner())
            .bind(image.merchandise_post_id.into_inner())
            .bind(&image.url)
            .bind(image.position)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(merchandise_id = %post.id))]
    async fn update(&self, post: &MerchandisePost) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE merchandise_posts
            SET title = $2, content = $3, price = $4, delivery_price = $5, updated_at = $6
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.price)
        .bind(post.delivery_price)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MerchandiseNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = cleanup::delete_merchandise(&mut *tx, id.into_inner())
            .await
            .map_err(map_db_error)?;

        if deleted == 0 {
            return Err(DomainError::MerchandiseNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(merchandise_id = %id, "Merchandise deleted with options, images and cart items");

        Ok(())
    }
}

//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use fanverse_core::entities::{Post, PostImage};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{PostQuery, PostRepository, RepoResult};
use fanverse_core::value_objects::{Page, Snowflake};

use crate::models::{PostImageModel, PostModel};

use super::cleanup;
use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_images(conn: &mut PgConnection, images: &[PostImage]) -> Result<(), sqlx::Error> {
    for image in images {
        sqlx::query(
            r"
            INSERT INTO post_images (id, post_id, url, position)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(image.id.into_inner())
        .bind(image.post_id.into_inner())
        .bind(&image.url)
        .bind(image.position)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, community_id, community_user_id, artist_id, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, query: PostQuery) -> RepoResult<Page<Post>> {
        let community_id = query.community_id.into_inner();
        let artist_id = query.artist_id.map(Snowflake::into_inner);

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM posts
            WHERE community_id = $1 AND ($2::BIGINT IS NULL OR artist_id = $2)
            ",
        )
        .bind(community_id)
        .bind(artist_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, community_id, community_user_id, artist_id, content, created_at, updated_at
            FROM posts
            WHERE community_id = $1 AND ($2::BIGINT IS NULL OR artist_id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(community_id)
        .bind(artist_id)
        .bind(query.page.limit_i64())
        .bind(query.page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Post::from).collect(),
            total,
            query.page,
        ))
    }

    #[instrument(skip(self))]
    async fn find_images(&self, post_id: Snowflake) -> RepoResult<Vec<PostImage>> {
        let result = sqlx::query_as::<_, PostImageModel>(
            r"
            SELECT id, post_id, url, position
            FROM post_images
            WHERE post_id = $1
            ORDER BY position
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(PostImage::from).collect())
    }

    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn find_images_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostImage>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = sqlx::query_as::<_, PostImageModel>(
            r"
            SELECT id, post_id, url, position
            FROM post_images
            WHERE post_id = ANY($1)
            ORDER BY post_id, position
            ",
        )
        .bind(Snowflake::raw_all(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(PostImage::from).collect())
    }

    #[instrument(skip(self, post, images), fields(post_id = %post.id, images = images.len()))]
    async fn create(&self, post: &Post, images: &[PostImage]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO posts (id, community_id, community_user_id, artist_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.community_id.into_inner())
        .bind(post.community_user_id.into_inner())
        .bind(post.artist_id.map(Snowflake::into_inner))
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate post id {}", post.id)),
                || DomainError::CommunityUserNotFound(post.community_user_id),
            )
        })?;

        insert_images(&mut *tx, images).await.map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post, images), fields(post_id = %post.id))]
    async fn update(&self, post: &Post, images: Option<&[PostImage]>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE posts
            SET content = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        if let Some(images) = images {
            sqlx::query("DELETE FROM post_images WHERE post_id = $1")
                .bind(post.id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            insert_images(&mut *tx, images).await.map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = cleanup::delete_post(&mut *tx, id.into_inner())
            .await
            .map_err(map_db_error)?;

        if deleted == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(post_id = %id, "Post deleted with images, comments and likes");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }
}

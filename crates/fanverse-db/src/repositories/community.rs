//! PostgreSQL implementations of CommunityRepository and
//! CommunityUserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use fanverse_core::entities::{Community, CommunityUser};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{CommunityRepository, CommunityUserRepository, RepoResult};
use fanverse_core::value_objects::Snowflake;

use crate::models::{CommunityModel, CommunityUserModel};

use super::cleanup;
use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of CommunityRepository
#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>> {
        let result = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT id, name, membership_price, logo_image, cover_image, created_at, updated_at
            FROM communities
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Community::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Community>> {
        let result = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT id, name, membership_price, logo_image, cover_image, created_at, updated_at
            FROM communities
            ORDER BY name, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Community::from).collect())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Community>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT id, name, membership_price, logo_image, cover_image, created_at, updated_at
            FROM communities
            WHERE id = ANY($1)
            ORDER BY name, id
            ",
        )
        .bind(Snowflake::raw_all(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Community::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, community: &Community) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO communities (id, name, membership_price, logo_image, cover_image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(community.membership_price)
        .bind(&community.logo_image)
        .bind(&community.cover_image)
        .bind(community.created_at)
        .bind(community.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, community: &Community) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET name = $2, membership_price = $3, logo_image = $4, cover_image = $5,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(community.membership_price)
        .bind(&community.logo_image)
        .bind(&community.cover_image)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommunityNotFound(community.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = cleanup::delete_community(&mut *tx, id.into_inner())
            .await
            .map_err(map_db_error)?;

        if deleted == 0 {
            return Err(DomainError::CommunityNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(community_id = %id, "Community deleted with dependents");

        Ok(())
    }
}

/// PostgreSQL implementation of CommunityUserRepository
#[derive(Clone)]
pub struct PgCommunityUserRepository {
    pool: PgPool,
}

impl PgCommunityUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityUserRepository for PgCommunityUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CommunityUser>> {
        let result = sqlx::query_as::<_, CommunityUserModel>(
            r"
            SELECT id, user_id, community_id, nickname, created_at, updated_at
            FROM community_users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommunityUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<CommunityUser>> {
        let result = sqlx::query_as::<_, CommunityUserModel>(
            r"
            SELECT id, user_id, community_id, nickname, created_at, updated_at
            FROM community_users
            WHERE user_id = $1 AND community_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommunityUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<CommunityUser>> {
        let result = sqlx::query_as::<_, CommunityUserModel>(
            r"
            SELECT id, user_id, community_id, nickname, created_at, updated_at
            FROM community_users
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(CommunityUser::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, community_user: &CommunityUser) -> RepoResult<()> {
        let community_id = community_user.community_id;
        sqlx::query(
            r"
            INSERT INTO community_users (id, user_id, community_id, nickname, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(community_user.id.into_inner())
        .bind(community_user.user_id.into_inner())
        .bind(community_id.into_inner())
        .bind(&community_user.nickname)
        .bind(community_user.created_at)
        .bind(community_user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::AlreadyMember,
                || DomainError::CommunityNotFound(community_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = cleanup::delete_community_user(&mut *tx, id.into_inner())
            .await
            .map_err(map_db_error)?;

        if deleted == 0 {
            return Err(DomainError::CommunityUserNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

//! PostgreSQL implementation of StaffRepository
//!
//! Artists and managers live in two tables of identical shape; the grant
//! kind selects the table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use fanverse_core::entities::{StaffGrant, StaffKind};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{RepoResult, StaffRepository};
use fanverse_core::value_objects::Snowflake;

use crate::models::StaffModel;

use super::cleanup;
use super::error::{map_constraint_violation, map_db_error};

fn table(kind: StaffKind) -> &'static str {
    match kind {
        StaffKind::Artist => "artists",
        StaffKind::Manager => "managers",
    }
}

fn not_found(kind: StaffKind, id: Snowflake) -> DomainError {
    match kind {
        StaffKind::Artist => DomainError::ArtistNotFound(id),
        StaffKind::Manager => DomainError::ManagerNotFound(id),
    }
}

fn duplicate(kind: StaffKind) -> DomainError {
    match kind {
        StaffKind::Artist => DomainError::AlreadyArtist,
        StaffKind::Manager => DomainError::AlreadyManager,
    }
}

/// PostgreSQL implementation of StaffRepository
#[derive(Clone)]
pub struct PgStaffRepository {
    pool: PgPool,
}

impl PgStaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for PgStaffRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, kind: StaffKind, id: Snowflake) -> RepoResult<Option<StaffGrant>> {
        let sql = format!(
            "SELECT id, '{}' AS kind, community_user_id, community_id, created_at FROM {} WHERE id = $1",
            kind.as_str(),
            table(kind)
        );
        let result = sqlx::query_as::<_, StaffModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(StaffGrant::from))
    }

    #[instrument(skip(self))]
    async fn find_for_member(
        &self,
        community_user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Vec<StaffGrant>> {
        let result = sqlx::query_as::<_, StaffModel>(
            r"
            SELECT id, 'ARTIST' AS kind, community_user_id, community_id, created_at
            FROM artists
            WHERE community_user_id = $1 AND community_id = $2
            UNION ALL
            SELECT id, 'MANAGER' AS kind, community_user_id, community_id, created_at
            FROM managers
            WHERE community_user_id = $1 AND community_id = $2
            ",
        )
        .bind(community_user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(StaffGrant::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<StaffGrant>> {
        let result = sqlx::query_as::<_, StaffModel>(
            r"
            SELECT id, 'ARTIST' AS kind, community_user_id, community_id, created_at
            FROM artists
            WHERE community_id = $1
            UNION ALL
            SELECT id, 'MANAGER' AS kind, community_user_id, community_id, created_at
            FROM managers
            WHERE community_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(StaffGrant::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, grant: &StaffGrant) -> RepoResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, community_user_id, community_id, created_at) VALUES ($1, $2, $3, $4)",
            table(grant.kind)
        );
        sqlx::query(&sql)
            .bind(grant.id.into_inner())
            .bind(grant.community_user_id.into_inner())
            .bind(grant.community_id.into_inner())
            .bind(grant.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    || duplicate(grant.kind),
                    || DomainError::CommunityUserNotFound(grant.community_user_id),
                )
            })?;

        info!(kind = grant.kind.as_str(), grant_id = %grant.id, "Staff role granted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: StaffKind, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = match kind {
            StaffKind::Artist => cleanup::delete_artist(&mut *tx, id.into_inner())
                .await
                .map_err(map_db_error)?,
            StaffKind::Manager => sqlx::query("DELETE FROM managers WHERE id = $1")
                .bind(id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?
                .rows_affected(),
        };

        if deleted == 0 {
            return Err(not_found(kind, id));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(kind = kind.as_str(), grant_id = %id, "Staff role revoked");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgStaffRepository>();
    }

    #[test]
    fn test_kind_selects_table() {
        assert_eq!(table(StaffKind::Artist), "artists");
        assert_eq!(table(StaffKind::Manager), "managers");
        assert!(matches!(
            not_found(StaffKind::Manager, Snowflake::new(1)),
            DomainError::ManagerNotFound(_)
        ));
    }
}

//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use fanverse_core::entities::Membership;
use fanverse_core::error::DomainError;
use fanverse_core::traits::{MembershipRepository, RepoResult};
use fanverse_core::value_objects::Snowflake;

use crate::models::MembershipModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self, membership), fields(membership_id = %membership.id))]
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO memberships (id, community_user_id, community_id, price, status,
                                     merchant_uid, imp_uid, paid_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(membership.id.into_inner())
        .bind(membership.community_user_id.into_inner())
        .bind(membership.community_id.into_inner())
        .bind(membership.price)
        .bind(membership.status.as_str())
        .bind(&membership.merchant_uid)
        .bind(&membership.imp_uid)
        .bind(membership.paid_at)
        .bind(membership.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::DuplicatePayment(membership.merchant_uid.clone()),
                || DomainError::CommunityUserNotFound(membership.community_user_id),
            )
        })?;

        info!(merchant_uid = %membership.merchant_uid, "Membership payment recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_merchant_uid(&self, merchant_uid: &str) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r"
            SELECT id, community_user_id, community_id, price, status, merchant_uid, imp_uid,
                   paid_at, expires_at
            FROM memberships
            WHERE merchant_uid = $1
            ",
        )
        .bind(merchant_uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Membership::from))
    }

    #[instrument(skip(self))]
    async fn find_by_community_user(
        &self,
        community_user_id: Snowflake,
    ) -> RepoResult<Vec<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r"
            SELECT id, community_user_id, community_id, price, status, merchant_uid, imp_uid,
                   paid_at, expires_at
            FROM memberships
            WHERE community_user_id = $1
            ORDER BY paid_at DESC, id DESC
            ",
        )
        .bind(community_user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Membership::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMembershipRepository>();
    }
}

//! Community role resolution
//!
//! Turns an [`AuthContext`] and a community id into a [`CommunityAccess`]
//! value that content services check capabilities against.

use fanverse_core::entities::{Community, StaffKind};
use fanverse_core::{AuthContext, CommunityAccess, CommunityRole, DomainError, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the caller's membership row and staff grants in one community.
    ///
    /// Non-members get an outsider access value; the global admin flag comes
    /// from the auth context and is never re-queried.
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn resolve(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<CommunityAccess> {
        let mut access = CommunityAccess::outsider(community_id, auth.is_admin());

        let Some(community_user) = self
            .ctx
            .community_user_repo()
            .find_by_user_and_community(auth.user_id, community_id)
            .await?
        else {
            debug!("caller is not a community member");
            return Ok(access);
        };

        let grants = self
            .ctx
            .staff_repo()
            .find_for_member(community_user.id, community_id)
            .await?;

        for grant in grants {
            match grant.kind {
                StaffKind::Artist => access.artist_id = Some(grant.id),
                StaffKind::Manager => access.manager_id = Some(grant.id),
            }
        }
        access.community_user = Some(community_user);

        debug!(role = access.role().as_str(), "resolved community role");
        Ok(access)
    }

    /// `None`, `Member`, `Artist`, `Manager` or `Admin`
    pub async fn resolve_role(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<CommunityRole> {
        Ok(self.resolve(auth, community_id).await?.role())
    }

    /// Load a community or fail with `CommunityNotFound`
    pub async fn community(&self, community_id: Snowflake) -> ServiceResult<Community> {
        let community = self
            .ctx
            .community_repo()
            .find_by_id(community_id)
            .await?
            .ok_or(DomainError::CommunityNotFound(community_id))?;
        Ok(community)
    }
}

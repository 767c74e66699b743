//! Artist and manager administration

use fanverse_core::entities::{StaffGrant, StaffKind};
use fanverse_core::{AuthContext, Capabilities, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{Envelope, GrantStaffRequest, StaffResponse};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct StaffService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StaffService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admin only. The target must already be a member of the community.
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id, kind = kind.as_str()))]
    pub async fn grant(
        &self,
        auth: &AuthContext,
        kind: StaffKind,
        request: GrantStaffRequest,
    ) -> ServiceResult<Envelope<StaffResponse>> {
        auth.require_admin()?;
        RoleService::new(self.ctx)
            .community(request.community_id)
            .await?;

        let community_user = self
            .ctx
            .community_user_repo()
            .find_by_user_and_community(request.user_id, request.community_id)
            .await?
            .ok_or(DomainError::CommunityUserNotFound(request.user_id))?;

        let grant = StaffGrant::new(
            self.ctx.generate_id(),
            kind,
            community_user.id,
            request.community_id,
        );
        self.ctx.staff_repo().create(&grant).await?;

        info!(
            grant_id = %grant.id,
            target_user_id = %request.user_id,
            community_id = %request.community_id,
            "Staff role granted"
        );

        let message = match kind {
            StaffKind::Artist => messages::admin::GRANT_ARTIST,
            StaffKind::Manager => messages::admin::GRANT_MANAGER,
        };
        Ok(Envelope::created(message, StaffResponse::from(&grant)))
    }

    /// Admin only
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id, kind = kind.as_str()))]
    pub async fn revoke(
        &self,
        auth: &AuthContext,
        kind: StaffKind,
        id: Snowflake,
    ) -> ServiceResult<Envelope<()>> {
        auth.require_admin()?;

        if self.ctx.staff_repo().find_by_id(kind, id).await?.is_none() {
            let err = match kind {
                StaffKind::Artist => DomainError::ArtistNotFound(id),
                StaffKind::Manager => DomainError::ManagerNotFound(id),
            };
            return Err(err.into());
        }

        self.ctx.staff_repo().delete(kind, id).await?;
        info!(grant_id = %id, "Staff role revoked");

        let message = match kind {
            StaffKind::Artist => messages::admin::REVOKE_ARTIST,
            StaffKind::Manager => messages::admin::REVOKE_MANAGER,
        };
        Ok(Envelope::ok(message, ()))
    }

    /// Manager of the community or admin
    pub async fn find_staff(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<Envelope<Vec<StaffResponse>>> {
        let roles = RoleService::new(self.ctx);
        roles.community(community_id).await?;
        roles
            .resolve(auth, community_id)
            .await?
            .require(Capabilities::MANAGE_CONTENT)?;

        let grants = self.ctx.staff_repo().find_by_community(community_id).await?;
        Ok(Envelope::ok(
            messages::admin::FIND_STAFF,
            grants.iter().map(StaffResponse::from).collect(),
        ))
    }
}

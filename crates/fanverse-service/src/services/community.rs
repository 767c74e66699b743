//! Community service
//!
//! Community CRUD plus join, leave and role lookup.

use fanverse_core::entities::{Community, CommunityUser};
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CommunityResponse, CommunityRoleResponse, CommunityUserResponse, CreateCommunityRequest,
    Envelope, JoinCommunityRequest, UpdateCommunityRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct CommunityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommunityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admin only
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateCommunityRequest,
    ) -> ServiceResult<Envelope<CommunityResponse>> {
        auth.require_admin()?;

        let mut community = Community::new(
            self.ctx.generate_id(),
            request.community_name.trim().to_string(),
            request.membership_price,
        );
        community.logo_image = request.community_logo_image;
        community.cover_image = request.community_cover_image;
        community.check()?;

        self.ctx.community_repo().create(&community).await?;
        info!(community_id = %community.id, "Community created");

        Ok(Envelope::created(
            messages::community::CREATE,
            CommunityResponse::from(&community),
        ))
    }

    pub async fn find_all(&self) -> ServiceResult<Envelope<Vec<CommunityResponse>>> {
        let communities = self.ctx.community_repo().find_all().await?;
        Ok(Envelope::ok(
            messages::community::FIND_ALL,
            communities.iter().map(CommunityResponse::from).collect(),
        ))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<CommunityResponse>> {
        let community = RoleService::new(self.ctx).community(id).await?;
        Ok(Envelope::ok(
            messages::community::FIND_ONE,
            CommunityResponse::from(&community),
        ))
    }

    /// Manager of the community or admin
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: UpdateCommunityRequest,
    ) -> ServiceResult<Envelope<CommunityResponse>> {
        let roles = RoleService::new(self.ctx);
        let mut community = roles.community(id).await?;
        roles
            .resolve(auth, id)
            .await?
            .require(Capabilities::MANAGE_CONTENT)?;

        if let Some(name) = request.community_name {
            community.name = name.trim().to_string();
        }
        if let Some(price) = request.membership_price {
            community.membership_price = price;
        }
        if let Some(logo) = request.community_logo_image {
            community.logo_image = Some(logo);
        }
        if let Some(cover) = request.community_cover_image {
            community.cover_image = Some(cover);
        }
        community.touch();
        community.check()?;

        self.ctx.community_repo().update(&community).await?;
        info!(community_id = %id, "Community updated");

        Ok(Envelope::ok(
            messages::community::UPDATE,
            CommunityResponse::from(&community),
        ))
    }

    /// Admin only; removes every dependent row
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        auth.require_admin()?;
        RoleService::new(self.ctx).community(id).await?;

        self.ctx.community_repo().delete(id).await?;
        info!(community_id = %id, "Community deleted");

        Ok(Envelope::ok(messages::community::REMOVE, ()))
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn join(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: JoinCommunityRequest,
    ) -> ServiceResult<Envelope<CommunityUserResponse>> {
        RoleService::new(self.ctx).community(id).await?;

        let existing = self
            .ctx
            .community_user_repo()
            .find_by_user_and_community(auth.user_id, id)
            .await?;
        if existing.is_some() {
            return Err(DomainError::AlreadyMember.into());
        }

        let community_user =
            CommunityUser::new(self.ctx.generate_id(), auth.user_id, id, request.nick_name);
        community_user.check()?;

        self.ctx.community_user_repo().create(&community_user).await?;
        info!(community_id = %id, community_user_id = %community_user.id, "Joined community");

        Ok(Envelope::created(
            messages::community::JOIN,
            CommunityUserResponse::from(&community_user),
        ))
    }

    /// Remove the caller's membership together with everything they authored
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn leave(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        RoleService::new(self.ctx).community(id).await?;

        let community_user = self
            .ctx
            .community_user_repo()
            .find_by_user_and_community(auth.user_id, id)
            .await?
            .ok_or(DomainError::NotCommunityMember(id))?;

        self.ctx.community_user_repo().delete(community_user.id).await?;
        info!(community_id = %id, "Left community");

        Ok(Envelope::ok(messages::community::LEAVE, ()))
    }

    pub async fn role(
        &self,
        auth: &AuthContext,
        id: Snowflake,
    ) -> ServiceResult<Envelope<CommunityRoleResponse>> {
        let roles = RoleService::new(self.ctx);
        roles.community(id).await?;
        let access = roles.resolve(auth, id).await?;

        Ok(Envelope::ok(
            messages::community::FIND_ROLE,
            CommunityRoleResponse {
                community_id: id,
                role: access.role(),
                capabilities: access.capabilities(),
            },
        ))
    }
}

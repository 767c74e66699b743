//! User service
//!
//! Profile reads and edits for the signed-in user, account deletion, and the
//! list of joined communities.

use std::collections::HashMap;

use fanverse_core::entities::User;
use fanverse_core::{AuthContext, DomainError, EntityRules};
use tracing::{info, instrument};

use crate::dto::{
    CommunityResponse, Envelope, JoinedCommunityResponse, UpdateUserRequest, UserResponse,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn me(&self, auth: &AuthContext) -> ServiceResult<Envelope<UserResponse>> {
        let user = self.load(auth).await?;
        Ok(Envelope::ok(messages::user::FIND_ME, UserResponse::from(&user)))
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        request: UpdateUserRequest,
    ) -> ServiceResult<Envelope<UserResponse>> {
        let mut user = self.load(auth).await?;

        if let Some(name) = request.name {
            user.set_name(name.trim().to_string());
        }
        if let Some(profile_image) = request.profile_image {
            user.set_profile_image(Some(profile_image));
        }
        user.check()?;

        self.ctx.user_repo().update(&user).await?;
        info!("Profile updated");

        Ok(Envelope::ok(messages::user::UPDATE, UserResponse::from(&user)))
    }

    /// Tombstone the account and revoke every refresh session
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn delete(&self, auth: &AuthContext) -> ServiceResult<Envelope<()>> {
        self.ctx.user_repo().soft_delete(auth.user_id).await?;
        let revoked = self.ctx.session_store().revoke_all(auth.user_id).await?;

        info!(revoked, "Account deleted");
        Ok(Envelope::ok(messages::user::DELETE, ()))
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn communities(
        &self,
        auth: &AuthContext,
    ) -> ServiceResult<Envelope<Vec<JoinedCommunityResponse>>> {
        let memberships = self.ctx.community_user_repo().find_by_user(auth.user_id).await?;
        let ids: Vec<_> = memberships.iter().map(|cu| cu.community_id).collect();

        let communities: HashMap<_, _> = self
            .ctx
            .community_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let joined = memberships
            .into_iter()
            .filter_map(|cu| {
                communities.get(&cu.community_id).map(|community| JoinedCommunityResponse {
                    community: CommunityResponse::from(community),
                    community_user_id: cu.id,
                    nick_name: cu.nickname,
                })
            })
            .collect();

        Ok(Envelope::ok(messages::user::FIND_COMMUNITIES, joined))
    }

    async fn load(&self, auth: &AuthContext) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(auth.user_id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(DomainError::UserNotFound(auth.user_id))?;
        Ok(user)
    }
}

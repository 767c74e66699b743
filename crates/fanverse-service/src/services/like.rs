//! Like service
//!
//! A like is a `(user, item, item type)` row with a boolean status. Unliking
//! flips the status instead of deleting, so counts only include active rows.

use fanverse_core::entities::{ItemType, Like};
use fanverse_core::{AuthContext, Capabilities, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{Envelope, LikeResponse, LikeStatusResponse, UpdateLikeRequest};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or overwrite the caller's like on a post or comment
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update_status(
        &self,
        auth: &AuthContext,
        item_type: ItemType,
        item_id: Snowflake,
        request: UpdateLikeRequest,
    ) -> ServiceResult<Envelope<LikeResponse>> {
        let community_id = self.target_community(item_type, item_id).await?;

        RoleService::new(self.ctx)
            .resolve(auth, community_id)
            .await?
            .require(Capabilities::PARTICIPATE)?;

        let like = Like::new(
            self.ctx.generate_id(),
            auth.user_id,
            item_id,
            item_type,
            request.status,
        );
        let stored = self.ctx.like_repo().upsert(&like).await?;

        info!(%item_type, %item_id, status = stored.status, "Like status updated");

        Ok(Envelope::ok(
            messages::like::UPDATE_STATUS,
            LikeResponse::from(stored),
        ))
    }

    pub async fn status(
        &self,
        auth: &AuthContext,
        item_type: ItemType,
        item_id: Snowflake,
    ) -> ServiceResult<Envelope<LikeStatusResponse>> {
        self.target_community(item_type, item_id).await?;

        let like_count = self.ctx.like_repo().count_active(item_id, item_type).await?;
        let liked = self
            .ctx
            .like_repo()
            .find(auth.user_id, item_id, item_type)
            .await?
            .is_some_and(|like| like.status);

        Ok(Envelope::ok(
            messages::like::FIND_STATUS,
            LikeStatusResponse {
                item_id,
                item_type,
                like_count,
                liked,
            },
        ))
    }

    /// Community of the liked item, or `LikeTargetNotFound`
    async fn target_community(
        &self,
        item_type: ItemType,
        item_id: Snowflake,
    ) -> ServiceResult<Snowflake> {
        let community_id = match item_type {
            ItemType::Post => self
                .ctx
                .post_repo()
                .find_by_id(item_id)
                .await?
                .map(|post| post.community_id),
            ItemType::Comment => self
                .ctx
                .comment_repo()
                .find_by_id(item_id)
                .await?
                .map(|comment| comment.community_id),
        };

        Ok(community_id.ok_or(DomainError::LikeTargetNotFound { item_type, item_id })?)
    }
}

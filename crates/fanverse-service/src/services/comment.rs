//! Comment service

use std::collections::HashMap;

use fanverse_core::entities::{Comment, ItemType};
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Page, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CommentListQuery, CommentRequest, CommentResponse, Envelope};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post; the caller must belong to the post's community
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        post_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<Envelope<CommentResponse>> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, post.community_id)
            .await?;
        let member = access.member()?;

        if request.content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }

        let comment = Comment::new(
            self.ctx.generate_id(),
            post.id,
            post.community_id,
            member.id,
            request.content,
        );
        comment.check()?;

        self.ctx.comment_repo().create(&comment).await?;
        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(Envelope::created(
            messages::comment::CREATE,
            CommentResponse::new(comment, 0),
        ))
    }

    /// Newest first
    pub async fn find_all(
        &self,
        query: CommentListQuery,
    ) -> ServiceResult<Envelope<Page<CommentResponse>>> {
        if self.ctx.post_repo().find_by_id(query.post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(query.post_id).into());
        }

        let page = self
            .ctx
            .comment_repo()
            .find_by_post(query.post_id, query.page_request())
            .await?;

        let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
        let likes: HashMap<_, _> = self
            .ctx
            .like_repo()
            .count_active_for(&ids, ItemType::Comment)
            .await?
            .into_iter()
            .collect();

        Ok(Envelope::ok(
            messages::comment::FIND_ALL,
            page.map(|comment| {
                let like_count = likes.get(&comment.id).copied().unwrap_or(0);
                CommentResponse::new(comment, like_count)
            }),
        ))
    }

    /// Author only
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<Envelope<CommentResponse>> {
        let mut comment = self.load(id).await?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, comment.community_id)
            .await?;
        if access.member()?.id != comment.community_user_id {
            warn!(comment_id = %id, "Comment update rejected: not the author");
            return Err(DomainError::NotAuthor.into());
        }

        if request.content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }
        comment.edit(request.content);
        comment.check()?;

        self.ctx.comment_repo().update(&comment).await?;
        info!(comment_id = %id, "Comment updated");

        let like_count = self
            .ctx
            .like_repo()
            .count_active(comment.id, ItemType::Comment)
            .await?;
        Ok(Envelope::ok(
            messages::comment::UPDATE,
            CommentResponse::new(comment, like_count),
        ))
    }

    /// Author, community manager or admin
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        let comment = self.load(id).await?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, comment.community_id)
            .await?;
        if !access.is_self(comment.community_user_id) {
            access.require(Capabilities::MANAGE_CONTENT)?;
        }

        self.ctx.comment_repo().delete(id).await?;
        info!(comment_id = %id, "Comment deleted");

        Ok(Envelope::ok(messages::comment::REMOVE, ()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CommentNotFound(id))?;
        Ok(comment)
    }
}

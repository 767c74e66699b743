//! Notice service
//!
//! Staff announcements. Writes need `MANAGE_CONTENT` in the notice's
//! community; reads are open to any signed-in user.

use fanverse_core::entities::Notice;
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Page, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CommunityQuery, CreateNoticeRequest, Envelope, NoticeResponse, UpdateNoticeRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct NoticeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NoticeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
        request: CreateNoticeRequest,
    ) -> ServiceResult<Envelope<NoticeResponse>> {
        self.require_manager(auth, community_id).await?;

        let notice = Notice::new(
            self.ctx.generate_id(),
            community_id,
            auth.user_id,
            request.title,
            request.content,
            request.notice_images,
        );
        notice.check()?;

        self.ctx.notice_repo().create(&notice).await?;
        info!(notice_id = %notice.id, community_id = %community_id, "Notice created");

        Ok(Envelope::created(messages::notice::CREATE, notice.into()))
    }

    pub async fn find_all(
        &self,
        query: CommunityQuery,
    ) -> ServiceResult<Envelope<Page<NoticeResponse>>> {
        let page = self
            .ctx
            .notice_repo()
            .find_by_community(query.community_id, query.page_request())
            .await?;
        Ok(Envelope::ok(messages::notice::FIND_ALL, page.map(Into::into)))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<NoticeResponse>> {
        let notice = self.load(id).await?;
        Ok(Envelope::ok(messages::notice::FIND_ONE, notice.into()))
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: UpdateNoticeRequest,
    ) -> ServiceResult<Envelope<NoticeResponse>> {
        let mut notice = self.load(id).await?;
        self.require_manager(auth, notice.community_id).await?;

        if let Some(title) = request.title {
            notice.title = title;
        }
        if let Some(content) = request.content {
            notice.content = content;
        }
        if let Some(images) = request.notice_images {
            notice.images = images;
        }
        notice.touch();
        notice.check()?;

        self.ctx.notice_repo().update(&notice).await?;
        info!(notice_id = %id, "Notice updated");

        Ok(Envelope::ok(messages::notice::UPDATE, notice.into()))
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        let notice = self.load(id).await?;
        self.require_manager(auth, notice.community_id).await?;

        self.ctx.notice_repo().delete(id).await?;
        info!(notice_id = %id, "Notice deleted");

        Ok(Envelope::ok(messages::notice::REMOVE, ()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Notice> {
        let notice = self
            .ctx
            .notice_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NoticeNotFound(id))?;
        Ok(notice)
    }

    async fn require_manager(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<()> {
        let roles = RoleService::new(self.ctx);
        roles.community(community_id).await?;
        roles
            .resolve(auth, community_id)
            .await?
            .require(Capabilities::MANAGE_CONTENT)?;
        Ok(())
    }
}

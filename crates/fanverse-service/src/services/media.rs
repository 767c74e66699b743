//! Media gallery service

use fanverse_core::entities::Media;
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Page, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CommunityQuery, CreateMediaRequest, Envelope, MediaResponse, UpdateMediaRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Manager or admin
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
        request: CreateMediaRequest,
    ) -> ServiceResult<Envelope<MediaResponse>> {
        self.require_manager(auth, community_id).await?;

        let mut media = Media::new(
            self.ctx.generate_id(),
            community_id,
            auth.user_id,
            request.title,
            request.content,
            request.media_files,
        );
        media.thumbnail_image = request.thumbnail_image;
        media.check()?;

        self.ctx.media_repo().create(&media).await?;
        info!(media_id = %media.id, community_id = %community_id, "Media created");

        Ok(Envelope::created(messages::media::CREATE, media.into()))
    }

    pub async fn find_all(
        &self,
        query: CommunityQuery,
    ) -> ServiceResult<Envelope<Page<MediaResponse>>> {
        let page = self
            .ctx
            .media_repo()
            .find_by_community(query.community_id, query.page_request())
            .await?;
        Ok(Envelope::ok(messages::media::FIND_ALL, page.map(Into::into)))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<MediaResponse>> {
        let media = self.load(id).await?;
        Ok(Envelope::ok(messages::media::FIND_ONE, media.into()))
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: UpdateMediaRequest,
    ) -> ServiceResult<Envelope<MediaResponse>> {
        let mut media = self.load(id).await?;
        self.require_manager(auth, media.community_id).await?;

        if let Some(title) = request.title {
            media.title = title;
        }
        if let Some(content) = request.content {
            media.content = content;
        }
        if let Some(thumbnail) = request.thumbnail_image {
            media.thumbnail_image = Some(thumbnail);
        }
        if let Some(files) = request.media_files {
            media.files = files;
        }
        media.touch();
        media.check()?;

        self.ctx.media_repo().update(&media).await?;
        info!(media_id = %id, "Media updated");

        Ok(Envelope::ok(messages::media::UPDATE, media.into()))
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        let media = self.load(id).await?;
        self.require_manager(auth, media.community_id).await?;

        self.ctx.media_repo().delete(id).await?;
        info!(media_id = %id, "Media deleted");

        Ok(Envelope::ok(messages::media::REMOVE, ()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Media> {
        let media = self
            .ctx
            .media_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MediaNotFound(id))?;
        Ok(media)
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

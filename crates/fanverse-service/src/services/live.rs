//! Live listing service
//!
//! Artists announce streams hosted elsewhere; the row only records the
//! stream URL and whether it has ended.

use chrono::Utc;
use fanverse_core::entities::Live;
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Page, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CommunityQuery, CreateLiveRequest, Envelope, LiveResponse};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct LiveService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LiveService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Artists of the community only
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateLiveRequest,
    ) -> ServiceResult<Envelope<LiveResponse>> {
        let roles = RoleService::new(self.ctx);
        roles.community(request.community_id).await?;
        let access = roles.resolve(auth, request.community_id).await?;

        let artist_id = match (&access.community_user, access.artist_id) {
            (Some(_), Some(artist_id)) => artist_id,
            _ => {
                warn!(community_id = %request.community_id, "Live rejected: not an artist");
                return Err(DomainError::MissingCapability(Capabilities::ARTIST.label()).into());
            }
        };

        let mut live = Live::new(
            self.ctx.generate_id(),
            request.community_id,
            artist_id,
            request.title,
            request.stream_url,
        );
        live.thumbnail_image = request.thumbnail_image;
        live.check()?;

        self.ctx.live_repo().create(&live).await?;
        info!(live_id = %live.id, artist_id = %artist_id, "Live started");

        Ok(Envelope::created(messages::live::CREATE, live.into()))
    }

    /// Currently-live first, then newest
    pub async fn find_all(
        &self,
        query: CommunityQuery,
    ) -> ServiceResult<Envelope<Page<LiveResponse>>> {
        let page = self
            .ctx
            .live_repo()
            .find_by_community(query.community_id, query.page_request())
            .await?;
        Ok(Envelope::ok(messages::live::FIND_ALL, page.map(Into::into)))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<LiveResponse>> {
        let live = self.load(id).await?;
        Ok(Envelope::ok(messages::live::FIND_ONE, live.into()))
    }

    /// The hosting artist, a manager or an admin
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn end(
        &self,
        auth: &AuthContext,
        id: Snowflake,
    ) -> ServiceResult<Envelope<LiveResponse>> {
        let mut live = self.load(id).await?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, live.community_id)
            .await?;
        let is_host = access.community_user.is_some() && access.artist_id == Some(live.artist_id);
        if !is_host {
            access.require(Capabilities::MANAGE_CONTENT)?;
        }

        if !live.is_live() {
            return Err(DomainError::LiveAlreadyEnded.into());
        }

        let ended_at = Utc::now();
        self.ctx.live_repo().end(id, ended_at).await?;
        live.ended_at = Some(ended_at);

        info!(live_id = %id, "Live ended");
        Ok(Envelope::ok(messages::live::END, live.into()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Live> {
        let live = self
            .ctx
            .live_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LiveNotFound(id))?;
        Ok(live)
    }
}

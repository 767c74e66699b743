//! Merchandise listing service
//!
//! A listing sells one product through one or more priced options, each
//! with its own stock.

use fanverse_core::entities::{
    image_list_errors, MerchandiseImage, MerchandiseOption, MerchandisePost,
};
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Page, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CommunityQuery, CreateMerchandiseRequest, Envelope, MerchandiseResponse,
    UpdateMerchandiseRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct MerchandiseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MerchandiseService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Manager of the product's community or admin.
    ///
    /// The listing, its options and its images are written together.
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateMerchandiseRequest,
    ) -> ServiceResult<Envelope<MerchandiseResponse>> {
        let product = self
            .ctx
            .product_repo()
            .find_by_id(request.product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(request.product_id))?;
        self.require_manager(auth, product.community_id).await?;

        let post = MerchandisePost::new(
            self.ctx.generate_id(),
            product.id,
            product.community_id,
            request.title,
            request.content,
            request.price,
            request.delivery_price,
        );

        let mut errors = post.field_errors();
        errors.count(
            "options",
            request.options.len(),
            1,
            MerchandisePost::OPTIONS_MAX,
        );
        for error in image_list_errors(&request.images) {
            errors.push(error.field, error.message);
        }

        let options: Vec<_> = request
            .options
            .into_iter()
            .map(|option| {
                MerchandiseOption::new(
                    self.ctx.generate_id(),
                    post.id,
                    option.name.trim().to_string(),
                    option.price,
                    option.stock,
                )
            })
            .collect();
        for option in &options {
            for error in option.field_errors() {
                errors.push(error.field, error.message);
            }
        }
        errors.into_result()?;

        let images: Vec<_> = request
            .images
            .into_iter()
            .zip(0..)
            .map(|(url, position)| {
                MerchandiseImage::new(self.ctx.generate_id(), post.id, url, position)
            })
            .collect();

        self.ctx
            .merchandise_repo()
            .create(&post, &options, &images)
            .await?;

        info!(
            merchandise_id = %post.id,
            options = options.len(),
            images = images.len(),
            "Merchandise created"
        );

        Ok(Envelope::created(
            messages::merchandise::CREATE,
            MerchandiseResponse::new(post, options, images),
        ))
    }

    /// Listing summaries without options or images
    pub async fn find_all(
        &self,
        query: CommunityQuery,
    ) -> ServiceResult<Envelope<Page<MerchandiseResponse>>> {
        let page = self
            .ctx
            .merchandise_repo()
            .find_page(query.community_id, query.page_request())
            .await?;
        Ok(Envelope::ok(
            messages::merchandise::FIND_ALL,
            page.map(Into::into),
        ))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<MerchandiseResponse>> {
        let post = self.load(id).await?;
        let response = self.details(post).await?;
        Ok(Envelope::ok(messages::merchandise::FIND_ONE, response))
    }

    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: UpdateMerchandiseRequest,
    ) -> ServiceResult<Envelope<MerchandiseResponse>> {
        let mut post = self.load(id).await?;
        self.require_manager(auth, post.community_id).await?;

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        if let Some(price) = request.price {
            post.price = price;
        }
        if let Some(delivery_price) = request.delivery_price {
            post.delivery_price = delivery_price;
        }
        post.touch();
        post.check()?;

        self.ctx.merchandise_repo().update(&post).await?;
        info!(merchandise_id = %id, "Merchandise updated");

        let response = self.details(post).await?;
        Ok(Envelope::ok(messages::merchandise::UPDATE, response))
    }

    /// Also drops options, images and cart items that reference the listing
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        let post = self.load(id).await?;
        self.require_manager(auth, post.community_id).await?;

        self.ctx.merchandise_repo().delete(id).await?;
        info!(merchandise_id = %id, "Merchandise deleted");

        Ok(Envelope::ok(messages::merchandise::REMOVE, ()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<MerchandisePost> {
        let post = self
            .ctx
            .merchandise_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MerchandiseNotFound(id))?;
        Ok(post)
    }

    async fn details(&self, post: MerchandisePost) -> ServiceResult<MerchandiseResponse> {
        let options = self.ctx.merchandise_repo().find_options(post.id).await?;
        let images = self.ctx.merchandise_repo().find_images(post.id).await?;
        Ok(MerchandiseResponse::new(post, options, images))
    }

    async fn require_manager(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<()> {
        RoleService::new(self.ctx)
            .resolve(auth, community_id)
            .await?
            .require(Capabilities::MANAGE_CONTENT)?;
        Ok(())
    }
}

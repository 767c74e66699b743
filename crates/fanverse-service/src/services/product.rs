//! Product catalog service

use fanverse_core::entities::{Product, ProductCategory};
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CategoryResponse, CreateCategoryRequest, CreateProductRequest, Envelope, ProductResponse,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admin only; names are unique
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create_category(
        &self,
        auth: &AuthContext,
        request: CreateCategoryRequest,
    ) -> ServiceResult<Envelope<CategoryResponse>> {
        auth.require_admin()?;

        let category = ProductCategory::new(self.ctx.generate_id(), request.name);
        category.check()?;

        self.ctx.product_repo().create_category(&category).await?;
        info!(category_id = %category.id, name = %category.name, "Product category created");

        Ok(Envelope::created(
            messages::product::CREATE_CATEGORY,
            category.into(),
        ))
    }

    pub async fn find_categories(&self) -> ServiceResult<Envelope<Vec<CategoryResponse>>> {
        let categories = self.ctx.product_repo().find_categories().await?;
        Ok(Envelope::ok(
            messages::product::FIND_CATEGORIES,
            categories.into_iter().map(Into::into).collect(),
        ))
    }

    /// Manager of the community or admin
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateProductRequest,
    ) -> ServiceResult<Envelope<ProductResponse>> {
        let roles = RoleService::new(self.ctx);
        roles.community(request.community_id).await?;
        roles
            .resolve(auth, request.community_id)
            .await?
            .require(Capabilities::MANAGE_CONTENT)?;

        if let Some(category_id) = request.category_id {
            if self.ctx.product_repo().find_category(category_id).await?.is_none() {
                return Err(DomainError::CategoryNotFound(category_id).into());
            }
        }

        let product = Product::new(
            self.ctx.generate_id(),
            request.community_id,
            request.category_id,
            request.name.trim().to_string(),
        );
        product.check()?;

        self.ctx.product_repo().create(&product).await?;
        info!(product_id = %product.id, "Product created");

        Ok(Envelope::created(messages::product::CREATE, product.into()))
    }

    pub async fn find_all(
        &self,
        community_id: Snowflake,
    ) -> ServiceResult<Envelope<Vec<ProductResponse>>> {
        let products = self.ctx.product_repo().find_by_community(community_id).await?;
        Ok(Envelope::ok(
            messages::product::FIND_ALL,
            products.into_iter().map(Into::into).collect(),
        ))
    }
}

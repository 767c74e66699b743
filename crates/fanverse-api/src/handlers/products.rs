//! Product and category handlers

use axum::extract::State;
use fanverse_service::dto::{
    CategoryResponse, CommunityIdQuery, CreateCategoryRequest, CreateProductRequest,
    ProductResponse,
};
use fanverse_service::ProductService;

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /product/category
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiReply<CategoryResponse> {
    let service = ProductService::new(state.service_context());
    Ok(Reply(service.create_category(&auth.context, request).await?))
}

/// GET /product/category
pub async fn find_categories(State(state): State<AppState>) -> ApiReply<Vec<CategoryResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Reply(service.find_categories().await?))
}

/// POST /product
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> ApiReply<ProductResponse> {
    let service = ProductService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, request).await?))
}

/// GET /product?communityId
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommunityIdQuery>,
) -> ApiReply<Vec<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Reply(service.find_all(query.community_id).await?))
}

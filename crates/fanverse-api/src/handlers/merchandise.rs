//! Merchandise handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{
    CommunityQuery, CreateMerchandiseRequest, MerchandiseResponse, UpdateMerchandiseRequest,
};
use fanverse_service::MerchandiseService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /merchandise
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateMerchandiseRequest>,
) -> ApiReply<MerchandiseResponse> {
    let service = MerchandiseService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, request).await?))
}

/// GET /merchandise?communityId&page&limit
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommunityQuery>,
) -> ApiReply<Page<MerchandiseResponse>> {
    let service = MerchandiseService::new(state.service_context());
    Ok(Reply(service.find_all(query).await?))
}

/// GET /merchandise/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<MerchandiseResponse> {
    let service = MerchandiseService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// PATCH /merchandise/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMerchandiseRequest>,
) -> ApiReply<MerchandiseResponse> {
    let service = MerchandiseService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /merchandise/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = MerchandiseService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

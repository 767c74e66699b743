//! Media handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{
    CommunityIdQuery, CommunityQuery, CreateMediaRequest, MediaResponse, UpdateMediaRequest,
};
use fanverse_service::MediaService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /media?communityId
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<CommunityIdQuery>,
    ValidatedJson(request): ValidatedJson<CreateMediaRequest>,
) -> ApiReply<MediaResponse> {
    let service = MediaService::new(state.service_context());
    let response = service
        .create(&auth.context, query.community_id, request)
        .await?;
    Ok(Reply(response))
}

/// GET /media?communityId&page&limit
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommunityQuery>,
) -> ApiReply<Page<MediaResponse>> {
    let service = MediaService::new(state.service_context());
    Ok(Reply(service.find_all(query).await?))
}

/// GET /media/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<MediaResponse> {
    let service = MediaService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// PATCH /media/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateMediaRequest>,
) -> ApiReply<MediaResponse> {
    let service = MediaService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /media/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = MediaService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

//! Notice handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{
    CommunityIdQuery, CommunityQuery, CreateNoticeRequest, NoticeResponse, UpdateNoticeRequest,
};
use fanverse_service::NoticeService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /notice?communityId
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<CommunityIdQuery>,
    ValidatedJson(request): ValidatedJson<CreateNoticeRequest>,
) -> ApiReply<NoticeResponse> {
    let service = NoticeService::new(state.service_context());
    let response = service
        .create(&auth.context, query.community_id, request)
        .await?;
    Ok(Reply(response))
}

/// GET /notice?communityId&page&limit
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommunityQuery>,
) -> ApiReply<Page<NoticeResponse>> {
    let service = NoticeService::new(state.service_context());
    Ok(Reply(service.find_all(query).await?))
}

/// GET /notice/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<NoticeResponse> {
    let service = NoticeService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// PATCH /notice/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateNoticeRequest>,
) -> ApiReply<NoticeResponse> {
    let service = NoticeService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /notice/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = NoticeService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

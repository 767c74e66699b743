//! Live broadcast handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{CommunityQuery, CreateLiveRequest, LiveResponse};
use fanverse_service::LiveService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /live
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateLiveRequest>,
) -> ApiReply<LiveResponse> {
    let service = LiveService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, request).await?))
}

/// GET /live?communityId&page&limit
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommunityQuery>,
) -> ApiReply<Page<LiveResponse>> {
    let service = LiveService::new(state.service_context());
    Ok(Reply(service.find_all(query).await?))
}

/// GET /live/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<LiveResponse> {
    let service = LiveService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// POST /live/:id/end
pub async fn end(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<LiveResponse> {
    let service = LiveService::new(state.service_context());
    Ok(Reply(service.end(&auth.context, id).await?))
}

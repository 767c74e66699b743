//! Community handlers

use axum::extract::State;
use fanverse_service::dto::{
    CommunityResponse, CommunityRoleResponse, CommunityUserResponse, CreateCommunityRequest,
    JoinCommunityRequest, UpdateCommunityRequest,
};
use fanverse_service::CommunityService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /community
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommunityRequest>,
) -> ApiReply<CommunityResponse> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, request).await?))
}

/// GET /community
pub async fn find_all(State(state): State<AppState>) -> ApiReply<Vec<CommunityResponse>> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.find_all().await?))
}

/// GET /community/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<CommunityResponse> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// PATCH /community/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommunityRequest>,
) -> ApiReply<CommunityResponse> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /community/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

/// POST /community/:id/join
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<JoinCommunityRequest>,
) -> ApiReply<CommunityUserResponse> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.join(&auth.context, id, request).await?))
}

/// DELETE /community/:id/leave
pub async fn leave(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.leave(&auth.context, id).await?))
}

/// GET /community/:id/role
pub async fn role(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<CommunityRoleResponse> {
    let service = CommunityService::new(state.service_context());
    Ok(Reply(service.role(&auth.context, id).await?))
}

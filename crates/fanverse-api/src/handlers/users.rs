//! Current-user handlers

use axum::extract::State;
use fanverse_service::dto::{JoinedCommunityResponse, UpdateUserRequest, UserResponse};
use fanverse_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// GET /users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiReply<UserResponse> {
    let service = UserService::new(state.service_context());
    Ok(Reply(service.me(&auth.context).await?))
}

/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiReply<UserResponse> {
    let service = UserService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, request).await?))
}

/// DELETE /users/me
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> ApiReply<()> {
    let service = UserService::new(state.service_context());
    Ok(Reply(service.delete(&auth.context).await?))
}

/// GET /users/me/communities
pub async fn my_communities(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiReply<Vec<JoinedCommunityResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Reply(service.communities(&auth.context).await?))
}

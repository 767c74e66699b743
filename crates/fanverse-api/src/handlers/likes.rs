//! Like handlers

use axum::extract::State;
use fanverse_service::dto::{LikeResponse, LikeStatusResponse, UpdateLikeRequest};
use fanverse_service::LikeService;

use crate::extractors::{AuthUser, LikePath, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /like/:item_type/:item_id
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    path: LikePath,
    ValidatedJson(request): ValidatedJson<UpdateLikeRequest>,
) -> ApiReply<LikeResponse> {
    let service = LikeService::new(state.service_context());
    let response = service
        .update_status(&auth.context, path.item_type, path.item_id, request)
        .await?;
    Ok(Reply(response))
}

/// GET /like/:item_type/:item_id
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
    path: LikePath,
) -> ApiReply<LikeStatusResponse> {
    let service = LikeService::new(state.service_context());
    let response = service
        .status(&auth.context, path.item_type, path.item_id)
        .await?;
    Ok(Reply(response))
}

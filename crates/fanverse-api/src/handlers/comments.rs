//! Comment handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{CommentListQuery, CommentRequest, CommentResponse, PostIdQuery};
use fanverse_service::CommentService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /comment?postId
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<PostIdQuery>,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiReply<CommentResponse> {
    let service = CommentService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, query.post_id, request).await?))
}

/// GET /comment?postId&page&limit
pub async fn find_all(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CommentListQuery>,
) -> ApiReply<Page<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Reply(service.find_all(query).await?))
}

/// PATCH /comment/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiReply<CommentResponse> {
    let service = CommentService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /comment/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = CommentService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

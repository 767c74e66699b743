//! Post handlers

use axum::extract::State;
use fanverse_core::Page;
use fanverse_service::dto::{CreatePostRequest, PostListQuery, PostResponse, UpdatePostRequest};
use fanverse_service::PostService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /post
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiReply<PostResponse> {
    let service = PostService::new(state.service_context());
    Ok(Reply(service.create(&auth.context, request).await?))
}

/// GET /post?communityId&artistId&page&limit
pub async fn find_posts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostListQuery>,
) -> ApiReply<Page<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Reply(service.find_posts(query).await?))
}

/// GET /post/:id
pub async fn find_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiReply<PostResponse> {
    let service = PostService::new(state.service_context());
    Ok(Reply(service.find_one(id).await?))
}

/// PATCH /post/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiReply<PostResponse> {
    let service = PostService::new(state.service_context());
    Ok(Reply(service.update(&auth.context, id, request).await?))
}

/// DELETE /post/:id
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    let service = PostService::new(state.service_context());
    Ok(Reply(service.remove(&auth.context, id).await?))
}

//! Cart handlers

use axum::extract::State;
use fanverse_service::dto::{
    AddCartItemRequest, CartResponse, CheckoutResponse, UpdateCartItemRequest,
};
use fanverse_service::CartService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// GET /cart
pub async fn find(State(state): State<AppState>, auth: AuthUser) -> ApiReply<CartResponse> {
    let service = CartService::new(state.service_context());
    Ok(Reply(service.find(&auth.context).await?))
}

/// POST /cart/items
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddCartItemRequest>,
) -> ApiReply<CartResponse> {
    let service = CartService::new(state.service_context());
    Ok(Reply(service.add_item(&auth.context, request).await?))
}

/// PATCH /cart/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCartItemRequest>,
) -> ApiReply<CartResponse> {
    let service = CartService::new(state.service_context());
    Ok(Reply(service.update_item(&auth.context, id, request).await?))
}

/// DELETE /cart/items/:id
pub async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<CartResponse> {
    let service = CartService::new(state.service_context());
    Ok(Reply(service.remove_item(&auth.context, id).await?))
}

/// POST /cart/checkout
pub async fn checkout(State(state): State<AppState>, auth: AuthUser) -> ApiReply<CheckoutResponse> {
    let service = CartService::new(state.service_context());
    Ok(Reply(service.checkout(&auth.context).await?))
}

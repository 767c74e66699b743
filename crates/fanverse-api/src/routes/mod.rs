//! Route definitions
//!
//! All resource routes are mounted under /api/v1. Health probes are exported
//! separately so they bypass the rate limiter.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    admin, auth, cart, comments, communities, health, likes, lives, media, memberships,
    merchandise, notices, posts, products, users,
};
use crate::state::AppState;

/// Create the main API router (health routes excluded)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(community_routes())
        .merge(post_routes())
        .merge(notice_routes())
        .merge(media_routes())
        .merge(live_routes())
        .merge(admin_routes())
        .merge(membership_routes())
        .merge(shop_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::me).patch(users::update_me).delete(users::delete_me),
        )
        .route("/users/me/communities", get(users::my_communities))
}

fn community_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/community",
            post(communities::create).get(communities::find_all),
        )
        .route(
            "/community/:id",
            get(communities::find_one)
                .patch(communities::update)
                .delete(communities::remove),
        )
        .route("/community/:id/join", post(communities::join))
        .route("/community/:id/leave", delete(communities::leave))
        .route("/community/:id/role", get(communities::role))
}

/// Posts, comments and likes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post", post(posts::create).get(posts::find_posts))
        .route(
            "/post/:id",
            get(posts::find_one).patch(posts::update).delete(posts::remove),
        )
        .route("/comment", post(comments::create).get(comments::find_all))
        .route(
            "/comment/:id",
            patch(comments::update).delete(comments::remove),
        )
        .route(
            "/like/:item_type/:item_id",
            post(likes::update_status).get(likes::status),
        )
}

fn notice_routes() -> Router<AppState> {
    Router::new()
        .route("/notice", post(notices::create).get(notices::find_all))
        .route(
            "/notice/:id",
            get(notices::find_one)
                .patch(notices::update)
                .delete(notices::remove),
        )
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/media", post(media::create).get(media::find_all))
        .route(
            "/media/:id",
            get(media::find_one).patch(media::update).delete(media::remove),
        )
}

fn live_routes() -> Router<AppState> {
    Router::new()
        .route("/live", post(lives::create).get(lives::find_all))
        .route("/live/:id", get(lives::find_one))
        .route("/live/:id/end", post(lives::end))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/artist", post(admin::grant_artist))
        .route("/admin/artist/:id", delete(admin::revoke_artist))
        .route("/admin/manager", post(admin::grant_manager))
        .route("/admin/manager/:id", delete(admin::revoke_manager))
        .route("/admin/community/:id/staff", get(admin::community_staff))
}

fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/membership/payment", post(memberships::payment))
        .route("/membership", get(memberships::find_all))
}

/// Products, merchandise and cart
fn shop_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product/category",
            post(products::create_category).get(products::find_categories),
        )
        .route("/product", post(products::create).get(products::find_all))
        .route(
            "/merchandise",
            post(merchandise::create).get(merchandise::find_all),
        )
        .route(
            "/merchandise/:id",
            get(merchandise::find_one)
                .patch(merchandise::update)
                .delete(merchandise::remove),
        )
        .route("/cart", get(cart::find))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/:id",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/cart/checkout", post(cart::checkout))
}

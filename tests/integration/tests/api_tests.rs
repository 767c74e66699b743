//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_error, assert_status, check_test_env, create_community, create_post,
    fixtures::*, join, sign_up, sign_up_admin, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_sign_up_and_sign_in() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignUpRequest::unique();

    let response = server.post("/auth/sign-up", &request).await.unwrap();
    let auth: AuthData = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());

    let response = server
        .post("/auth/sign-in", &SignInRequest::from_sign_up(&request))
        .await
        .unwrap();
    let auth: AuthData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.name, request.name);
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignUpRequest::unique();

    server.post("/auth/sign-up", &request).await.unwrap();
    let response = server.post("/auth/sign-up", &request).await.unwrap();

    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_sign_up_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignUpRequest::unique();
    request.password = "alllowercase".to_string();

    let response = server.post("/auth/sign-up", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "WEAK_PASSWORD");
}

#[tokio::test]
async fn test_sign_in_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignInRequest {
        email: "nobody@example.com".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/auth/sign-in", &request).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_rotates_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = sign_up(&server).await.unwrap();
    let body = json!({ "refreshToken": user.refresh_token });

    let response = server.post("/auth/refresh", &body).await.unwrap();
    let auth: AuthData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_ne!(auth.refresh_token, user.refresh_token);

    // The rotated-out token is dead
    let response = server.post("/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = sign_up(&server).await.unwrap();

    let response = server
        .post_empty_auth("/auth/logout", &user.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/auth/refresh", &json!({ "refreshToken": user.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_protected_route_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_update_and_delete_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = sign_up(&server).await.unwrap();

    let response = server
        .patch_auth("/users/me", &user.token, &json!({ "name": "renamed" }))
        .await
        .unwrap();
    let me: UserData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.name, "renamed");

    let response = server.delete_auth("/users/me", &user.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Soft-deleted users can no longer sign in
    let response = server
        .post("/auth/sign-in", &SignInRequest::from_sign_up(&user.sign_up))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Community Tests
// ============================================================================

#[tokio::test]
async fn test_only_admin_creates_community() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = sign_up(&server).await.unwrap();

    let response = server
        .post_auth("/community", &user.token, &CreateCommunityRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    assert_eq!(community.membership_price, 5000);

    let response = server
        .get(&format!("/community/{}", community.id))
        .await
        .unwrap();
    let found: CommunityData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.community_name, community.community_name);
}

#[tokio::test]
async fn test_join_leave_and_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();

    let role_path = format!("/community/{}/role", community.id);
    let response = server.get_auth(&role_path, &fan.token).await.unwrap();
    let role: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(role["role"], "NONE");

    join(&server, &fan, &community.id).await.unwrap();
    let response = server.get_auth(&role_path, &fan.token).await.unwrap();
    let role: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(role["role"], "MEMBER");

    let response = server
        .post_auth(
            &format!("/community/{}/join", community.id),
            &fan.token,
            &json!({ "nickName": "again" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    let response = server
        .delete_auth(&format!("/community/{}/leave", community.id), &fan.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Post, Comment and Like Tests
// ============================================================================

#[tokio::test]
async fn test_post_requires_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let outsider = sign_up(&server).await.unwrap();

    let response = server
        .post_auth(
            "/post",
            &outsider.token,
            &json!({ "communityId": community.id, "content": "hello" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_post_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let author = sign_up(&server).await.unwrap();
    let other = sign_up(&server).await.unwrap();
    join(&server, &author, &community.id).await.unwrap();
    join(&server, &other, &community.id).await.unwrap();

    let post = create_post(&server, &author, &community.id, "first")
        .await
        .unwrap();
    assert_eq!(post.community_id, community.id);
    assert!(post.artist_id.is_none());

    let post_path = format!("/post/{}", post.id);
    let response = server
        .patch_auth(&post_path, &other.token, &json!({ "content": "hijack" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_AUTHOR");

    let response = server
        .patch_auth(
            &post_path,
            &author.token,
            &json!({ "content": "edited", "images": ["https://cdn.example.com/a.png"] }),
        )
        .await
        .unwrap();
    let updated: PostData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "edited");
    assert_eq!(updated.images.len(), 1);

    let response = server
        .delete_auth(&post_path, &other.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Admins remove any post
    let response = server.delete_auth(&post_path, &admin.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&post_path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_listing_paginates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();
    join(&server, &fan, &community.id).await.unwrap();

    for i in 0..12 {
        create_post(&server, &fan, &community.id, &format!("post {i}"))
            .await
            .unwrap();
    }

    let response = server
        .get(&format!("/post?communityId={}&page=2", community.id))
        .await
        .unwrap();
    let page: PageData<PostData> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 10);
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_comment_and_like_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();
    join(&server, &fan, &community.id).await.unwrap();
    let post = create_post(&server, &fan, &community.id, "likeable")
        .await
        .unwrap();

    let response = server
        .post_auth(
            &format!("/comment?postId={}", post.id),
            &fan.token,
            &json!({ "content": "nice" }),
        )
        .await
        .unwrap();
    let comment: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment["content"], "nice");

    let response = server
        .get(&format!("/comment?postId={}", post.id))
        .await
        .unwrap();
    let comments: PageData<Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.total, 1);

    let like_path = format!("/like/post/{}", post.id);
    for _ in 0..2 {
        let response = server
            .post_auth(&like_path, &fan.token, &json!({ "status": true }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get_auth(&like_path, &fan.token).await.unwrap();
    let status: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(status["likeCount"], 1);
    assert_eq!(status["liked"], true);

    let response = server
        .post_auth(&like_path, &fan.token, &json!({ "status": false }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/post/{}", post.id)).await.unwrap();
    let post: PostData = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.like_count, 0);
}

// ============================================================================
// Notice and Membership Tests
// ============================================================================

#[tokio::test]
async fn test_notice_requires_manager() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();
    let fan_cu = join(&server, &fan, &community.id).await.unwrap();
    assert!(!fan_cu.is_empty());

    let notice_path = format!("/notice?communityId={}", community.id);
    let body = json!({ "title": "Tour", "content": "Dates announced" });

    let response = server
        .post_auth(&notice_path, &fan.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            "/admin/manager",
            &admin.token,
            &json!({ "communityId": community.id, "userId": fan.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&notice_path, &fan.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&notice_path).await.unwrap();
    let notices: PageData<Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(notices.total, 1);
    assert_eq!(notices.items[0]["title"], "Tour");
}

#[tokio::test]
async fn test_membership_payment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();
    join(&server, &fan, &community.id).await.unwrap();

    let merchant_uid = format!("order-{}", unique_suffix());
    let payment = |amount: i64| {
        json!({
            "communityId": community.id,
            "merchantUid": merchant_uid,
            "impUid": "imp_1",
            "amount": amount,
        })
    };

    let response = server
        .post_auth("/membership/payment", &fan.token, &payment(1))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "PAYMENT_AMOUNT_MISMATCH");

    let response = server
        .post_auth("/membership/payment", &fan.token, &payment(5000))
        .await
        .unwrap();
    let membership: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(membership["status"], "ACTIVE");

    let response = server
        .post_auth("/membership/payment", &fan.token, &payment(5000))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/membership?communityId={}", community.id),
            &fan.token,
        )
        .await
        .unwrap();
    let memberships: Vec<Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(memberships.len(), 1);
}

// ============================================================================
// Storefront Tests
// ============================================================================

#[tokio::test]
async fn test_cart_checkout_decrements_stock() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = sign_up_admin(&server).await.unwrap();
    let community = create_community(&server, &admin).await.unwrap();
    let fan = sign_up(&server).await.unwrap();

    let response = server
        .post_auth(
            "/product",
            &admin.token,
            &json!({ "communityId": community.id, "name": "Tour goods" }),
        )
        .await
        .unwrap();
    let product: Value = assert_data(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/merchandise",
            &admin.token,
            &json!({
                "productId": product["id"],
                "title": "Light stick",
                "content": "Official",
                "price": 30000,
                "deliveryPrice": 3000,
                "options": [{ "name": "Standard", "price": 30000, "stock": 2 }]
            }),
        )
        .await
        .unwrap();
    let merchandise: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    let option_id = merchandise["options"][0]["id"].clone();

    let add = |quantity: i32| {
        json!({
            "merchandisePostId": merchandise["id"],
            "merchandiseOptionId": option_id,
            "quantity": quantity,
        })
    };

    let response = server
        .post_auth("/cart/items", &fan.token, &add(3))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INSUFFICIENT_STOCK");

    let response = server
        .post_auth("/cart/items", &fan.token, &add(2))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_empty_auth("/cart/checkout", &fan.token)
        .await
        .unwrap();
    let checkout: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(checkout["totalPrice"], 60000);

    let response = server
        .post_empty_auth("/cart/checkout", &fan.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMPTY_CART");
}

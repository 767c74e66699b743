//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::helpers::{assert_data, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    let pid = u64::from(std::process::id());
    pid * 100_000 + COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("fan{}", suffix % 1_000_000),
            email: format!("fan{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn from_sign_up(request: &SignUpRequest) -> Self {
        Self {
            email: request.email.clone(),
            password: request.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

// ============================================================================
// Community and content
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    pub community_name: String,
    pub membership_price: i64,
}

impl CreateCommunityRequest {
    pub fn unique() -> Self {
        Self {
            community_name: format!("band{}", unique_suffix() % 1_000_000),
            membership_price: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityData {
    pub id: String,
    pub community_name: String,
    pub membership_price: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub id: String,
    pub community_id: String,
    pub artist_id: Option<String>,
    pub content: String,
    pub images: Vec<String>,
    pub like_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

// ============================================================================
// Scenario helpers
// ============================================================================

/// A signed-up user and their tokens
#[derive(Debug)]
pub struct TestUser {
    pub id: String,
    pub token: String,
    pub refresh_token: String,
    pub sign_up: SignUpRequest,
}

pub async fn sign_up(server: &TestServer) -> Result<TestUser> {
    let request = SignUpRequest::unique();
    let response = server.post("/auth/sign-up", &request).await?;
    let auth: AuthData = assert_data(response, StatusCode::CREATED).await?;
    Ok(TestUser {
        id: auth.user.id,
        token: auth.access_token,
        refresh_token: auth.refresh_token,
        sign_up: request,
    })
}

/// Sign up a user and grant them the administrator role
pub async fn sign_up_admin(server: &TestServer) -> Result<TestUser> {
    let user = sign_up(server).await?;
    server.promote_to_admin(&user.id).await?;
    Ok(user)
}

pub async fn create_community(server: &TestServer, admin: &TestUser) -> Result<CommunityData> {
    let response = server
        .post_auth("/community", &admin.token, &CreateCommunityRequest::unique())
        .await?;
    assert_data(response, StatusCode::CREATED).await
}

/// Join a community and return the CommunityUser id
pub async fn join(server: &TestServer, user: &TestUser, community_id: &str) -> Result<String> {
    let response = server
        .post_auth(
            &format!("/community/{community_id}/join"),
            &user.token,
            &json!({ "nickName": user.sign_up.name }),
        )
        .await?;
    let community_user: serde_json::Value = assert_data(response, StatusCode::CREATED).await?;
    community_user["id"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("Missing community user id"))
}

pub async fn create_post(
    server: &TestServer,
    user: &TestUser,
    community_id: &str,
    content: &str,
) -> Result<PostData> {
    let response = server
        .post_auth(
            "/post",
            &user.token,
            &json!({ "communityId": community_id, "content": content, "images": [] }),
        )
        .await?;
    assert_data(response, StatusCode::CREATED).await
}

//! Wire models
//!
//! Request bodies serialize to the API's camelCase shape; responses decode
//! the success envelope and the error body.

use chrono::{DateTime, Utc};
use fanverse_core::{ItemType, Snowflake};
use serde::{Deserialize, Serialize};

/// Token pair held by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    pub fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
    }
}

/// Success body `{status, message, data}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

/// Error body `{status, error: {code, message, details?}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// === Auth ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshBody<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub role: String,
}

// === Posts and likes ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub community_id: Snowflake,
    pub content: String,
    pub images: Vec<String>,
}

/// An empty image list keeps the post's current images
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostUpdate {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub community_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PostQuery {
    pub fn community(community_id: Snowflake) -> Self {
        Self {
            community_id,
            artist_id: None,
            page: None,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub community_user_id: Snowflake,
    #[serde(default)]
    pub artist_id: Option<Snowflake>,
    pub content: String,
    pub images: Vec<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LikeBody {
    pub status: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub item_id: Snowflake,
    pub item_type: ItemType,
    pub status: bool,
}

// === Notices ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub notice_images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub notice_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

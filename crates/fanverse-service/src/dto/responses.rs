//! Response DTOs for API endpoints
//!
//! Snowflake ids serialize as strings; field names are camelCase.

use chrono::{DateTime, Utc};
use fanverse_core::{Capabilities, CommunityRole, ItemType, MembershipStatus, Snowflake};
use serde::Serialize;

// ============================================================================
// Envelope
// ============================================================================

/// Uniform success body: `{status, message, data}`
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(status: u16, message: &'static str, data: T) -> Self {
        Self {
            status,
            message,
            data,
        }
    }

    pub fn ok(message: &'static str, data: T) -> Self {
        Self::new(200, message, data)
    }

    pub fn created(message: &'static str, data: T) -> Self {
        Self::new(201, message, data)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status: self.status,
            message: self.message,
            data: f(self.data),
        }
    }
}

// ============================================================================
// Auth and User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Account data; the password hash never leaves the database layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub role: &'static str,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Community Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: Snowflake,
    pub community_name: String,
    pub membership_price: i64,
    pub community_logo_image: Option<String>,
    pub community_cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityUserResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub community_id: Snowflake,
    pub nick_name: String,
    pub created_at: DateTime<Utc>,
}

/// A joined community together with the caller's identity in it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedCommunityResponse {
    pub community: CommunityResponse,
    pub community_user_id: Snowflake,
    pub nick_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRoleResponse {
    pub community_id: Snowflake,
    pub role: CommunityRole,
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub id: Snowflake,
    pub kind: &'static str,
    pub community_user_id: Snowflake,
    pub community_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post, Comment and Like Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub community_user_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Snowflake>,
    pub content: String,
    pub images: Vec<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub community_id: Snowflake,
    pub community_user_id: Snowflake,
    pub content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub item_id: Snowflake,
    pub item_type: ItemType,
    pub status: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusResponse {
    pub item_id: Snowflake,
    pub item_type: ItemType,
    /// Rows with `status = true` only
    pub like_count: i64,
    pub liked: bool,
}

// ============================================================================
// Notice, Media and Live Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub notice_images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub thumbnail_image: Option<String>,
    pub media_files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub artist_id: Snowflake,
    pub title: String,
    pub thumbnail_image: Option<String>,
    pub stream_url: String,
    pub is_live: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Membership Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: Snowflake,
    pub community_user_id: Snowflake,
    pub community_id: Snowflake,
    pub price: i64,
    pub status: MembershipStatus,
    pub merchant_uid: String,
    pub imp_uid: String,
    pub paid_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Storefront Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub category_id: Option<Snowflake>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseOptionResponse {
    pub id: Snowflake,
    pub name: String,
    pub price: i64,
    pub stock: i32,
}

/// Listing summary; detail views also fill options and images
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseResponse {
    pub id: Snowflake,
    pub product_id: Snowflake,
    pub community_id: Snowflake,
    pub title: String,
    pub content: String,
    pub price: i64,
    pub delivery_price: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<MerchandiseOptionResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: Snowflake,
    pub merchandise_post_id: Snowflake,
    pub merchandise_option_id: Snowflake,
    pub merchandise_title: String,
    pub option_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: Snowflake,
    pub items: Vec<CartLineResponse>,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub items: Vec<CartLineResponse>,
    pub total_price: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            version: version.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn new(database: bool, redis: bool) -> Self {
        let status = if database && redis { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}

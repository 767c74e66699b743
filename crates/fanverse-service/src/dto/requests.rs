//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only
//! `Deserialize`. Field names are camelCase on the wire.

use fanverse_core::{PageRequest, Snowflake};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Omit the token to sign out everywhere
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: Option<String>,

    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image: Option<String>,
}

// ============================================================================
// Community Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 50, message = "Community name must be 1-50 characters"))]
    pub community_name: String,

    #[validate(range(min = 0, message = "Membership price must not be negative"))]
    pub membership_price: i64,

    #[validate(url(message = "Logo image must be a URL"))]
    pub community_logo_image: Option<String>,

    #[validate(url(message = "Cover image must be a URL"))]
    pub community_cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommunityRequest {
    #[validate(length(min = 1, max = 50, message = "Community name must be 1-50 characters"))]
    pub community_name: Option<String>,

    #[validate(range(min = 0, message = "Membership price must not be negative"))]
    pub membership_price: Option<i64>,

    #[validate(url(message = "Logo image must be a URL"))]
    pub community_logo_image: Option<String>,

    #[validate(url(message = "Cover image must be a URL"))]
    pub community_cover_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinCommunityRequest {
    #[validate(length(min = 1, max = 30, message = "Nickname must be 1-30 characters"))]
    pub nick_name: String,
}

// ============================================================================
// Post, Comment and Like Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub community_id: Snowflake,

    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,

    /// Uploaded image URLs, in display order
    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images"))]
    pub images: Vec<String>,
}

/// An absent or empty `images` keeps the current images
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,

    #[validate(length(max = 10, message = "At most 10 images"))]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub community_id: Snowflake,
    pub artist_id: Option<Snowflake>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PostListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub post_id: Snowflake,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CommentListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdQuery {
    pub post_id: Snowflake,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UpdateLikeRequest {
    pub status: bool,
}

// ============================================================================
// Community Content Requests
// ============================================================================

/// Community-scoped listing query shared by notices, media, lives and
/// merchandise
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityQuery {
    pub community_id: Snowflake,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CommunityQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 3, message = "At most 3 images"))]
    pub notice_images: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,

    #[validate(length(max = 3, message = "At most 3 images"))]
    pub notice_images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail_image: Option<String>,

    #[validate(length(min = 1, max = 10, message = "Between 1 and 10 media files"))]
    pub media_files: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail_image: Option<String>,

    #[validate(length(min = 1, max = 10, message = "Between 1 and 10 media files"))]
    pub media_files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveRequest {
    pub community_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail_image: Option<String>,

    #[validate(url(message = "Stream URL must be a URL"))]
    pub stream_url: String,
}

// ============================================================================
// Admin and Membership Requests
// ============================================================================

/// Grant an artist or manager role to an existing community member
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrantStaffRequest {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
}

/// Payment gateway callback payload, forwarded by the client
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPaymentRequest {
    pub community_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "merchantUid is required"))]
    pub merchant_uid: String,

    #[validate(length(min = 1, max = 100, message = "impUid is required"))]
    pub imp_uid: String,

    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityIdQuery {
    pub community_id: Snowflake,
}

// ============================================================================
// Storefront Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Category name must be 1-50 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub community_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Product name must be 1-100 characters"))]
    pub name: String,

    pub category_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseOptionInput {
    #[validate(length(min = 1, max = 100, message = "Option name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 100000000, message = "Price must be between 0 and 100000000"))]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMerchandiseRequest {
    pub product_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[validate(range(min = 0, max = 100000000, message = "Price must be between 0 and 100000000"))]
    pub price: i64,

    #[validate(range(min = 0, max = 100000000, message = "Delivery price must be between 0 and 100000000"))]
    pub delivery_price: i64,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images"))]
    pub images: Vec<String>,

    #[validate(length(min = 1, max = 50, message = "Between 1 and 50 options"), nested)]
    pub options: Vec<MerchandiseOptionInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMerchandiseRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,

    #[validate(range(min = 0, max = 100000000, message = "Price must be between 0 and 100000000"))]
    pub price: Option<i64>,

    #[validate(range(min = 0, max = 100000000, message = "Delivery price must be between 0 and 100000000"))]
    pub delivery_price: Option<i64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub merchandise_post_id: Snowflake,
    pub merchandise_option_id: Snowflake,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

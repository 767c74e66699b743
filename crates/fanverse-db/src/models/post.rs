//! Post, post image and comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub community_id: i64,
    pub community_user_id: i64,
    pub artist_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for post_images table
#[derive(Debug, Clone, FromRow)]
pub struct PostImageModel {
    pub id: i64,
    pub post_id: i64,
    pub url: String,
    pub position: i32,
}

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub community_id: i64,
    pub community_user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

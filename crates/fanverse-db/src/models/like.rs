//! Like database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub item_type: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated active like count for one item
#[derive(Debug, Clone, FromRow)]
pub struct LikeCountModel {
    pub item_id: i64,
    pub count: i64,
}

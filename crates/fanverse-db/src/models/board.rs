//! Notice, media and live database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Notice row with its image urls aggregated in position order
#[derive(Debug, Clone, FromRow)]
pub struct NoticeModel {
    pub id: i64,
    pub community_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Media row with its file urls aggregated in position order
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub community_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub thumbnail_image: Option<String>,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for lives table
#[derive(Debug, Clone, FromRow)]
pub struct LiveModel {
    pub id: i64,
    pub community_id: i64,
    pub artist_id: i64,
    pub title: String,
    pub thumbnail_image: Option<String>,
    pub stream_url: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

//! Community, community user and staff database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for communities table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityModel {
    pub id: i64,
    pub name: String,
    pub membership_price: i64,
    pub logo_image: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for community_users table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityUserModel {
    pub id: i64,
    pub user_id: i64,
    pub community_id: i64,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the artists or managers table, tagged with the table it came from
#[derive(Debug, Clone, FromRow)]
pub struct StaffModel {
    pub id: i64,
    /// `ARTIST` or `MANAGER`
    pub kind: String,
    pub community_user_id: i64,
    pub community_id: i64,
    pub created_at: DateTime<Utc>,
}

//! Membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for memberships table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub id: i64,
    pub community_user_id: i64,
    pub community_id: i64,
    pub price: i64,
    pub status: String,
    pub merchant_uid: String,
    pub imp_uid: String,
    pub paid_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

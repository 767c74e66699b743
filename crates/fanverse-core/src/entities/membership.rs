//! Membership entity - a paid subscription period in a community

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    Active,
    Expired,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("expired") {
            Self::Expired
        } else {
            Self::Active
        }
    }
}

/// Created from a confirmed payment-gateway callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Snowflake,
    pub community_user_id: Snowflake,
    pub community_id: Snowflake,
    pub price: i64,
    pub status: MembershipStatus,
    /// Merchant order id; unique across all payments
    pub merchant_uid: String,
    /// Gateway transaction id
    pub imp_uid: String,
    pub paid_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Membership {
    pub fn activate(
        id: Snowflake,
        community_user_id: Snowflake,
        community_id: Snowflake,
        price: i64,
        merchant_uid: String,
        imp_uid: String,
        duration: Duration,
    ) -> Self {
        let paid_at = Utc::now();
        Self {
            id,
            community_user_id,
            community_id,
            price,
            status: MembershipStatus::Active,
            merchant_uid,
            imp_uid,
            paid_at,
            expires_at: paid_at + duration,
        }
    }

    /// Status as of `now`; a stored `Active` past its expiry reads as `Expired`
    pub fn status_at(&self, now: DateTime<Utc>) -> MembershipStatus {
        if self.status == MembershipStatus::Active && self.expires_at <= now {
            MembershipStatus::Expired
        } else {
            self.status
        }
    }
}

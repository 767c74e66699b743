//! Community entities - a fan community, its members and staff grants

use chrono::{DateTime, Utc};

use crate::validation::{EntityRules, FieldErrors};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: Snowflake,
    pub name: String,
    /// Price of one membership period, in the smallest currency unit
    pub membership_price: i64,
    pub logo_image: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Community {
    pub const NAME_MAX: usize = 50;

    pub fn new(id: Snowflake, name: String, membership_price: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            membership_price,
            logo_image: None,
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl EntityRules for Community {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("communityName", &self.name, Self::NAME_MAX);
        errors.non_negative("membershipPrice", self.membership_price);
        errors
    }
}

/// A user's identity inside one community
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityUser {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub community_id: Snowflake,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommunityUser {
    pub const NICKNAME_MAX: usize = 30;

    pub fn new(id: Snowflake, user_id: Snowflake, community_id: Snowflake, nickname: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            community_id,
            nickname: nickname.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl EntityRules for CommunityUser {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("nickName", &self.nickname, Self::NICKNAME_MAX);
        errors
    }
}

/// Kind of staff grant held by a community user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffKind {
    Artist,
    Manager,
}

impl StaffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "ARTIST",
            Self::Manager => "MANAGER",
        }
    }
}

/// Artist or manager grant, keyed by the grantee's community user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffGrant {
    pub id: Snowflake,
    pub kind: StaffKind,
    pub community_user_id: Snowflake,
    pub community_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl StaffGrant {
    pub fn new(
        id: Snowflake,
        kind: StaffKind,
        community_user_id: Snowflake,
        community_id: Snowflake,
    ) -> Self {
        Self {
            id,
            kind,
            community_user_id,
            community_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_rules() {
        assert!(Community::new(Snowflake::new(1), "Stars".into(), 5000).check().is_ok());

        let errors = Community::new(Snowflake::new(1), " ".into(), -1).field_errors();
        assert!(errors.contains("communityName"));
        assert!(errors.contains("membershipPrice"));
    }

    #[test]
    fn test_nickname_trimmed_and_checked() {
        let cu = CommunityUser::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "  fan  ".into(),
        );
        assert_eq!(cu.nickname, "fan");
        assert!(cu.check().is_ok());

        let long = CommunityUser::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "x".repeat(31),
        );
        assert!(long.field_errors().contains("nickName"));
    }
}

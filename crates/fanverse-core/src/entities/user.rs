//! User entity - a platform account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{EntityRules, FieldErrors};
use crate::value_objects::Snowflake;

/// Platform-wide account role.
///
/// Only `Admin` carries authority; every other grant is scoped to a
/// community through artist and manager rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "Admin",
        }
    }

    /// Stored values are matched case-insensitively; anything unknown is a
    /// regular user.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub const NAME_MAX: usize = 30;
    pub const EMAIL_MAX: usize = 255;

    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email: email.trim().to_lowercase(),
            profile_image: None,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Tombstoned accounts cannot sign in or act
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_profile_image(&mut self, profile_image: Option<String>) {
        self.profile_image = profile_image;
        self.updated_at = Utc::now();
    }
}

impl EntityRules for User {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("name", &self.name, Self::NAME_MAX);
        errors.text("email", &self.email, Self::EMAIL_MAX);
        if !self.email.contains('@') {
            errors.push("email", "must be a valid email address");
        }
        if self.profile_image.as_deref().is_some_and(|url| url.trim().is_empty()) {
            errors.push("profileImage", "must not be empty");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        let user = User::new(Snowflake::new(1), "Jin".into(), "  Jin@Example.COM ".into());
        assert_eq!(user.email, "jin@example.com");
        assert!(!user.is_admin());
        assert!(!user.is_deleted());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("Admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("user"), UserRole::User);
        assert_eq!(UserRole::parse("manager"), UserRole::User);
    }

    #[test]
    fn test_rules() {
        let user = User::new(Snowflake::new(1), "Jin".into(), "jin@example.com".into());
        assert!(user.check().is_ok());

        let mut bad = User::new(Snowflake::new(1), String::new(), "nope".into());
        bad.profile_image = Some(" ".into());
        let errors = bad.field_errors();
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("profileImage"));
    }
}

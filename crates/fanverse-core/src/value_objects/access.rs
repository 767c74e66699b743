//! Authorization context - who is calling, and what they may do in a community

use serde::Serialize;

use super::{Capabilities, Snowflake};
use crate::entities::CommunityUser;
use crate::error::DomainError;

/// Platform-level caller identity, resolved once per request by the
/// authentication layer and passed explicitly into every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Snowflake,
    pub capabilities: Capabilities,
}

impl AuthContext {
    pub fn new(user_id: Snowflake, capabilities: Capabilities) -> Self {
        Self {
            user_id,
            capabilities,
        }
    }

    /// Context for a regular account
    pub fn user(user_id: Snowflake) -> Self {
        Self::new(user_id, Capabilities::empty())
    }

    /// Context for a platform administrator
    pub fn admin(user_id: Snowflake) -> Self {
        Self::new(user_id, Capabilities::ADMINISTRATOR)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.capabilities.contains(Capabilities::ADMINISTRATOR)
    }

    /// Fail unless the caller is a platform administrator
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::MissingCapability(
                Capabilities::ADMINISTRATOR.label(),
            ))
        }
    }
}

/// Resolved role of a caller inside one community, highest wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommunityRole {
    None,
    Member,
    Artist,
    Manager,
    Admin,
}

impl CommunityRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Member => "MEMBER",
            Self::Artist => "ARTIST",
            Self::Manager => "MANAGER",
            Self::Admin => "ADMIN",
        }
    }
}

/// Everything known about a caller's standing in one community.
///
/// Built by the role service from the caller's `CommunityUser` row and any
/// artist/manager grants keyed by that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityAccess {
    pub community_id: Snowflake,
    pub community_user: Option<CommunityUser>,
    pub artist_id: Option<Snowflake>,
    pub manager_id: Option<Snowflake>,
    pub admin: bool,
}

impl CommunityAccess {
    /// Access for a caller with no `CommunityUser` row
    pub fn outsider(community_id: Snowflake, admin: bool) -> Self {
        Self {
            community_id,
            community_user: None,
            artist_id: None,
            manager_id: None,
            admin,
        }
    }

    pub fn role(&self) -> CommunityRole {
        if self.admin {
            CommunityRole::Admin
        } else if self.community_user.is_none() {
            CommunityRole::None
        } else if self.manager_id.is_some() {
            CommunityRole::Manager
        } else if self.artist_id.is_some() {
            CommunityRole::Artist
        } else {
            CommunityRole::Member
        }
    }

    /// Capability set inside this community.
    ///
    /// Grants are additive: an artist who is also a manager holds both.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        if self.community_user.is_some() {
            caps |= Capabilities::PARTICIPATE;
            if self.artist_id.is_some() {
                caps |= Capabilities::ARTIST;
            }
            if self.manager_id.is_some() {
                caps |= Capabilities::MANAGE_CONTENT;
            }
        }
        if self.admin {
            caps |= Capabilities::ADMINISTRATOR;
        }
        caps
    }

    #[inline]
    pub fn has(&self, required: Capabilities) -> bool {
        self.capabilities().has(required)
    }

    pub fn require(&self, required: Capabilities) -> Result<(), DomainError> {
        if self.has(required) {
            Ok(())
        } else {
            Err(DomainError::MissingCapability(required.label()))
        }
    }

    /// The caller's own membership row; administrators are not implicitly
    /// members, so they must join before authoring content.
    pub fn member(&self) -> Result<&CommunityUser, DomainError> {
        self.community_user
            .as_ref()
            .ok_or(DomainError::NotCommunityMember(self.community_id))
    }

    pub fn community_user_id(&self) -> Option<Snowflake> {
        self.community_user.as_ref().map(|cu| cu.id)
    }

    /// True if `community_user_id` is the caller's own membership row
    pub fn is_self(&self, community_user_id: Snowflake) -> bool {
        self.community_user_id() == Some(community_user_id)
    }

    #[inline]
    pub fn is_manager(&self) -> bool {
        self.community_user.is_some() && self.manager_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_row() -> CommunityUser {
        CommunityUser::new(
            Snowflake::new(10),
            Snowflake::new(1),
            Snowflake::new(3),
            "fan".to_string(),
        )
    }

    #[test]
    fn test_outsider_has_no_role() {
        let access = CommunityAccess::outsider(Snowflake::new(3), false);
        assert_eq!(access.role(), CommunityRole::None);
        assert!(access.capabilities().is_empty());
        assert!(matches!(
            access.member(),
            Err(DomainError::NotCommunityMember(_))
        ));
        assert!(access.require(Capabilities::PARTICIPATE).is_err());
    }

    #[test]
    fn test_role_precedence() {
        let mut access = CommunityAccess::outsider(Snowflake::new(3), false);
        access.community_user = Some(member_row());
        assert_eq!(access.role(), CommunityRole::Member);

        access.artist_id = Some(Snowflake::new(20));
        assert_eq!(access.role(), CommunityRole::Artist);

        access.manager_id = Some(Snowflake::new(30));
        assert_eq!(access.role(), CommunityRole::Manager);
        assert!(access.has(Capabilities::ARTIST | Capabilities::MANAGE_CONTENT));

        access.admin = true;
        assert_eq!(access.role(), CommunityRole::Admin);
    }

    #[test]
    fn test_admin_outsider_passes_checks_but_is_not_member() {
        let access = CommunityAccess::outsider(Snowflake::new(3), true);
        assert!(access.require(Capabilities::MANAGE_CONTENT).is_ok());
        assert!(access.member().is_err());
    }

    #[test]
    fn test_auth_context_admin() {
        assert!(AuthContext::admin(Snowflake::new(1)).require_admin().is_ok());
        assert!(AuthContext::user(Snowflake::new(1)).require_admin().is_err());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        let json = serde_json::to_string(&CommunityRole::Manager).unwrap();
        assert_eq!(json, "\"MANAGER\"");
    }
}

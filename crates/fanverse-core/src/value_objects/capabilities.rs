//! Capability flags resolved per request and per community

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::fmt;

bitflags! {
    /// What a caller may do.
    ///
    /// Platform-wide flags (only `ADMINISTRATOR` today) live in
    /// [`AuthContext`](super::AuthContext); community-scoped flags are produced
    /// by [`CommunityAccess`](super::CommunityAccess).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Post, comment, like and pay for membership in a community
        const PARTICIPATE    = 1 << 0;
        /// Posts are attributed to an artist; may host live listings
        const ARTIST         = 1 << 1;
        /// Moderate others' content, run notices, media and the storefront
        const MANAGE_CONTENT = 1 << 2;
        /// Passes every capability check
        const ADMINISTRATOR  = 1 << 3;

        const MEMBER = Self::PARTICIPATE.bits();
        const ARTIST_MEMBER = Self::PARTICIPATE.bits() | Self::ARTIST.bits();
        const MANAGER = Self::PARTICIPATE.bits() | Self::MANAGE_CONTENT.bits();
    }
}

impl Capabilities {
    /// Check a required capability. Administrators bypass every check.
    #[inline]
    pub fn has(&self, required: Capabilities) -> bool {
        if self.contains(Capabilities::ADMINISTRATOR) {
            return true;
        }
        self.contains(required)
    }

    /// Names of the individual flags that are set
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }

    /// Name of a single flag, used in permission-denied errors
    pub fn label(&self) -> String {
        let names = self.names();
        if names.is_empty() {
            "NONE".to_string()
        } else {
            names.join("|")
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::empty()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Capabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter_names().map(|(name, _)| name))
    }
}

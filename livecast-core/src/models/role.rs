//! Participant roles and room ownership.
//!
//! Exactly one role variant is active per session at any time. Transitions
//! only move audience ⇄ broadcaster; the owner role is fixed at room
//! creation and never produced by the transition engine.

use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::permission::PermissionBits;

/// Identity info carried by every role variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: UserId,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Attributes common to all role variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAttrs {
    pub user: UserInfo,
    /// Numeric id this participant publishes (or would publish) under
    pub stream_id: u64,
    /// Rank on the room's gift leaderboard
    pub gift_rank: u32,
}

/// The capability variant a participant holds in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    /// Room owner; full permissions are implicit
    Owner(RoleAttrs),
    /// Publishing guest with an explicit permission set
    Broadcaster {
        #[serde(flatten)]
        attrs: RoleAttrs,
        permissions: PermissionBits,
    },
    /// Viewer; holds no permission set
    Audience(RoleAttrs),
}

impl Role {
    #[must_use]
    pub const fn attrs(&self) -> &RoleAttrs {
        match self {
            Self::Owner(attrs) | Self::Audience(attrs) => attrs,
            Self::Broadcaster { attrs, .. } => attrs,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &UserInfo {
        &self.attrs().user
    }

    #[must_use]
    pub const fn stream_id(&self) -> u64 {
        self.attrs().stream_id
    }

    #[must_use]
    pub const fn gift_rank(&self) -> u32 {
        self.attrs().gift_rank
    }

    /// Effective permission set. Implicitly full for the owner, empty for
    /// the audience.
    #[must_use]
    pub const fn permissions(&self) -> PermissionBits {
        match self {
            Self::Owner(_) => PermissionBits(PermissionBits::ALL),
            Self::Broadcaster { permissions, .. } => *permissions,
            Self::Audience(_) => PermissionBits::empty(),
        }
    }

    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self, Self::Owner(_))
    }

    #[must_use]
    pub const fn is_broadcaster(&self) -> bool {
        matches!(self, Self::Broadcaster { .. })
    }

    #[must_use]
    pub const fn is_audience(&self) -> bool {
        matches!(self, Self::Audience(_))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Owner(_) => "owner",
            Self::Broadcaster { .. } => "broadcaster",
            Self::Audience(_) => "audience",
        }
    }
}

/// The room's owner record, tagged by whether the owner identity is the
/// current client or a remote party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "locality", rename_all = "lowercase")]
pub enum RoomOwner {
    Local(Role),
    Remote(Role),
}

impl RoomOwner {
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    #[must_use]
    pub const fn role(&self) -> &Role {
        match self {
            Self::Local(role) | Self::Remote(role) => role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(user_id: &str) -> RoleAttrs {
        RoleAttrs {
            user: UserInfo {
                user_id: UserId::from(user_id),
                nickname: "nick".to_string(),
                avatar_url: None,
            },
            stream_id: 42,
            gift_rank: 3,
        }
    }

    #[test]
    fn test_owner_permissions_implicit() {
        let role = Role::Owner(attrs("u1"));
        assert!(role.permissions().has_all(PermissionBits::ALL));
        assert!(role.is_owner());
    }

    #[test]
    fn test_audience_permissions_empty() {
        let role = Role::Audience(attrs("u1"));
        assert!(role.permissions().is_empty());
        assert_eq!(role.kind(), "audience");
    }

    #[test]
    fn test_broadcaster_carries_explicit_set() {
        let role = Role::Broadcaster {
            attrs: attrs("u1"),
            permissions: PermissionBits(PermissionBits::PUBLISH),
        };
        assert!(role.permissions().has_all(PermissionBits::PUBLISH));
        assert!(!role.permissions().has(PermissionBits::SEND_GIFT));
        assert_eq!(role.stream_id(), 42);
        assert_eq!(role.gift_rank(), 3);
    }

    #[test]
    fn test_room_owner_locality() {
        let local = RoomOwner::Local(Role::Owner(attrs("me")));
        let remote = RoomOwner::Remote(Role::Owner(attrs("them")));
        assert!(local.is_local());
        assert!(!remote.is_local());
        assert_eq!(remote.role().user().user_id.as_str(), "them");
    }
}

//! In-room capability bitmask.
//!
//! A 64-bit permission set carried by broadcaster roles. The backend sends
//! permissions as an array of names; unknown names are ignored so older
//! clients keep working when the backend grows new capabilities.

use serde::{Deserialize, Serialize};

/// 64-bit permission bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PermissionBits(pub u64);

impl PermissionBits {
    // ===== Publish permissions =====

    /// Publish video from the camera
    pub const CAMERA: u64 = 1 << 0;

    /// Publish audio from the microphone
    pub const MICROPHONE: u64 = 1 << 1;

    /// Publish a screen-share track
    pub const SCREEN_SHARE: u64 = 1 << 2;

    // ===== Interaction permissions =====

    /// Send chat messages
    pub const SEND_CHAT: u64 = 1 << 10;

    /// Send gifts
    pub const SEND_GIFT: u64 = 1 << 11;

    // ===== Combinations =====

    /// The minimum a broadcaster must hold
    pub const PUBLISH: u64 = Self::CAMERA | Self::MICROPHONE;

    /// All permissions (implicit for the room owner)
    pub const ALL: u64 = u64::MAX;

    pub const NONE: u64 = 0;

    #[must_use]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(Self::NONE)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == Self::NONE
    }

    /// Check if has specific permission
    #[must_use]
    pub const fn has(&self, permission: u64) -> bool {
        (self.0 & permission) != 0
    }

    /// Check if has all specified permissions
    #[must_use]
    pub const fn has_all(&self, permissions: u64) -> bool {
        (self.0 & permissions) == permissions
    }

    /// Check if this set contains every permission of `other`
    #[must_use]
    pub const fn is_superset_of(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Add permission
    pub const fn grant(&mut self, permission: u64) {
        self.0 |= permission;
    }

    /// Remove permission
    pub const fn revoke(&mut self, permission: u64) {
        self.0 &= !permission;
    }

    /// Map a permission name from a backend payload to its bit, if known
    #[must_use]
    pub fn bit_for_name(name: &str) -> Option<u64> {
        match name {
            "camera" => Some(Self::CAMERA),
            "mic" | "microphone" => Some(Self::MICROPHONE),
            "screen_share" => Some(Self::SCREEN_SHARE),
            "chat" => Some(Self::SEND_CHAT),
            "gift" => Some(Self::SEND_GIFT),
            _ => None,
        }
    }

    /// Build a set from payload names, ignoring names this client does not
    /// know about
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut bits = Self::empty();
        for name in names {
            if let Some(bit) = Self::bit_for_name(name) {
                bits.grant(bit);
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_has() {
        let perms = PermissionBits(PermissionBits::CAMERA);
        assert!(perms.has(PermissionBits::CAMERA));
        assert!(!perms.has(PermissionBits::MICROPHONE));
    }

    #[test]
    fn test_permission_grant_revoke() {
        let mut perms = PermissionBits::empty();
        perms.grant(PermissionBits::CAMERA);
        perms.grant(PermissionBits::SEND_CHAT);

        assert!(perms.has(PermissionBits::CAMERA));
        assert!(perms.has(PermissionBits::SEND_CHAT));

        perms.revoke(PermissionBits::CAMERA);
        assert!(!perms.has(PermissionBits::CAMERA));
        assert!(perms.has(PermissionBits::SEND_CHAT));
    }

    #[test]
    fn test_publish_requires_camera_and_microphone() {
        let mut perms = PermissionBits(PermissionBits::CAMERA);
        assert!(!perms.has_all(PermissionBits::PUBLISH));

        perms.grant(PermissionBits::MICROPHONE);
        assert!(perms.has_all(PermissionBits::PUBLISH));
    }

    #[test]
    fn test_superset() {
        let small = PermissionBits(PermissionBits::SEND_CHAT);
        let mut big = small;
        big.grant(PermissionBits::PUBLISH);

        assert!(big.is_superset_of(small));
        assert!(!small.is_superset_of(big));
    }

    #[test]
    fn test_from_names_ignores_unknown() {
        let perms = PermissionBits::from_names(["camera", "mic", "hologram"]);
        assert!(perms.has_all(PermissionBits::PUBLISH));
        assert_eq!(perms, PermissionBits(PermissionBits::PUBLISH));
    }
}

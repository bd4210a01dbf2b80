//! One-time payload handed to the caller when a join completes.
//!
//! None of this is retained by the core; the caller consumes it and the
//! session keeps only its role/owner state.

use serde::{Deserialize, Serialize};

use super::id::{RoomId, UserId};

/// A guest seat in a multi/virtual room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub index: u32,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub locked: bool,
}

/// Battle info for a pk room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkInfo {
    pub pk_id: String,
    pub rival_room_id: RoomId,
    /// Unix timestamp at which the battle ends, when already scheduled
    #[serde(default)]
    pub ends_at: Option<i64>,
}

/// Reference to the virtual-appearance asset the client should load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualAppearance {
    pub asset_id: String,
    #[serde(default)]
    pub asset_url: Option<String>,
}

/// One row of the room's gift leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftRankEntry {
    pub user_id: UserId,
    pub nickname: String,
    pub amount: u64,
}

/// Everything room-specific a successful join reports back.
///
/// Field presence is conditioned on the session's [`LiveType`] and local
/// role; see the orchestrator's assembly rules.
///
/// [`LiveType`]: super::live::LiveType
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct JoinedInfo {
    /// Present for multi and virtual rooms
    pub seats: Option<Vec<SeatInfo>>,
    /// Present for pk rooms
    pub pk: Option<PkInfo>,
    /// Present for virtual rooms when the local role is not audience
    pub virtual_appearance: Option<VirtualAppearance>,
    /// Best-effort: absent whenever the backend omits or garbles it
    pub gift_audience: Option<Vec<GiftRankEntry>>,
}

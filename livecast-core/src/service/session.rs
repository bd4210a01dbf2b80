//! Session aggregate: one live-room participation for one client.
//!
//! The session's mutable state (role, owner, phase) is written by the
//! orchestrator, the transition engine and the event relay, and read by
//! everyone else; a single `RwLock` enforces the single-writer-many-reader
//! discipline since the relay's callback arrives on the messaging
//! transport's delivery thread.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::{broadcast, watch, Mutex};

use crate::models::{LiveType, Role, RoomId, RoomOwner, RoomSettings};
use crate::transport::ChannelStats;

/// Events delivered per session; slow subscribers lose the oldest first.
const EVENT_BUFFER: usize = 32;

/// Lifecycle phase. A session never returns to `Created`; joining again
/// requires constructing a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Joined,
    Left,
}

/// Outward-observable session events.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The broadcast was ended by the room
    Ended,
    /// A new owner was announced. Carries the announced owner even when the
    /// session-level owner record was not replaced.
    OwnerUpdated(Role),
}

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) phase: SessionPhase,
    pub(crate) role: Option<Role>,
    pub(crate) owner: Option<RoomOwner>,
    pub(crate) stats: Option<watch::Receiver<ChannelStats>>,
}

/// Aggregate tracking one live room participation for one client.
///
/// Owned by the caller that created it; not shared across sessions, and not
/// safe for two orchestrators at once — exactly one create/join/leave
/// sequence may be in flight at a time.
#[derive(Debug)]
pub struct Session {
    room_id: RoomId,
    live_type: LiveType,
    settings: RoomSettings,
    created_at: DateTime<Utc>,
    pub(crate) state: RwLock<SessionState>,
    /// Serializes lifecycle operations on this session
    pub(crate) op_lock: Mutex<()>,
    pub(crate) events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub(crate) fn new(room_id: RoomId, live_type: LiveType, settings: RoomSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            room_id,
            live_type,
            settings,
            created_at: Utc::now(),
            state: RwLock::new(SessionState {
                phase: SessionPhase::Created,
                role: None,
                owner: None,
                stats: None,
            }),
            op_lock: Mutex::new(()),
            events,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[must_use]
    pub fn live_type(&self) -> LiveType {
        self.live_type
    }

    #[must_use]
    pub fn settings(&self) -> &RoomSettings {
        &self.settings
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase
    }

    #[must_use]
    pub fn is_joined(&self) -> bool {
        self.phase() == SessionPhase::Joined
    }

    /// The local participant's current role; absent before join and after
    /// leave.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.state.read().role.clone()
    }

    /// The room's owner record, set once per join.
    #[must_use]
    pub fn owner(&self) -> Option<RoomOwner> {
        self.state.read().owner.clone()
    }

    /// Live channel statistics; available once the media join completed.
    #[must_use]
    pub fn statistics(&self) -> Option<watch::Receiver<ChannelStats>> {
        self.state.read().stats.clone()
    }

    /// Subscribe to session events ("ended", "owner updated").
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaQuality;

    #[test]
    fn test_new_session_is_unjoined() {
        let session = Session::new(
            RoomId::from("r1".to_string()),
            LiveType::Single,
            RoomSettings::new("my room", MediaQuality::Standard),
        );

        assert_eq!(session.phase(), SessionPhase::Created);
        assert!(!session.is_joined());
        assert!(session.role().is_none());
        assert!(session.owner().is_none());
        assert!(session.statistics().is_none());
        assert_eq!(session.room_id().as_str(), "r1");
        assert_eq!(session.live_type(), LiveType::Single);
    }

    #[test]
    fn test_event_subscription_receives_broadcasts() {
        let session = Session::new(
            RoomId::from("r1".to_string()),
            LiveType::Single,
            RoomSettings::titled("my room"),
        );

        let mut rx = session.subscribe();
        session.events.send(SessionEvent::Ended).unwrap();
        assert!(matches!(rx.try_recv().unwrap(), SessionEvent::Ended));
    }
}

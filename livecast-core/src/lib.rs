//! Live-broadcast session core.
//!
//! Coordinates one client's participation in a multi-party live room by
//! sequencing three independently-failing collaborators — a signalling
//! backend, a real-time media transport, and a real-time messaging channel —
//! into a single consistent session lifecycle. Exposes a small role state
//! machine (audience ⇄ broadcaster, local vs. remote owner) that other
//! components observe through event streams.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result, Subsystem};
pub use models::{
    JoinedInfo, LiveType, MediaQuality, PermissionBits, Role, RoleAttrs, RoomOwner, RoomSettings,
    StreamProfile, UserInfo,
};
pub use service::{
    EventRelay, RoleTransitionEngine, Session, SessionEvent, SessionOrchestrator, SessionPhase,
};

//! Join/leave orchestration: the session lifecycle state machine.
//!
//! `join` is a four-stage handshake — signalling, role/owner hydration,
//! media, messaging — with strictly sequential stages and abort on the
//! first failure. The single compensating action is leaving the media
//! transport when the messaging join fails: an orphaned media connection
//! without a control channel is unusable. `leave` is the opposite policy,
//! unconditional and best-effort, and never surfaces an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::payload;
use crate::models::{JoinedInfo, LiveType, Role, RoomId, RoomOwner, RoomSettings};
use crate::transport::{
    signalling, IdentityProvider, MediaTransport, MessagingTransport, SignallingClient,
};

use super::session::{Session, SessionPhase};

/// Sequences the signalling backend, media transport and messaging channel
/// into one consistent session lifecycle.
#[derive(Clone)]
pub struct SessionOrchestrator {
    signalling: Arc<dyn SignallingClient>,
    media: Arc<dyn MediaTransport>,
    messaging: Arc<dyn MessagingTransport>,
    identity: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for SessionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOrchestrator").finish()
    }
}

impl SessionOrchestrator {
    pub fn new(
        signalling: Arc<dyn SignallingClient>,
        media: Arc<dyn MediaTransport>,
        messaging: Arc<dyn MessagingTransport>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            signalling,
            media,
            messaging,
            identity,
        }
    }

    /// Register a new room with the backend and build the not-yet-joined
    /// session for it. Single attempt; retrying is the caller's decision.
    pub async fn create(
        &self,
        settings: RoomSettings,
        live_type: LiveType,
        extra_params: Map<String, Value>,
    ) -> Result<Session> {
        let mut params = extra_params;
        params.insert("room_name".to_string(), Value::from(settings.title.clone()));
        params.insert("live_type".to_string(), Value::from(live_type.as_str()));

        let response = self
            .signalling
            .perform(signalling::CREATE_ROOM, HashMap::new(), params)
            .await?;
        let room_id = payload::require_str(&response, "room_id")?.to_string();

        info!(room_id = %room_id, live_type = %live_type, "room created");
        Ok(Session::new(RoomId::from(room_id), live_type, settings))
    }

    /// Bring the session into the room.
    ///
    /// Runs on a spawned task so that a caller abandoning this future does
    /// not orphan half-open connections: in-flight stages finish and a
    /// compensating [`leave`](Self::leave) is performed instead.
    pub async fn join(&self, session: &Arc<Session>) -> Result<JoinedInfo> {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();

        let task = tokio::spawn({
            let this = self.clone();
            let session = Arc::clone(session);
            let token = token.clone();
            async move {
                let result = this.run_join(&session).await;
                if token.is_cancelled() {
                    warn!(room_id = %session.room_id(), "join abandoned by caller, tearing down");
                    // Error paths roll back their own transports before
                    // returning; only a completed join holds connections.
                    if result.is_ok() {
                        this.leave(&session).await;
                    }
                }
                result
            }
        });

        let result = task
            .await
            .map_err(|e| Error::Internal(format!("join task failed: {e}")))?;
        drop(guard.disarm());
        result
    }

    async fn run_join(&self, session: &Arc<Session>) -> Result<JoinedInfo> {
        let _op = session
            .op_lock
            .try_lock()
            .map_err(|_| Error::ContractViolation("another session operation is in flight".into()))?;
        match session.phase() {
            SessionPhase::Created => {}
            SessionPhase::Joined => {
                return Err(Error::ContractViolation("session already joined".into()))
            }
            SessionPhase::Left => {
                return Err(Error::ContractViolation(
                    "session already left; construct a new session".into(),
                ))
            }
        }

        // Stage 1: signalling join
        let mut params = Map::new();
        params.insert("room_id".to_string(), Value::from(session.room_id().as_str()));
        let response = self
            .signalling
            .perform(signalling::JOIN_ROOM, HashMap::new(), params)
            .await?;
        let user = payload::require_object(&response, "user")?;
        let room = payload::require_object(&response, "room")?;

        // Stage 2a: hydrate the local role
        let role = payload::decode_user_role(user)?;

        // Stage 2b: validate the live type, hydrate the owner. The REST
        // join has already happened server-side; a mismatch aborts with no
        // automatic rollback, leaving is the caller's call.
        let server_type = payload::decode_live_type(room)?;
        if server_type != session.live_type() {
            return Err(Error::Protocol(format!(
                "declared type `{}` does not match server type `{server_type}`",
                session.live_type()
            )));
        }
        let owner_role = payload::decode_owner_role(payload::require_object(room, "owner")?)?;
        let owner = if owner_role.user().user_id == self.identity.current_user_id() {
            RoomOwner::Local(owner_role)
        } else {
            RoomOwner::Remote(owner_role)
        };

        // Stage 2c: validate the per-type payload. This must precede the
        // transport joins: past this point the only failure left is the
        // messaging join, whose rollback is below.
        let joined = assemble_joined_info(session.live_type(), &role, &response)?;

        // Stage 3: media join
        let media_token = payload::require_str(user, "media_token")?;
        let channel = payload::require_str(room, "channel")?;
        self.media
            .configure_outbound(session.settings().quality.profile());
        self.media
            .join(channel, media_token, role.stream_id())
            .await?;

        // Stage 4: messaging join, with the one compensating rollback
        if let Err(err) = self.messaging.join_channel(channel).await {
            if let Err(media_err) = self.media.leave().await {
                warn!(error = %media_err, "media leave after messaging failure also failed");
            }
            return Err(err);
        }

        {
            let mut state = session.state.write();
            state.role = Some(role.clone());
            state.owner = Some(owner);
            state.stats = Some(self.media.statistics());
            state.phase = SessionPhase::Joined;
        }
        info!(room_id = %session.room_id(), role = role.kind(), "session joined");
        Ok(joined)
    }

    /// Unconditional best-effort teardown. Never returns an error; every
    /// step runs even when an earlier one fails, and running it again on an
    /// already-left session re-attempts every step.
    pub async fn leave(&self, session: &Session) {
        let _op = session.op_lock.lock().await;
        {
            let mut state = session.state.write();
            state.role = None;
            state.phase = SessionPhase::Left;
        }

        if let Err(err) = self.media.leave().await {
            warn!(error = %err, "media leave failed");
        }
        self.media.set_audio_enabled(false);
        if let Err(err) = self.media.set_video_enabled(false) {
            warn!(error = %err, "video disable failed");
        }
        if let Err(err) = self.messaging.leave_channel().await {
            warn!(error = %err, "messaging leave failed");
        }

        // Fire-and-forget bookkeeping; the backend reaps us anyway if this
        // never arrives.
        let mut params = Map::new();
        params.insert("room_id".to_string(), Value::from(session.room_id().as_str()));
        if let Err(err) = self
            .signalling
            .perform(signalling::LEAVE_ROOM, HashMap::new(), params)
            .await
        {
            warn!(error = %err, "leave notification failed");
        }

        info!(room_id = %session.room_id(), "session left");
    }
}

/// Build the one-time join payload, conditioned on the live type and the
/// local role. Seats, pk and virtual-appearance data are hard requirements
/// where applicable; the gift leaderboard is best-effort.
fn assemble_joined_info(live_type: LiveType, role: &Role, response: &Value) -> Result<JoinedInfo> {
    let seats = if live_type.has_seats() {
        let value = response
            .get("seats")
            .ok_or_else(|| Error::malformed("`seats` is missing"))?;
        Some(
            serde_json::from_value(value.clone())
                .map_err(|e| Error::malformed(format!("`seats`: {e}")))?,
        )
    } else {
        None
    };

    let pk = if live_type == LiveType::Pk {
        let value = response
            .get("pk")
            .ok_or_else(|| Error::malformed("`pk` is missing"))?;
        Some(
            serde_json::from_value(value.clone())
                .map_err(|e| Error::malformed(format!("`pk`: {e}")))?,
        )
    } else {
        None
    };

    let virtual_appearance = if live_type == LiveType::Virtual && !role.is_audience() {
        let value = response
            .get("virtual_appearance")
            .ok_or_else(|| Error::malformed("`virtual_appearance` is missing"))?;
        Some(
            serde_json::from_value(value.clone())
                .map_err(|e| Error::malformed(format!("`virtual_appearance`: {e}")))?,
        )
    } else {
        None
    };

    let gift_audience = response
        .get("gift_audience")
        .and_then(|value| serde_json::from_value(value.clone()).ok());

    Ok(JoinedInfo {
        seats,
        pk,
        virtual_appearance,
        gift_audience,
    })
}

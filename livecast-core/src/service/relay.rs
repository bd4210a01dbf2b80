//! Inbound messaging events turned into outward session events.
//!
//! Peer traffic is lossy by nature: anything without a recognizable command
//! tag, and any payload that fails to decode, is dropped without becoming an
//! error. The relay writes `session.owner` from the transport's delivery
//! thread, which is why the session state sits behind a lock.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use crate::models::{payload, ObserverId, RoomOwner};
use crate::transport::MessagingTransport;

use super::session::{Session, SessionEvent};

/// Command tag announcing the end of the broadcast.
const CMD_LIVE_END: &str = "liveEnd";
/// Command tag announcing a new room owner.
const CMD_OWNER: &str = "owner";

/// Bridges the messaging transport's inbound stream to session events for
/// the lifetime of one session. Dropping the relay unregisters the observer,
/// so no callback can outlive the session it mutates.
pub struct EventRelay {
    session: Arc<Session>,
    messaging: Arc<dyn MessagingTransport>,
    observer: ObserverId,
}

impl std::fmt::Debug for EventRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRelay")
            .field("observer", &self.observer)
            .finish()
    }
}

impl EventRelay {
    /// Subscribe to the messaging inbound stream on behalf of `session`.
    pub fn attach(messaging: Arc<dyn MessagingTransport>, session: Arc<Session>) -> Self {
        let observer = ObserverId::new();
        let handler = {
            let session = Arc::clone(&session);
            Box::new(move |message: Value| dispatch(&session, &message))
        };
        messaging.subscribe(observer.clone(), handler);
        Self {
            session,
            messaging,
            observer,
        }
    }

    /// The outward event stream for this relay's session.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }
}

impl Drop for EventRelay {
    fn drop(&mut self) {
        self.messaging.unsubscribe(&self.observer);
    }
}

fn dispatch(session: &Session, message: &Value) {
    let Some(cmd) = message.get("cmd").and_then(Value::as_str) else {
        debug!("dropping inbound message without `cmd` tag");
        return;
    };

    match cmd {
        CMD_LIVE_END => {
            let _ = session.events.send(SessionEvent::Ended);
        }
        CMD_OWNER => {
            let Some(owner_payload) = message.get("owner") else {
                debug!("dropping owner announcement without `owner` payload");
                return;
            };
            let Ok(announced) = payload::decode_owner_role(owner_payload) else {
                debug!("dropping undecodable owner announcement");
                return;
            };

            {
                let mut state = session.state.write();
                // The local identity is authoritative: a remote announcement
                // never displaces a local owner.
                let owner_is_local = state.owner.as_ref().is_some_and(RoomOwner::is_local);
                if !owner_is_local {
                    state.owner = Some(RoomOwner::Remote(announced.clone()));
                }
            }
            // The announcement is observable whether or not it replaced the
            // session-level record.
            let _ = session.events.send(SessionEvent::OwnerUpdated(announced));
        }
        _ => {}
    }
}

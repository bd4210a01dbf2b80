//! Audience ⇄ broadcaster transitions.
//!
//! The owner role never passes through here; it is fixed when the room is
//! created. Calling a transition from the wrong starting role is a caller
//! bug and reported as a contract violation before any capture toggling
//! happens.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{PermissionBits, Role};
use crate::transport::MediaTransport;

use super::session::Session;

pub struct RoleTransitionEngine {
    media: Arc<dyn MediaTransport>,
}

impl std::fmt::Debug for RoleTransitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleTransitionEngine").finish()
    }
}

impl RoleTransitionEngine {
    pub fn new(media: Arc<dyn MediaTransport>) -> Self {
        Self { media }
    }

    /// Promote the local audience member to broadcaster.
    ///
    /// Enables capture, extends the permission set with exactly camera and
    /// microphone, and reconfigures the outbound stream from the session
    /// settings. Identity, stream id and gift rank carry over.
    pub fn audience_to_broadcaster(&self, session: &Session) -> Result<Role> {
        let current = session
            .role()
            .ok_or_else(|| Error::ContractViolation("no role: session is not joined".into()))?;
        let base_permissions = current.permissions();
        let attrs = match current {
            Role::Audience(attrs) => attrs,
            other => {
                return Err(Error::ContractViolation(format!(
                    "audience_to_broadcaster requires an audience role, found {}",
                    other.kind()
                )))
            }
        };

        self.media.set_audio_enabled(true);
        if let Err(err) = self.media.set_video_enabled(true) {
            // Never leave a hot microphone behind a camera that failed.
            self.media.set_audio_enabled(false);
            return Err(err);
        }

        let mut permissions = base_permissions;
        permissions.grant(PermissionBits::PUBLISH);
        self.media
            .configure_outbound(session.settings().quality.profile());

        let role = Role::Broadcaster { attrs, permissions };
        session.state.write().role = Some(role.clone());
        debug!(user_id = %role.user().user_id, "promoted to broadcaster");
        Ok(role)
    }

    /// Demote the local broadcaster back to audience.
    ///
    /// Disables capture and drops the permission set entirely; identity,
    /// stream id and gift rank carry over.
    pub fn broadcaster_to_audience(&self, session: &Session) -> Result<Role> {
        let current = session
            .role()
            .ok_or_else(|| Error::ContractViolation("no role: session is not joined".into()))?;
        let attrs = match current {
            Role::Broadcaster { attrs, .. } => attrs,
            other => {
                return Err(Error::ContractViolation(format!(
                    "broadcaster_to_audience requires a broadcaster role, found {}",
                    other.kind()
                )))
            }
        };

        self.media.set_audio_enabled(false);
        if let Err(err) = self.media.set_video_enabled(false) {
            warn!(error = %err, "video disable failed during demotion");
        }

        let role = Role::Audience(attrs);
        session.state.write().role = Some(role.clone());
        debug!(user_id = %role.user().user_id, "demoted to audience");
        Ok(role)
    }
}

//! Control/presence messaging seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::ObserverId;

/// Inbound-message callback. Invoked on whatever thread the transport
/// delivers on; implementations must not assume a runtime context.
pub type MessageHandler = Box<dyn Fn(Value) + Send + Sync>;

/// Real-time control/presence channel collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    async fn join_channel(&self, name: &str) -> Result<()>;

    async fn leave_channel(&self) -> Result<()>;

    /// Register an inbound-message observer under the given identity.
    fn subscribe(&self, observer: ObserverId, handler: MessageHandler);

    /// Remove a previously registered observer. Unknown identities are a
    /// no-op.
    fn unsubscribe(&self, observer: &ObserverId);
}

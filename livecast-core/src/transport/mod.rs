//! Collaborator seams consumed by the session core.
//!
//! All four are object-safe traits so callers can hand in production
//! implementations or test doubles behind `Arc<dyn _>`.

pub mod identity;
pub mod media;
pub mod messaging;
pub mod signalling;

pub use identity::IdentityProvider;
pub use media::{ChannelStats, MediaTransport};
pub use messaging::{MessageHandler, MessagingTransport};
pub use signalling::{Method, Operation, SignallingClient};

#[cfg(test)]
pub(crate) use identity::MockIdentityProvider;
#[cfg(test)]
pub(crate) use media::MockMediaTransport;
#[cfg(test)]
pub(crate) use messaging::MockMessagingTransport;
#[cfg(test)]
pub(crate) use signalling::MockSignallingClient;

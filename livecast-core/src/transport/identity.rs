//! Authenticated-user identity seam.

use crate::models::UserId;

/// Answers "who am I" for the current client. Ownership locality is decided
/// against this identity, never computed by the core itself.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> UserId;
}

use thiserror::Error;

/// The collaborator a transport failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Signalling,
    Media,
    Messaging,
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signalling => write!(f, "signalling"),
            Self::Media => write!(f, "media"),
            Self::Messaging => write!(f, "messaging"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// A signalling, media, or messaging call failed. Surfaced as-is; the
    /// core never retries on its own.
    #[error("{subsystem} transport error: {message}")]
    Transport { subsystem: Subsystem, message: String },

    /// A required field was missing or mistyped in a parsed payload.
    #[error("malformed response: {context}")]
    MalformedResponse { context: String },

    /// The backend disagrees with the session about its own state.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A caller violated an operation precondition. Indicates a bug in the
    /// calling code, not a recoverable runtime condition.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn transport(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::Transport {
            subsystem,
            message: message.into(),
        }
    }

    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

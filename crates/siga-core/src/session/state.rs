//! Session state: credentials plus the phase of the login attempt.

use crate::identity::{Credentials, Identity};

/// Phase of the current login attempt.
///
/// The enum makes the session invariants structural: an identity and an error
/// message can never coexist, and "submitting" excludes both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No attempt in flight, nothing resolved.
    #[default]
    Idle,
    /// A gateway call is outstanding.
    Submitting,
    /// The gateway accepted the credentials.
    Succeeded(Identity),
    /// The gateway rejected the attempt; the message stays visible until the
    /// next submit.
    Failed(String),
}

/// The single source of truth for the login flow.
///
/// Owned exclusively by one [`super::SessionController`]; everything else
/// observes snapshots through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub credentials: Credentials,
    pub(crate) phase: SessionPhase,
}

impl SessionState {
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// True only between a submit request and its resolution.
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitting)
    }

    /// The authenticated identity, present only after success.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.phase {
            SessionPhase::Succeeded(identity) => Some(identity),
            _ => None,
        }
    }

    /// The failure message, present only after a failed attempt.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

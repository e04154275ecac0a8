//! Auth gateway seam.
//!
//! The session flow depends on a single external capability: exchanging a
//! username/password pair for an [`Identity`]. The concrete transport lives
//! behind the [`AuthGateway`] trait; the session controller only ever sees
//! `Arc<dyn AuthGateway>`. [`RosterGateway`] is the in-process implementation
//! used by the shell and tests.

mod roster;

use std::fmt;

use async_trait::async_trait;

use crate::identity::Identity;

pub use roster::{RosterAccount, RosterGateway};

/// Categories of authentication failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The identity provider rejected the credentials.
    InvalidCredentials,
    /// The provider could not be reached.
    Network,
    /// The provider answered with a server-side failure.
    Server,
    /// Anything the gateway could not classify.
    Unknown,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::InvalidCredentials => write!(f, "invalid_credentials"),
            AuthErrorKind::Network => write!(f, "network"),
            AuthErrorKind::Server => write!(f, "server"),
            AuthErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Structured authentication failure with kind and display message.
///
/// All failures surface to the user through the same `Failed` session state;
/// the kind exists for gateway implementors and tests, not for UI branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The credentials were rejected by the provider.
    pub fn invalid_credentials() -> Self {
        Self::new(
            AuthErrorKind::InvalidCredentials,
            "Usuario o contraseña incorrectos",
        )
    }

    /// The provider could not be reached.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Network, message)
    }

    /// The provider answered with a server-side failure.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Server, message)
    }

    /// Unclassified failure.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unknown, message)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// External capability that verifies credentials and returns an [`Identity`].
///
/// Implementations must be side-effect free with respect to session state:
/// the controller owns all state transitions and treats the gateway call as
/// its only suspension point.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
}

//! Roster-backed auth gateway.
//!
//! Verifies credentials against a fixed set of accounts loaded from config.
//! This is the concrete collaborator the shell runs against; a real
//! identity-provider transport would implement [`AuthGateway`] the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthGateway};
use crate::identity::Identity;

/// One account row as it appears in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAccount {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub profile_name: String,
    #[serde(default)]
    pub email: String,
}

impl RosterAccount {
    fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            profile_name: self.profile_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// In-process gateway over a fixed account roster.
pub struct RosterGateway {
    accounts: Vec<RosterAccount>,
}

impl RosterGateway {
    pub fn new(accounts: Vec<RosterAccount>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl AuthGateway for RosterGateway {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        // Unknown user and wrong password are indistinguishable on purpose.
        self.accounts
            .iter()
            .find(|account| account.username == username && account.password == password)
            .map(RosterAccount::identity)
            .ok_or_else(AuthError::invalid_credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthErrorKind;

    fn roster() -> RosterGateway {
        RosterGateway::new(vec![RosterAccount {
            username: "mavina".to_string(),
            password: "sigo2024".to_string(),
            full_name: "Marco Antonio Aviña Jimenez".to_string(),
            profile_name: "Alumno".to_string(),
            email: "marco@sigo.example".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_known_account_authenticates() {
        let identity = roster().authenticate("mavina", "sigo2024").await.unwrap();
        assert_eq!(identity.username, "mavina");
        assert_eq!(identity.full_name, "Marco Antonio Aviña Jimenez");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let err = roster().authenticate("mavina", "nope").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_indistinguishable_from_wrong_password() {
        let gateway = roster();
        let unknown = gateway.authenticate("ghost", "sigo2024").await.unwrap_err();
        let wrong = gateway.authenticate("mavina", "nope").await.unwrap_err();
        assert_eq!(unknown, wrong);
    }

    #[tokio::test]
    async fn test_empty_credentials_are_rejected_by_the_gateway() {
        // The controller does not validate locally; the roster rejects here.
        let err = roster().authenticate("", "").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
    }
}

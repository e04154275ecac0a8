//! Navigation router: maps session signals and user intents to the active
//! screen plus its identity payload.
//!
//! The router owns a screen stack rooted at the login screen. Payload-carrying
//! screens hold their own copy of the identity, so nothing downstream can
//! mutate the session's view of who is logged in.
//!
//! Navigating to an authenticated screen without an identity is a contract
//! violation, not a runtime condition: it asserts in development builds and
//! is logged and refused in release builds (the stack stays unchanged).

use std::fmt;

use crate::identity::Identity;

/// The screens of the shell. `Welcome` and `Profile` carry the identity by
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Welcome(Identity),
    History,
    Profile(Identity),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Welcome(_) => "welcome",
            Screen::History => "history",
            Screen::Profile(_) => "profile",
        }
    }
}

/// Explicit navigation requests from the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    OpenHistory,
    OpenProfile,
    Logout,
    Back,
}

/// Programming-contract violation: the requested transition needs state the
/// router does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    InvalidState(&'static str),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidState(detail) => write!(f, "invalid navigation state: {detail}"),
        }
    }
}

impl std::error::Error for NavError {}

/// Screen stack with the login screen as its root.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Screen>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Login],
        }
    }

    /// The screen currently shown.
    pub fn active(&self) -> &Screen {
        // The stack is never empty: pops stop at the root.
        self.stack.last().unwrap_or(&Screen::Login)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The authenticated identity, if any screen on the stack carries one.
    pub fn identity(&self) -> Option<&Identity> {
        self.stack.iter().rev().find_map(|screen| match screen {
            Screen::Welcome(identity) | Screen::Profile(identity) => Some(identity),
            _ => None,
        })
    }

    /// Reacts to a successful login: the welcome screen replaces the login
    /// screen entirely, so "back" can never return into a completed login.
    pub fn login_succeeded(&mut self, identity: Identity) {
        tracing::info!(username = %identity.username, "login succeeded, entering welcome");
        self.stack = vec![Screen::Welcome(identity)];
    }

    /// Applies a navigation intent, refusing contract violations.
    ///
    /// In development builds a violation asserts; in release builds it is
    /// logged and the navigation ignored, keeping the session alive.
    pub fn apply(&mut self, intent: NavIntent) {
        if let Err(err) = self.try_apply(intent) {
            debug_assert!(false, "{err}");
            tracing::error!(?intent, %err, "refusing navigation");
        }
    }

    /// Fallible core of [`Router::apply`].
    pub fn try_apply(&mut self, intent: NavIntent) -> Result<(), NavError> {
        match intent {
            NavIntent::OpenHistory => {
                if self.identity().is_none() {
                    return Err(NavError::InvalidState("history requires a login"));
                }
                self.stack.push(Screen::History);
            }
            NavIntent::OpenProfile => {
                let Some(identity) = self.identity() else {
                    return Err(NavError::InvalidState("profile requires an identity"));
                };
                // Defensive copy: the profile screen owns its payload.
                let identity = identity.clone();
                self.stack.push(Screen::Profile(identity));
            }
            NavIntent::Logout => {
                tracing::info!("logout, clearing navigation history");
                self.stack = vec![Screen::Login];
            }
            NavIntent::Back => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            username: "mavina".to_string(),
            full_name: "Marco Antonio Aviña Jimenez".to_string(),
            profile_name: "Alumno".to_string(),
            email: "marco@sigo.example".to_string(),
        }
    }

    fn logged_in() -> Router {
        let mut router = Router::new();
        router.login_succeeded(identity());
        router
    }

    #[test]
    fn test_starts_at_login() {
        let router = Router::new();
        assert_eq!(router.active(), &Screen::Login);
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_login_success_replaces_the_stack() {
        let router = logged_in();
        assert_eq!(router.active(), &Screen::Welcome(identity()));
        // No back-navigation into the completed login.
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_back_from_welcome_is_a_no_op() {
        let mut router = logged_in();
        router.apply(NavIntent::Back);
        assert_eq!(router.active(), &Screen::Welcome(identity()));
    }

    #[test]
    fn test_profile_round_trip_preserves_identity() {
        let mut router = logged_in();
        router.apply(NavIntent::OpenProfile);
        let Screen::Profile(payload) = router.active().clone() else {
            panic!("expected profile screen");
        };
        assert_eq!(payload, identity());

        router.apply(NavIntent::Back);
        assert_eq!(router.identity(), Some(&identity()));
    }

    #[test]
    fn test_profile_payload_is_a_defensive_copy() {
        let mut router = logged_in();
        router.apply(NavIntent::OpenProfile);

        // Mutating the popped payload must not touch the session's identity.
        let Screen::Profile(mut payload) = router.active().clone() else {
            panic!("expected profile screen");
        };
        payload.full_name = "Someone Else".to_string();

        router.apply(NavIntent::Back);
        assert_eq!(router.identity(), Some(&identity()));
    }

    #[test]
    fn test_logout_clears_history_back_to_login() {
        let mut router = logged_in();
        router.apply(NavIntent::OpenHistory);
        router.apply(NavIntent::OpenProfile);

        router.apply(NavIntent::Logout);
        assert_eq!(router.active(), &Screen::Login);
        assert_eq!(router.depth(), 1);
        assert!(router.identity().is_none());
    }

    #[test]
    fn test_profile_without_identity_is_refused() {
        let mut router = Router::new();
        let err = router.try_apply(NavIntent::OpenProfile).unwrap_err();
        assert!(matches!(err, NavError::InvalidState(_)));
        assert_eq!(router.active(), &Screen::Login);
    }

    #[test]
    fn test_history_without_identity_is_refused() {
        let mut router = Router::new();
        assert!(router.try_apply(NavIntent::OpenHistory).is_err());
        assert_eq!(router.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "invalid navigation state")]
    fn test_apply_asserts_on_contract_violation_in_dev() {
        let mut router = Router::new();
        router.apply(NavIntent::OpenProfile);
    }
}

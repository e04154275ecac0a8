//! Session controller: the single owner of session state.
//!
//! The controller wires the pure reducer to the outside world. Mutation
//! operations feed commands through [`update`]; the one real side effect
//! (spawning the gateway call) happens here, and completions come back
//! through an inbox channel that [`SessionController::pump`] drains. Signals
//! returned by `pump` are delivered exactly once.
//!
//! Spawned calls race a cancellation token, so `reset()` and `dispose()`
//! guarantee that no state mutation lands afterwards: the token stops the
//! call, and a completion that slipped through is discarded by the reducer's
//! stale-task guard.
//!
//! `submit()` must be called from within a Tokio runtime.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::state::SessionState;
use super::task::{AuthTask, TaskId};
use super::update::{SessionCommand, SessionEffect, update};
use crate::auth::{AuthError, AuthGateway};
use crate::identity::Identity;

/// One-shot notifications of the login flow, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    LoginSucceeded(Identity),
    ErrorOccurred(String),
}

/// Completion of a spawned gateway call.
struct Completion {
    task: TaskId,
    result: Result<Identity, AuthError>,
}

/// Owns `SessionState` and orchestrates authentication.
///
/// Single-owner discipline: no locks, no shared mutable state. The rendering
/// layer reads snapshots via [`SessionController::state`] and collects
/// signals via [`SessionController::pump`] on its own cadence.
pub struct SessionController {
    state: SessionState,
    task: AuthTask,
    gateway: Arc<dyn AuthGateway>,
    inbox_tx: mpsc::UnboundedSender<Completion>,
    inbox_rx: mpsc::UnboundedReceiver<Completion>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::default(),
            task: AuthTask::default(),
            gateway,
            inbox_tx,
            inbox_rx,
        }
    }

    /// The current session snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Replaces the entered username. Always succeeds, no validation.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.dispatch(SessionCommand::SetUsername(value.into()));
    }

    /// Replaces the entered password. Always succeeds, no validation.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.dispatch(SessionCommand::SetPassword(value.into()));
    }

    /// Starts the gateway call for the entered credentials.
    ///
    /// Ignored while a call is already in flight. Empty fields are not
    /// validated locally; the gateway decides.
    pub fn submit(&mut self) {
        self.dispatch(SessionCommand::Submit);
    }

    /// Clears everything back to the initial state (logout / screen re-entry).
    ///
    /// Cancels the in-flight call, if any.
    pub fn reset(&mut self) {
        self.dispatch(SessionCommand::Reset);
    }

    /// Drains completed gateway calls and returns the resulting signals.
    ///
    /// Each signal is returned exactly once; a later `pump` (or a re-render)
    /// can never observe it again.
    pub fn pump(&mut self) -> Vec<SessionSignal> {
        let mut signals = Vec::new();
        while let Ok(completion) = self.inbox_rx.try_recv() {
            signals.extend(self.dispatch(SessionCommand::AuthResolved {
                task: completion.task,
                result: completion.result,
            }));
        }
        signals
    }

    /// Tears the controller down: cancels the in-flight call and guarantees
    /// no further state mutation, even if the gateway later resolves.
    pub fn dispose(&mut self) {
        self.dispatch(SessionCommand::Reset);
    }

    fn dispatch(&mut self, command: SessionCommand) -> Vec<SessionSignal> {
        let effects = update(&mut self.state, &mut self.task, command);
        let mut signals = Vec::new();
        for effect in effects {
            match effect {
                SessionEffect::Authenticate {
                    task,
                    cancel,
                    username,
                    password,
                } => {
                    let gateway = Arc::clone(&self.gateway);
                    let tx = self.inbox_tx.clone();
                    tokio::spawn(async move {
                        let result = tokio::select! {
                            () = cancel.cancelled() => return,
                            result = gateway.authenticate(&username, &password) => result,
                        };
                        // The receiver may be gone if the controller was
                        // dropped; the completion is simply lost then.
                        let _ = tx.send(Completion { task, result });
                    });
                }
                SessionEffect::LoginSucceeded(identity) => {
                    signals.push(SessionSignal::LoginSucceeded(identity));
                }
                SessionEffect::LoginFailed(message) => {
                    signals.push(SessionSignal::ErrorOccurred(message));
                }
            }
        }
        signals
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.task.cancel_and_clear();
    }
}

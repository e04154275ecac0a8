//! Session reducer.
//!
//! All session state mutations happen here. The controller feeds commands in
//! and executes the returned effects; nothing else touches `SessionState`.

use tokio_util::sync::CancellationToken;

use super::state::{SessionPhase, SessionState};
use super::task::{AuthTask, TaskId};
use crate::auth::AuthError;
use crate::identity::Identity;

/// Inputs to the session reducer.
///
/// The first four map one-to-one to the operations the rendering layer may
/// request. `AuthResolved` is internal: the completion of a spawned gateway
/// call, tagged with the task id that started it.
#[derive(Debug)]
pub enum SessionCommand {
    SetUsername(String),
    SetPassword(String),
    Submit,
    Reset,
    AuthResolved {
        task: TaskId,
        result: Result<Identity, AuthError>,
    },
}

/// Effects returned by the reducer for the controller to execute.
///
/// Each effect is produced at most once per transition; `LoginSucceeded` and
/// `LoginFailed` are the one-shot signals of the flow and are never re-emitted
/// for the same attempt.
#[derive(Debug)]
pub enum SessionEffect {
    /// Spawn the gateway call for this attempt.
    Authenticate {
        task: TaskId,
        cancel: CancellationToken,
        username: String,
        password: String,
    },
    /// The attempt succeeded; carries the identity exactly once.
    LoginSucceeded(Identity),
    /// The attempt failed; carries the display message exactly once.
    LoginFailed(String),
}

/// Applies one command to the session state.
pub fn update(
    state: &mut SessionState,
    task: &mut AuthTask,
    command: SessionCommand,
) -> Vec<SessionEffect> {
    match command {
        SessionCommand::SetUsername(value) => {
            state.credentials.username = value;
            vec![]
        }
        SessionCommand::SetPassword(value) => {
            state.credentials.password = value;
            vec![]
        }
        SessionCommand::Submit => submit(state, task),
        SessionCommand::Reset => {
            task.cancel_and_clear();
            *state = SessionState::default();
            vec![]
        }
        SessionCommand::AuthResolved { task: id, result } => {
            if !task.finish_if_active(id) {
                tracing::debug!(?id, "discarding stale auth completion");
                return vec![];
            }
            match result {
                Ok(identity) => {
                    state.phase = SessionPhase::Succeeded(identity.clone());
                    vec![SessionEffect::LoginSucceeded(identity)]
                }
                Err(err) => {
                    tracing::warn!(kind = %err.kind, "authentication failed");
                    let message = err.to_string();
                    state.phase = SessionPhase::Failed(message.clone());
                    vec![SessionEffect::LoginFailed(message)]
                }
            }
        }
    }
}

fn submit(state: &mut SessionState, task: &mut AuthTask) -> Vec<SessionEffect> {
    match state.phase {
        SessionPhase::Submitting => {
            // One outstanding call at a time; the extra request has no effect.
            tracing::debug!("submit ignored while a call is in flight");
            vec![]
        }
        SessionPhase::Succeeded(_) => {
            tracing::debug!("submit ignored after success; reset first");
            vec![]
        }
        SessionPhase::Idle | SessionPhase::Failed(_) => {
            // Empty fields are not validated here; the gateway decides.
            let (id, cancel) = task.start();
            state.phase = SessionPhase::Submitting;
            tracing::debug!(?id, username = %state.credentials.username, "submitting credentials");
            vec![SessionEffect::Authenticate {
                task: id,
                cancel,
                username: state.credentials.username.clone(),
                password: state.credentials.password.clone(),
            }]
        }
    }
}

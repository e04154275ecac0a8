//! Shell event types.

use siga_core::session::SessionSignal;

/// Events the reducer consumes.
///
/// Terminal input and the tick come from the event loop; session signals are
/// drained from the controller once per iteration and are already one-shot.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (animation, notice expiry).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// One-shot session notification (login succeeded / error occurred).
    Session(SessionSignal),
}

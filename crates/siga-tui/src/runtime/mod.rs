//! Shell runtime - owns the terminal, runs the event loop, executes effects.
//!
//! The reducer stays pure and produces effects; this module executes them.
//! Each iteration drains the session controller's one-shot signals, folds all
//! pending events through the reducer, executes the effects, and redraws when
//! something changed.
//!
//! Must run inside a Tokio runtime: submitting credentials spawns the gateway
//! call as a background task whose completion the next iterations pick up via
//! `SessionController::pump`.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use siga_core::config::Config;

use crate::events::UiEvent;
use crate::state::AppState;
use crate::update::UiEffect;
use crate::{render, terminal, update};

/// Frame cadence while a gateway call is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Full-screen shell runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
pub struct ShellRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl ShellRuntime {
    /// Creates a new shell runtime and takes over the terminal.
    pub fn new(config: &Config) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state: AppState::new(config),
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                execute_effects(&mut self.state, effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from all sources (session signals, terminal, tick).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        // One-shot session signals first: a completion should route before
        // the same iteration's key events are interpreted.
        let mut events: Vec<UiEvent> = self
            .state
            .session
            .pump()
            .into_iter()
            .map(UiEvent::Session)
            .collect();

        // Animate fast while a call is in flight; otherwise poll lazily.
        let tick_interval = if self.state.session.state().is_submitting() {
            FRAME_DURATION
        } else {
            self.state.tick_rate
        };

        // Block until the next tick is due unless events are already pending.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}

impl Drop for ShellRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Executes effects returned by the reducer.
///
/// Separate from the runtime so reducer tests can drive the same path the
/// event loop uses.
pub fn execute_effects(state: &mut AppState, effects: Vec<UiEffect>) {
    for effect in effects {
        match effect {
            UiEffect::Quit => state.should_quit = true,
            UiEffect::Submit => state.session.submit(),
            UiEffect::ResetSession => state.session.reset(),
        }
    }
}

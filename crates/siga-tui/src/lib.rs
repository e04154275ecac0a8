//! Full-screen TUI shell for SIGA.
//!
//! This crate is the rendering collaborator of the login flow: it displays
//! session and navigation state produced by `siga-core` and forwards key
//! events back into it. No session or routing decision is made here.

pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::ShellRuntime;
use siga_core::config::Config;

/// Runs the interactive shell until the user quits or logs out for good.
pub async fn run_shell(config: &Config) -> Result<()> {
    // The shell needs a terminal to draw on.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The SIGA shell requires a terminal.\n\
             Use `siga verify --username ... --password ...` for a non-interactive check."
        );
    }

    let mut runtime = ShellRuntime::new(config)?;
    runtime.run()
}

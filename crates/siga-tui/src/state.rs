//! Shell state composition.
//!
//! `AppState` bundles everything the reducer mutates and the renderer reads:
//! the navigation router, the session controller, the login form focus, the
//! welcome-menu selection, and the transient notice. The session controller
//! and router come from `siga-core`; the shell only observes their snapshots.

use std::sync::Arc;
use std::time::Duration;

use siga_core::auth::{AuthGateway, RosterGateway};
use siga_core::config::Config;
use siga_core::records::SubjectRecord;
use siga_core::router::Router;
use siga_core::session::SessionController;

/// Which login field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Focus state of the login form. The field values themselves live in the
/// session's credentials.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub focus: LoginField,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient toast-style notice. Expires after a fixed number of ticks so a
/// re-render can never re-announce an old result.
#[derive(Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    ticks_left: u16,
}

impl Notice {
    /// How many ticks a notice stays visible (seconds at the idle cadence).
    const TTL_TICKS: u16 = 35;

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
            ticks_left: Self::TTL_TICKS,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
            ticks_left: Self::TTL_TICKS,
        }
    }

    /// Counts down one tick; returns true once expired.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }
}

/// Entries of the welcome menu, in display order.
pub const WELCOME_MENU: &[&str] = &["Historial Académico", "Mi Perfil", "Cerrar Sesión"];

/// Combined shell state.
pub struct AppState {
    /// Flag indicating the shell should quit.
    pub should_quit: bool,
    /// Screen stack and identity payloads.
    pub router: Router,
    /// Owner of the login state machine.
    pub session: SessionController,
    /// Login form focus.
    pub login: LoginForm,
    /// Academic history shown on the history screen.
    pub records: Vec<SubjectRecord>,
    /// Selected row of the welcome menu.
    pub menu_selected: usize,
    /// Transient notice, if any.
    pub notice: Option<Notice>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Idle tick cadence from config.
    pub tick_rate: Duration,
}

impl AppState {
    /// Creates the shell state with the roster gateway from config.
    pub fn new(config: &Config) -> Self {
        let gateway = Arc::new(RosterGateway::new(config.accounts.clone()));
        Self::with_gateway(config, gateway)
    }

    /// Creates the shell state against a specific gateway (tests, alternative
    /// transports).
    pub fn with_gateway(config: &Config, gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            should_quit: false,
            router: Router::new(),
            session: SessionController::new(gateway),
            login: LoginForm::default(),
            records: config.records.clone(),
            menu_selected: 0,
            notice: None,
            spinner_frame: 0,
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_ttl() {
        let mut notice = Notice::info("hola");
        for _ in 0..Notice::TTL_TICKS - 1 {
            assert!(!notice.tick());
        }
        assert!(notice.tick());
    }

    #[test]
    fn test_login_focus_toggles_between_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.focus, LoginField::Username);
        form.toggle_focus();
        assert_eq!(form.focus, LoginField::Password);
        form.toggle_focus();
        assert_eq!(form.focus, LoginField::Username);
    }
}

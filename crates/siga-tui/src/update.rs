//! Shell reducer (update function).
//!
//! All shell state mutations happen here. The runtime calls
//! `update(app, event)` and executes the returned effects. Session state is
//! never mutated directly: key events translate into controller operations,
//! and the controller's one-shot signals translate into router transitions
//! and notices.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use siga_core::router::{NavIntent, Screen};
use siga_core::session::SessionSignal;

use crate::events::UiEvent;
use crate::state::{AppState, LoginField, Notice, WELCOME_MENU};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the shell.
    Quit,
    /// Ask the session controller to start the gateway call.
    Submit,
    /// Clear the session back to its initial state (logout).
    ResetSession,
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            if let Some(notice) = &mut app.notice
                && notice.tick()
            {
                app.notice = None;
            }
            vec![]
        }
        UiEvent::Session(signal) => handle_signal(app, signal),
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
    }
}

/// Applies a one-shot session signal to navigation and notices.
fn handle_signal(app: &mut AppState, signal: SessionSignal) -> Vec<UiEffect> {
    match signal {
        SessionSignal::LoginSucceeded(identity) => {
            app.notice = Some(Notice::info(format!(
                "Bienvenido a SIGO.... {}",
                identity.full_name
            )));
            app.menu_selected = 0;
            app.router.login_succeeded(identity);
        }
        SessionSignal::ErrorOccurred(message) => {
            app.notice = Some(Notice::error(message));
        }
    }
    vec![]
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if matches!(app.router.active(), Screen::Login) {
        handle_login_key(app, key)
    } else if matches!(app.router.active(), Screen::Welcome(_)) {
        handle_welcome_key(app, key)
    } else {
        handle_detail_key(app, key)
    }
}

fn handle_login_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Enter => vec![UiEffect::Submit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_focus();
            vec![]
        }
        KeyCode::Backspace => {
            edit_focused_field(app, |value| {
                value.pop();
            });
            vec![]
        }
        KeyCode::Char(c) => {
            edit_focused_field(app, |value| value.push(c));
            vec![]
        }
        _ => vec![],
    }
}

/// Rewrites the focused credential field through the controller, so the
/// session stays the single source of truth for what was typed.
fn edit_focused_field(app: &mut AppState, edit: impl FnOnce(&mut String)) {
    match app.login.focus {
        LoginField::Username => {
            let mut value = app.session.state().credentials.username.clone();
            edit(&mut value);
            app.session.set_username(value);
        }
        LoginField::Password => {
            let mut value = app.session.state().credentials.password.clone();
            edit(&mut value);
            app.session.set_password(value);
        }
    }
}

fn handle_welcome_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Up => {
            app.menu_selected = app.menu_selected.checked_sub(1).unwrap_or(WELCOME_MENU.len() - 1);
            vec![]
        }
        KeyCode::Down => {
            app.menu_selected = (app.menu_selected + 1) % WELCOME_MENU.len();
            vec![]
        }
        KeyCode::Enter => match app.menu_selected {
            0 => {
                app.router.apply(NavIntent::OpenHistory);
                vec![]
            }
            1 => {
                app.router.apply(NavIntent::OpenProfile);
                vec![]
            }
            _ => logout(app),
        },
        KeyCode::Char('h') => {
            app.router.apply(NavIntent::OpenHistory);
            vec![]
        }
        KeyCode::Char('p') => {
            app.router.apply(NavIntent::OpenProfile);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            app.router.apply(NavIntent::Back);
            vec![]
        }
        _ => vec![],
    }
}

/// Logout: a fresh session and a navigation history reduced to the login
/// screen, in that order of user-visible importance.
fn logout(app: &mut AppState) -> Vec<UiEffect> {
    app.router.apply(NavIntent::Logout);
    app.login = crate::state::LoginForm::default();
    app.notice = None;
    vec![UiEffect::ResetSession]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use siga_core::auth::{AuthError, AuthGateway};
    use siga_core::config::Config;
    use siga_core::identity::Identity;

    use super::*;
    use crate::runtime::execute_effects;

    fn identity() -> Identity {
        Identity {
            username: "alice".to_string(),
            full_name: "Alice Smith".to_string(),
            profile_name: "Student".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    struct StubGateway {
        result: Result<Identity, AuthError>,
    }

    #[async_trait]
    impl AuthGateway for StubGateway {
        async fn authenticate(&self, _user: &str, _pass: &str) -> Result<Identity, AuthError> {
            self.result.clone()
        }
    }

    fn app_with(result: Result<Identity, AuthError>) -> AppState {
        AppState::with_gateway(&Config::default(), Arc::new(StubGateway { result }))
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    async fn pump_until_signal(app: &mut AppState) -> SessionSignal {
        for _ in 0..200 {
            let mut signals = app.session.pump();
            if let Some(signal) = signals.pop() {
                return signal;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("no session signal within deadline");
    }

    /// Drives the full login scenario: typing, submit, resolution, signal.
    async fn log_in(app: &mut AppState) {
        type_text(app, "alice");
        update(app, key(KeyCode::Tab));
        type_text(app, "secret");
        let effects = update(app, key(KeyCode::Enter));
        assert_eq!(effects, vec![UiEffect::Submit]);
        execute_effects(app, effects);

        let signal = pump_until_signal(app).await;
        update(app, UiEvent::Session(signal));
    }

    #[test]
    fn test_typing_routes_to_the_focused_field() {
        let mut app = app_with(Ok(identity()));
        type_text(&mut app, "ali");
        update(&mut app, key(KeyCode::Backspace));
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "pw");

        assert_eq!(app.session.state().credentials.username, "al");
        assert_eq!(app.session.state().credentials.password, "pw");
    }

    #[tokio::test]
    async fn test_successful_login_navigates_to_welcome() {
        let mut app = app_with(Ok(identity()));
        log_in(&mut app).await;

        assert_eq!(app.router.active(), &Screen::Welcome(identity()));
        let notice = app.notice.as_ref().expect("welcome notice");
        assert!(notice.text.contains("Alice Smith"));
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_login_with_credentials() {
        let mut app = app_with(Err(AuthError::invalid_credentials()));
        log_in(&mut app).await;

        assert_eq!(app.router.active(), &Screen::Login);
        assert_eq!(app.session.state().credentials.username, "alice");
        assert_eq!(app.session.state().credentials.password, "secret");
        let notice = app.notice.as_ref().expect("error notice");
        assert_eq!(notice.kind, crate::state::NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_menu_opens_history_and_back_returns() {
        let mut app = app_with(Ok(identity()));
        log_in(&mut app).await;

        update(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.router.active(), &Screen::History);

        update(&mut app, key(KeyCode::Esc));
        assert_eq!(app.router.active(), &Screen::Welcome(identity()));
    }

    #[tokio::test]
    async fn test_profile_round_trip_keeps_identity_intact() {
        let mut app = app_with(Ok(identity()));
        log_in(&mut app).await;

        update(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.router.active(), &Screen::Profile(identity()));

        update(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.router.identity(), Some(&identity()));
    }

    #[tokio::test]
    async fn test_logout_resets_session_and_navigation() {
        let mut app = app_with(Ok(identity()));
        log_in(&mut app).await;

        // "Cerrar Sesión" is the last menu entry.
        update(&mut app, key(KeyCode::Up));
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.contains(&UiEffect::ResetSession));
        execute_effects(&mut app, effects);

        assert_eq!(app.router.active(), &Screen::Login);
        assert_eq!(app.router.depth(), 1);
        assert_eq!(app.session.state().credentials.username, "");
        assert!(app.session.state().identity().is_none());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_any_screen() {
        let mut app = app_with(Ok(identity()));
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut app, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_notice_expires_on_ticks() {
        let mut app = app_with(Ok(identity()));
        app.notice = Some(Notice::error("bad"));
        for _ in 0..100 {
            update(&mut app, UiEvent::Tick);
        }
        assert!(app.notice.is_none());
    }
}

//! Pure view/render functions for the shell.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects. Which screen is drawn is
//! decided entirely by the router's active screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use siga_core::identity::Identity;
use siga_core::records::{SubjectRecord, SubjectStatus};
use siga_core::router::Screen;

use crate::state::{AppState, LoginField, NoticeKind, WELCOME_MENU};

/// Brand accent color.
const ACCENT: Color = Color::Green;

/// Secondary text color.
const MUTED: Color = Color::DarkGray;

/// Spinner frames for the submitting indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Height of the notice line above the help line.
const NOTICE_HEIGHT: u16 = 1;

/// Height of the key-hint line at the bottom.
const HELP_HEIGHT: u16 = 1;

/// Renders the entire shell to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(NOTICE_HEIGHT),
            Constraint::Length(HELP_HEIGHT),
        ])
        .split(area);

    match app.router.active() {
        Screen::Login => render_login(app, frame, rows[0]),
        Screen::Welcome(identity) => render_welcome(app, identity, frame, rows[0]),
        Screen::History => render_history(&app.records, frame, rows[0]),
        Screen::Profile(identity) => render_profile(identity, frame, rows[0]),
    }

    render_notice(app, frame, rows[1]);
    render_help(app, frame, rows[2]);
}

fn render_login(app: &AppState, frame: &mut Frame, area: Rect) {
    let card = centered_rect(48, 14, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(2), // subtitle
            Constraint::Length(3), // username
            Constraint::Length(3), // password
            Constraint::Length(1), // spacer
            Constraint::Length(1), // action
            Constraint::Length(1), // inline error
        ])
        .split(card);

    let title = Paragraph::new("SIGA")
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let subtitle = Paragraph::new("Sistema Integral de Gestión Académica")
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, rows[1]);

    let credentials = &app.session.state().credentials;
    render_field(
        frame,
        rows[2],
        "Usuario",
        &credentials.username,
        app.login.focus == LoginField::Username,
    );
    render_field(
        frame,
        rows[3],
        "Contraseña",
        &masked(&credentials.password),
        app.login.focus == LoginField::Password,
    );

    let action = if app.session.state().is_submitting() {
        Line::from(vec![
            Span::styled(spinner(app), Style::default().fg(ACCENT)),
            Span::raw(" "),
            Span::styled("Verificando credenciales...", Style::default().fg(ACCENT)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(MUTED)),
            Span::raw(" "),
            Span::styled(
                "INICIAR SESIÓN",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    frame.render_widget(
        Paragraph::new(action).alignment(Alignment::Center),
        rows[5],
    );

    // Failures stay visible here until the next submit; the notice line is
    // only the transient announcement.
    if let Some(message) = app.session.state().error_message() {
        let error = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, rows[6]);
    }
}

/// One bordered input field; the focused field gets the accent border and a
/// trailing caret.
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };
    let mut text = value.to_string();
    if focused {
        text.push('▏');
    }
    let field = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label),
    );
    frame.render_widget(field, area);
}

fn render_welcome(app: &AppState, identity: &Identity, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Length(2), // greeting
            Constraint::Min(0),    // menu
        ])
        .split(area);

    let header = Paragraph::new(identity.username.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(header, rows[0]);

    let greeting = Line::from(vec![
        Span::styled(
            format!("Hola, {}", identity.first_name()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(identity.profile_name.as_str(), Style::default().fg(MUTED)),
    ]);
    frame.render_widget(
        Paragraph::new(greeting).alignment(Alignment::Center),
        rows[1],
    );

    let mut lines = Vec::new();
    for (index, entry) in WELCOME_MENU.iter().enumerate() {
        let selected = index == app.menu_selected;
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{entry}"),
            style,
        )));
        lines.push(Line::raw(""));
    }
    let menu = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu, centered_rect(40, rows[2].height, rows[2]));
}

fn render_history(records: &[SubjectRecord], frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Historial Académico",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];

    for record in records {
        let status_color = match record.status {
            SubjectStatus::Active => ACCENT,
            SubjectStatus::Finished => MUTED,
        };
        lines.push(Line::from(vec![
            Span::styled(
                record.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", record.status.label()),
                Style::default().fg(status_color),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            record.instructor.clone(),
            Style::default().fg(MUTED),
        )));
        for unit in &record.units {
            lines.push(Line::raw(format!("  {} · {}", unit.topic, unit.grade)));
        }
        lines.push(Line::from(Span::styled(
            format!("Progreso: {}", record.progress),
            Style::default().fg(MUTED),
        )));
        lines.push(Line::raw(""));
    }

    let card = centered_rect(56, area.height, area);
    frame.render_widget(Paragraph::new(lines), card);
}

fn render_profile(identity: &Identity, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Mi Perfil",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!("({})", identity.initials()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                identity.full_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("Perfil: {}", identity.profile_name),
                Style::default().fg(MUTED),
            ),
            Span::raw("  "),
            Span::styled("Verificado ✓", Style::default().fg(ACCENT)),
        ]),
        Line::from(Span::styled(
            format!("Usuario: {}", identity.username),
            Style::default().fg(MUTED),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Información Personal:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!("Nombre Completo: {}", identity.full_name)),
        Line::raw(format!("Correo Electrónico: {}", identity.email)),
        Line::raw("CURP:"),
        Line::raw("NSS:"),
    ];

    let card = centered_rect(56, area.height, area);
    frame.render_widget(Paragraph::new(lines), card);
}

fn render_notice(app: &AppState, frame: &mut Frame, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Info => ACCENT,
        NoticeKind::Error => Color::Red,
    };
    let paragraph = Paragraph::new(notice.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_help(app: &AppState, frame: &mut Frame, area: Rect) {
    let hint = match app.router.active() {
        Screen::Login => "Tab cambia campo · Enter inicia sesión · Esc sale",
        Screen::Welcome(_) => "↑/↓ menú · Enter abre · q sale",
        Screen::History | Screen::Profile(_) => "Esc vuelve",
    };
    let help = Paragraph::new(hint)
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn spinner(app: &AppState) -> &'static str {
    SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()]
}

fn masked(password: &str) -> String {
    "•".repeat(password.chars().count())
}

/// Centers a fixed-size region inside `area`, clamped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

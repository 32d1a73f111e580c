//! Login screen view.

use cmms_core::Field;
use cmms_core::login::{FieldStatus, FormAction, FormView, MessageKind, SocialProvider};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{Control, LoginState};
use crate::common::truncate_start;
use crate::render::{SPINNER_FRAMES, centered_rect, render_panel};

const PANEL_WIDTH: u16 = 56;
const PANEL_HEIGHT: u16 = 22;
const MASK_CHAR: char = '•';

/// Renders the login panel centered in `area`.
pub fn render_login(frame: &mut Frame, login: &LoginState, spinner_frame: usize, area: Rect) {
    let panel = centered_rect(area, PANEL_WIDTH, PANEL_HEIGHT);
    let inner = render_panel(frame, panel, "CMMS Sign In", Color::Cyan);

    let view = login.form.view();
    let value_width = inner.width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome back! Please sign in to your account.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for field in Field::ALL {
        let raw = login.form.value(field);
        let shown = match field {
            Field::Password if view.password.is_masked() => {
                MASK_CHAR.to_string().repeat(raw.chars().count())
            }
            _ => raw.to_string(),
        };
        let control = Control::Input(field);
        lines.push(Line::from(Span::styled(
            field.label(),
            label_style(login.is_focused(control)),
        )));
        lines.push(input_line(
            &truncate_start(&shown, value_width),
            view.fields[field],
            login.is_focused(control),
        ));
        lines.push(error_line(login.form.field_display().get(field)));
    }

    lines.push(Line::from(vec![
        button(
            toggle_label(&view),
            login.is_focused(Control::Action(FormAction::TogglePassword)),
            true,
        ),
        Span::raw("  "),
        Span::styled("Ctrl+T", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    lines.push(message_line(&view));
    lines.push(Line::from(submit_button(
        &view,
        login.is_focused(Control::Action(FormAction::Submit)),
        spinner_frame,
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Or continue with",
        Style::default().fg(Color::DarkGray),
    )));
    let mut social = Vec::new();
    for provider in SocialProvider::ALL {
        let focused = login.is_focused(Control::Action(FormAction::SocialLogin(provider)));
        social.push(button(provider.name(), focused, true));
        social.push(Span::raw(" "));
    }
    lines.push(Line::from(social));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next · Enter sign in · Esc clear · Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn status_color(status: FieldStatus) -> Color {
    match status {
        FieldStatus::Untouched => Color::DarkGray,
        FieldStatus::Valid => Color::Green,
        FieldStatus::Invalid => Color::Red,
    }
}

/// Renders "▌ <text>█" with the marker coloured by validity.
fn input_line(text: &str, status: FieldStatus, focused: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled("▌ ", Style::default().fg(status_color(status))),
        Span::styled(text.to_string(), Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn error_line(error: Option<&str>) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

fn message_line(view: &FormView) -> Line<'static> {
    match &view.message {
        Some(message) => {
            let color = match message.kind {
                MessageKind::Error => Color::Red,
                MessageKind::Success => Color::Green,
            };
            Line::from(Span::styled(
                message.text.clone(),
                Style::default().fg(color),
            ))
        }
        None => Line::from(""),
    }
}

fn toggle_label(view: &FormView) -> &'static str {
    if view.password.is_masked() {
        "Show password"
    } else {
        "Hide password"
    }
}

fn button(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Cyan),
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn submit_button(view: &FormView, focused: bool, spinner_frame: usize) -> Span<'static> {
    if view.loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        button(
            &format!("{spinner} {}", view.submit_label()),
            focused,
            view.submit_enabled,
        )
    } else {
        button(view.submit_label(), focused, view.submit_enabled)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cmms_core::auth::DemoAuthenticator;
    use cmms_core::login::{LoginFormController, LoginSettings};
    use cmms_core::surface::{FieldErrors, Redirects, Toasts};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn password_is_masked_until_toggled() {
        let mut login = LoginState::new(LoginFormController::new(
            Toasts::default(),
            FieldErrors::default(),
            Redirects::default(),
            Arc::new(DemoAuthenticator::new(Duration::ZERO)),
            LoginSettings::default(),
        ));
        login.form.set_field(Field::Password, "secret1");

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_login(frame, &login, 0, area);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("•••••••"));
        assert!(!text.contains("secret1"));

        login.form.toggle_password_visibility();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_login(frame, &login, 0, area);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("secret1"));
    }
}

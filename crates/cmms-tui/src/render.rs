//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::state::{AppState, Screen};
use crate::{dashboard, login, notification};

/// Spinner frames for loading indicators.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    match app.screen {
        Screen::Login => login::render_login(frame, &app.login, app.spinner_frame, area),
        Screen::Dashboard => {
            let username = app.login.form.signed_in_user();
            dashboard::render_dashboard(
                frame,
                &app.dashboard,
                username,
                app.spinner_frame,
                area,
            );
        }
    }

    // Toast last so it draws over either screen
    if let Some(toast) = app.toasts().current() {
        notification::render_toast(frame, toast, area);
    }
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clears `area`, draws a titled border, and returns the padded inner area.
pub fn render_panel(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);

    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

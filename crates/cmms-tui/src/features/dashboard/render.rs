use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::DashboardState;
use crate::render::{SPINNER_FRAMES, centered_rect, render_panel};

const PANEL_WIDTH: u16 = 48;
const PANEL_HEIGHT: u16 = 12;

pub fn render_dashboard(
    frame: &mut Frame,
    dashboard: &DashboardState,
    username: Option<&str>,
    spinner_frame: usize,
    area: Rect,
) {
    let panel = centered_rect(area, PANEL_WIDTH, PANEL_HEIGHT);
    let inner = render_panel(frame, panel, "CMMS Dashboard", Color::Green);

    let metrics = &dashboard.metrics;
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);
    let metric = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<22}"), label_style),
            Span::styled(value, value_style),
        ])
    };

    let greeting = match username {
        Some(name) => format!("Signed in as {name}"),
        None => "Signed in".to_string(),
    };
    let status = if dashboard.is_refreshing() {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{spinner} Refreshing..."),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    let lines = vec![
        Line::from(Span::styled(greeting, Style::default().fg(Color::Green))),
        Line::from(""),
        metric("Active work orders", metrics.active_work_orders.to_string()),
        metric("Pending tasks", metrics.pending_tasks.to_string()),
        metric("Equipment uptime", metrics.uptime_label()),
        Line::from(""),
        status,
        Line::from(""),
        Line::from(Span::styled(
            "r refresh · l log out · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

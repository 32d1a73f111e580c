use cmms_core::surface::{Notification, NotificationKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::truncate_with_ellipsis;

const MAX_WIDTH: u16 = 50;
const MARGIN: u16 = 1;

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => Color::Cyan,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
    }
}

/// Draws the visible notification in the top-right corner of `area`.
pub fn render_toast(frame: &mut Frame, notification: &Notification, area: Rect) {
    let text_width = notification.message.width() as u16;
    let width = (text_width + 4)
        .clamp(24, MAX_WIDTH)
        .min(area.width.saturating_sub(MARGIN * 2));
    let height = 3.min(area.height);
    let toast = Rect::new(
        area.x + area.width.saturating_sub(width + MARGIN),
        area.y + MARGIN.min(area.height.saturating_sub(height)),
        width,
        height,
    );

    let color = kind_color(notification.kind);
    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", notification.kind.label()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(Span::styled(
            " Ctrl+X ",
            Style::default().fg(Color::DarkGray),
        )));
    let inner = block.inner(toast);
    frame.render_widget(block, toast);

    let message = truncate_with_ellipsis(&notification.message, inner.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::White),
        ))),
        inner,
    );
}

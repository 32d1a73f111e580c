use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a dashboard key asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Refresh,
    Logout,
    Quit,
}

pub fn handle_key(key: KeyEvent) -> Option<DashboardCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('r') => Some(DashboardCommand::Refresh),
        KeyCode::Char('l') => Some(DashboardCommand::Logout),
        KeyCode::Char('q') => Some(DashboardCommand::Quit),
        _ => None,
    }
}

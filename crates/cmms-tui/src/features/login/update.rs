//! Login screen key handling.

use cmms_core::auth::Credentials;
use cmms_core::login::FormAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{Control, LoginState};

/// Handles a key on the login screen.
///
/// Returns credentials when the key started an authentication call.
pub fn handle_key(login: &mut LoginState, key: KeyEvent) -> Option<Credentials> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            login.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            login.focus_prev();
            None
        }
        KeyCode::Char('t') if ctrl => login.form.dispatch(FormAction::TogglePassword),
        KeyCode::Esc => {
            login.form.dispatch(FormAction::ClearForm);
            login.focus_first();
            None
        }
        KeyCode::Enter => match login.focused() {
            Control::Input(_) => login.form.dispatch(FormAction::Submit),
            Control::Action(action) => login.form.dispatch(action),
        },
        KeyCode::Char(' ') if !ctrl => match login.focused() {
            Control::Input(field) => {
                login.insert_text(field, " ");
                None
            }
            Control::Action(action) => login.form.dispatch(action),
        },
        KeyCode::Char(c) if !ctrl => {
            if let Control::Input(field) = login.focused() {
                login.insert_text(field, c.encode_utf8(&mut [0; 4]));
            }
            None
        }
        KeyCode::Backspace => {
            if let Control::Input(field) = login.focused() {
                login.delete_char(field);
            }
            None
        }
        _ => None,
    }
}

/// Pastes into the focused input (ignored on other controls).
pub fn handle_paste(login: &mut LoginState, text: &str) {
    if let Control::Input(field) = login.focused() {
        let line = text.lines().next().unwrap_or_default();
        login.insert_text(field, line);
    }
}

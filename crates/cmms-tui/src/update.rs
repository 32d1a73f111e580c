//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use cmms_core::surface::{Navigator, NotificationKind, NotificationSurface};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

use crate::dashboard::{self, DashboardCommand, REFRESHED_MESSAGE};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::login;
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            handle_tick(app, Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                debug!(?kind, id = completed.id.0, "stale task result dropped");
                vec![]
            }
        }
        UiEvent::AuthSettled { result } => {
            app.login.form.complete(result);
            vec![]
        }
        UiEvent::DashboardRefreshed => {
            if app.screen == Screen::Dashboard {
                app.dashboard.finish_refresh(&mut rand::rng());
                app.toasts_mut()
                    .show(REFRESHED_MESSAGE, NotificationKind::Success);
            }
            vec![]
        }
    }
}

/// Timer work: toast and message expiry, due redirects, metric updates.
pub(crate) fn handle_tick(app: &mut AppState, now: Instant) {
    app.spinner_frame = app.spinner_frame.wrapping_add(1);

    app.toasts_mut().expire(now);
    app.login.form.expire_message(now);

    if let Some(target) = app.login.form.navigator_mut().take_due(now) {
        navigate(app, &target, now);
    }

    if app.screen == Screen::Dashboard {
        app.dashboard.poll(now, &mut rand::rng());
    }
}

fn navigate(app: &mut AppState, target: &str, now: Instant) {
    if target == app.login.form.settings().landing_target {
        info!(target, "redirecting to dashboard");
        app.screen = Screen::Dashboard;
        app.dashboard.enter(now);
    } else {
        warn!(target, "no screen for redirect target");
    }
}

fn logout(app: &mut AppState) {
    info!("logged out");
    app.dashboard.leave();
    app.tasks.dashboard_refresh.clear();
    app.login.form.navigator_mut().cancel();
    app.login.form.reset();
    app.login.focus_first();
    app.screen = Screen::Login;
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            if app.screen == Screen::Login {
                login::handle_paste(&mut app.login, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('x') if ctrl => {
            app.toasts_mut().dismiss();
            return vec![];
        }
        _ => {}
    }

    match app.screen {
        Screen::Login => match login::handle_key(&mut app.login, key) {
            Some(credentials) => vec![UiEffect::Authenticate {
                task: app.task_seq.next_id(),
                credentials,
            }],
            None => vec![],
        },
        Screen::Dashboard => match dashboard::handle_key(key) {
            Some(DashboardCommand::Refresh) => {
                if app.dashboard.begin_refresh() {
                    vec![UiEffect::RefreshDashboard {
                        task: app.task_seq.next_id(),
                    }]
                } else {
                    vec![]
                }
            }
            Some(DashboardCommand::Logout) => {
                logout(app);
                vec![]
            }
            Some(DashboardCommand::Quit) => vec![UiEffect::Quit],
            None => vec![],
        },
    }
}

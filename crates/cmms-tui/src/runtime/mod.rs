//! Event loop for the login and dashboard screens.
//!
//! Effects returned by the reducer are executed here and nowhere else.
//! Authentication and the dashboard refresh run as tokio tasks; each one
//! reports back through the inbox channel, which is drained every frame.

mod handlers;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cmms_core::auth::Authenticator;
use cmms_core::config::Config;
use crossterm::event;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::dashboard::REFRESH_DELAY;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while a task is running (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick interval when idle. Timers only need sub-second resolution.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Owns the terminal and the app state for one interactive session.
///
/// The terminal is given back on drop and on panic.
pub struct TuiRuntime {
    terminal: terminal::LoginTerminal,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal and builds the initial state.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        let terminal = terminal::enter().context("Failed to setup terminal")?;

        let state = AppState::new(config, authenticator);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the state asks to quit.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Terminal input renders without waiting for the next tick
                dirty |= matches!(&event, UiEvent::Tick | UiEvent::Terminal(_));
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Don't delay processing when results are already waiting
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Authenticate { task, credentials } => {
                let authenticator = self.state.login.form.authenticator();
                self.spawn_task(TaskKind::Authenticate, task, move || {
                    handlers::authenticate(authenticator, credentials)
                });
            }
            UiEffect::RefreshDashboard { task } => {
                self.spawn_task(TaskKind::DashboardRefresh, task, || {
                    handlers::dashboard_refresh(REFRESH_DELAY)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::leave();
    }
}

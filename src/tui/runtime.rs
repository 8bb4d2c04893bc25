//! Runtime entrypoint: owns the terminal, the event loop and command execution.

#![allow(missing_docs)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::assessment::navigation::Scenario;
use crate::assessment::shell::{Shell, ViewSettings};
use crate::core::config::{Config, LoggingConfig};
use crate::core::errors::{LmError, Result};
use crate::logger::activity::{ActivityEvent, ActivityLog};

use super::input::map_key_event;
use super::model::{DashboardCmd, DashboardModel, DashboardMsg};
use super::render::render_frame;
use super::terminal_guard::TerminalGuard;
use super::theme::{AccessibilityProfile, Theme};
use super::update::update;

/// Everything the dashboard needs from config and the command line.
#[derive(Debug, Clone)]
pub struct DashboardRuntimeConfig {
    pub start: Scenario,
    pub settings: ViewSettings,
    /// Input poll interval.
    pub tick: Duration,
    pub logging: LoggingConfig,
    /// Where the effective config came from, for the session log.
    pub config_path: PathBuf,
    pub config_hash: String,
    pub accessibility: AccessibilityProfile,
}

impl DashboardRuntimeConfig {
    /// Build from a loaded config; `start` overrides `ui.start_scenario`.
    ///
    /// # Errors
    /// Returns an error if the config cannot be hashed.
    pub fn from_config(config: &Config, start: Option<Scenario>, no_color: bool) -> Result<Self> {
        let mut accessibility = AccessibilityProfile::from_environment();
        if no_color {
            accessibility = AccessibilityProfile {
                color: super::theme::ColorMode::Disabled,
                ..accessibility
            };
        }
        Ok(Self {
            start: start.unwrap_or(config.ui.start_scenario),
            settings: config.view_settings(),
            tick: Duration::from_millis(config.ui.tick_ms),
            logging: config.logging.clone(),
            config_path: config.source_path.clone(),
            config_hash: config.stable_hash()?,
            accessibility,
        })
    }
}

const fn terminal_error(source: io::Error) -> LmError {
    LmError::Terminal { source }
}

/// Run the interactive dashboard until the user quits.
///
/// Session start and stop are always logged, also when the loop fails.
///
/// # Errors
/// Returns terminal I/O failures.
pub fn run_dashboard(config: &DashboardRuntimeConfig) -> Result<()> {
    let mut log = ActivityLog::from_config(&config.logging);
    log.record(&ActivityEvent::SessionStarted {
        version: env!("CARGO_PKG_VERSION").to_string(),
        scenario: config.start,
        config_hash: config.config_hash.clone(),
    });
    log.record(&ActivityEvent::ConfigLoaded {
        path: config.config_path.display().to_string(),
        config_hash: config.config_hash.clone(),
    });
    let started = Instant::now();

    let shell = Shell::new(config.start, config.settings);
    let mut model = DashboardModel::new(shell, TerminalGuard::terminal_size());
    let theme = Theme::new(config.accessibility);

    let result = TerminalGuard::new()
        .map_err(terminal_error)
        .and_then(|guard| {
            let outcome = event_loop(&mut model, &mut log, &theme, config.tick);
            drop(guard);
            outcome
        });

    if let Err(err) = &result {
        log.record(&ActivityEvent::from_error(err));
    }
    log.record(&ActivityEvent::SessionStopped {
        scenario: model.active(),
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    });
    log.flush();
    result
}

fn event_loop(
    model: &mut DashboardModel,
    log: &mut ActivityLog,
    theme: &Theme,
    tick: Duration,
) -> Result<()> {
    let mut stdout = io::stdout();
    let mut timers: Vec<(Instant, u64)> = Vec::new();
    let mut dirty = true;

    while !model.quit {
        if dirty {
            render_frame(&mut stdout, model, theme).map_err(terminal_error)?;
            dirty = false;
        }

        let now = Instant::now();
        let (due, pending): (Vec<_>, Vec<_>) = timers.into_iter().partition(|(at, _)| *at <= now);
        timers = pending;
        for (_, id) in due {
            let cmd = update(model, DashboardMsg::NotificationExpired(id));
            execute(cmd, log, &mut timers, now);
            dirty = true;
        }

        let timeout = timers
            .iter()
            .map(|(at, _)| at.saturating_duration_since(now))
            .min()
            .map_or(tick, |d| d.min(tick));

        if !event::poll(timeout).map_err(terminal_error)? {
            continue;
        }
        let msg = match event::read().map_err(terminal_error)? {
            Event::Key(key) => map_key_event(key),
            Event::Resize(cols, rows) => DashboardMsg::Resize { cols, rows },
            _ => continue,
        };
        let cmd = update(model, msg);
        execute(cmd, log, &mut timers, Instant::now());
        dirty = true;
    }
    Ok(())
}

/// Carry out side effects. Quit needs no action here: the model flag ends the loop.
fn execute(cmd: DashboardCmd, log: &mut ActivityLog, timers: &mut Vec<(Instant, u64)>, now: Instant) {
    for cmd in cmd.flatten() {
        match cmd {
            DashboardCmd::Log(event) => log.record(&event),
            DashboardCmd::ScheduleNotificationExpiry { id, after } => timers.push((now + after, id)),
            DashboardCmd::Quit | DashboardCmd::None | DashboardCmd::Batch(_) => {}
        }
    }
}

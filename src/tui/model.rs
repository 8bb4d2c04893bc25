//! Elm-style state model for the terminal dashboard.
//!
//! All display state lives in [`DashboardModel`]. Input arrives as
//! [`DashboardMsg`] values; side effects are returned from the update function
//! as [`DashboardCmd`] values. No I/O happens here.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::assessment::navigation::Scenario;
use crate::assessment::shell::{Interaction, Shell};
use crate::logger::activity::ActivityEvent;

/// Smallest terminal the full layout is drawn for.
pub const MIN_COLS: u16 = 60;
pub const MIN_ROWS: u16 = 16;

/// Oldest notifications are dropped beyond this many.
pub const MAX_NOTIFICATIONS: usize = 3;

/// How long an informational notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

// ──────────────────── notifications ────────────────────

/// A transient message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic ID for expiry tracking.
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

// ──────────────────── model ────────────────────

/// Complete dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardModel {
    /// Navigation plus the mounted view's local state.
    pub shell: Shell,
    /// Previously active scenarios, most recent last.
    pub history: Vec<Scenario>,
    /// Terminal dimensions (columns, rows).
    pub terminal_size: (u16, u16),
    /// Set once the loop should exit.
    pub quit: bool,
    /// Key-binding overlay visibility.
    pub help_open: bool,
    /// First content row drawn; reset whenever the scenario changes.
    pub scroll: u16,
    pub notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl DashboardModel {
    #[must_use]
    pub const fn new(shell: Shell, terminal_size: (u16, u16)) -> Self {
        Self {
            shell,
            history: Vec::new(),
            terminal_size,
            quit: false,
            help_open: false,
            scroll: 0,
            notifications: Vec::new(),
            next_notification_id: 0,
        }
    }

    #[must_use]
    pub const fn active(&self) -> Scenario {
        self.shell.active()
    }

    /// Below [`MIN_COLS`]×[`MIN_ROWS`] only a notice is drawn.
    #[must_use]
    pub const fn is_too_small(&self) -> bool {
        self.terminal_size.0 < MIN_COLS || self.terminal_size.1 < MIN_ROWS
    }

    /// Navigate to a scenario, recording the current one in history.
    /// No-op if already active. Returns `true` if navigation occurred.
    pub fn navigate_to(&mut self, target: Scenario) -> bool {
        let from = self.shell.active();
        if !self.shell.select(target) {
            return false;
        }
        self.history.push(from);
        self.scroll = 0;
        true
    }

    /// Return to the previous scenario. The target view is remounted fresh.
    pub fn navigate_back(&mut self) -> bool {
        while let Some(prev) = self.history.pop() {
            if self.shell.select(prev) {
                self.scroll = 0;
                return true;
            }
        }
        false
    }

    /// Push a notification, evicting the oldest past [`MAX_NOTIFICATIONS`].
    pub fn push_notification(&mut self, level: NotificationLevel, message: String) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification { id, level, message });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        id
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Scroll the content pane by `delta` rows, stopping at the top.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.scroll).saturating_add(delta);
        self.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX);
    }
}

// ──────────────────── messages ────────────────────

/// Events that drive state transitions.
#[derive(Debug, Clone)]
pub enum DashboardMsg {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize { cols: u16, rows: u16 },
    /// Navigate directly to a scenario.
    Select(Scenario),
    /// Pop the history stack.
    Back,
    /// A view-local interaction (threshold, toggle, timeframe, view mode).
    Interact(Interaction),
    /// Scroll the content pane.
    Scroll(i32),
    ToggleHelp,
    /// A notification's display time ran out.
    NotificationExpired(u64),
    Quit,
}

// ──────────────────── commands ────────────────────

/// Side effects requested by the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCmd {
    None,
    /// Terminate the event loop.
    Quit,
    /// Append an event to the activity log.
    Log(ActivityEvent),
    /// Deliver `NotificationExpired(id)` after the given duration.
    ScheduleNotificationExpiry { id: u64, after: Duration },
    Batch(Vec<Self>),
}

impl DashboardCmd {
    /// Flatten nested batches into execution order, dropping `None`.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// ──────────────────── tests ────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> DashboardModel {
        DashboardModel::new(Shell::default(), (100, 30))
    }

    #[test]
    fn navigate_to_records_history() {
        let mut model = test_model();
        assert!(model.navigate_to(Scenario::Time));
        assert!(model.navigate_to(Scenario::Scale));
        assert_eq!(model.history, vec![Scenario::Overview, Scenario::Time]);
        assert!(!model.navigate_to(Scenario::Scale));
        assert_eq!(model.history.len(), 2);
    }

    #[test]
    fn navigate_back_pops_history() {
        let mut model = test_model();
        model.navigate_to(Scenario::Behavior);
        model.scroll = 5;
        assert!(model.navigate_back());
        assert_eq!(model.active(), Scenario::Overview);
        assert_eq!(model.scroll, 0);
        assert!(!model.navigate_back());
    }

    #[test]
    fn too_small_threshold() {
        let mut model = test_model();
        assert!(!model.is_too_small());
        model.terminal_size = (59, 30);
        assert!(model.is_too_small());
        model.terminal_size = (60, 15);
        assert!(model.is_too_small());
        model.terminal_size = (60, 16);
        assert!(!model.is_too_small());
    }

    #[test]
    fn notifications_are_bounded() {
        let mut model = test_model();
        for i in 0..5 {
            model.push_notification(NotificationLevel::Info, format!("n{i}"));
        }
        assert_eq!(model.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(model.notifications[0].message, "n2");
        assert!(model.dismiss_notification(4));
        assert!(!model.dismiss_notification(4));
    }

    #[test]
    fn scroll_stops_at_top() {
        let mut model = test_model();
        model.scroll_by(-3);
        assert_eq!(model.scroll, 0);
        model.scroll_by(4);
        model.scroll_by(-1);
        assert_eq!(model.scroll, 3);
    }

    #[test]
    fn flatten_orders_nested_batches() {
        let cmd = DashboardCmd::Batch(vec![
            DashboardCmd::None,
            DashboardCmd::Batch(vec![DashboardCmd::Quit]),
            DashboardCmd::ScheduleNotificationExpiry {
                id: 1,
                after: NOTIFICATION_TTL,
            },
        ]);
        let flat = cmd.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0], DashboardCmd::Quit);
    }
}

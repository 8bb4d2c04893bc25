//! Key routing for the dashboard runtime.
//!
//! Precedence is deterministic: the help overlay first, then global keys, then
//! keys that only mean something on the active scenario. A scenario key pressed
//! elsewhere passes through untouched.

#![allow(missing_docs)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::assessment::behavior::Flag;
use crate::assessment::navigation::Scenario;
use crate::assessment::scale::ViewMode;
use crate::assessment::shell::{Interaction, Nudge};
use crate::assessment::timeline::Timeframe;

use super::model::DashboardMsg;

/// Rows moved by PageUp/PageDown.
pub const PAGE_ROWS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    pub scenario: Scenario,
    pub help_open: bool,
}

impl Default for InputContext {
    fn default() -> Self {
        Self {
            scenario: Scenario::Overview,
            help_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    CloseHelp,
    ToggleHelp,
    Select(Scenario),
    Next,
    Prev,
    Back,
    Scroll(i32),
    Interact(Interaction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputResolution {
    pub action: Option<InputAction>,
    pub consumed: bool,
}

impl InputResolution {
    const fn action(action: InputAction) -> Self {
        Self {
            action: Some(action),
            consumed: true,
        }
    }

    const fn consumed_without_action() -> Self {
        Self {
            action: None,
            consumed: true,
        }
    }

    const fn passthrough() -> Self {
        Self {
            action: None,
            consumed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

impl HelpBinding {
    const fn new(keys: &'static str, description: &'static str) -> Self {
        Self { keys, description }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextualHelp {
    pub title: &'static str,
    pub screen_hint: &'static str,
    pub bindings: Vec<HelpBinding>,
}

/// Route a terminal key event into the dashboard message stream.
#[must_use]
pub const fn map_key_event(key: KeyEvent) -> DashboardMsg {
    DashboardMsg::Key(key)
}

/// Resolve a key event: overlay keys first, then global, then scenario keys.
#[must_use]
pub fn resolve_key_event(key: &KeyEvent, context: InputContext) -> InputResolution {
    if context.help_open {
        return resolve_help_key(key);
    }
    let global = resolve_global_key(key);
    if global.consumed {
        return global;
    }
    resolve_scenario_key(key, context.scenario)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn resolve_help_key(key: &KeyEvent) -> InputResolution {
    if is_ctrl_c(key) {
        return InputResolution::action(InputAction::Quit);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') => InputResolution::action(InputAction::CloseHelp),
        KeyCode::Char('q') => InputResolution::action(InputAction::Quit),
        _ => InputResolution::consumed_without_action(),
    }
}

fn resolve_global_key(key: &KeyEvent) -> InputResolution {
    if is_ctrl_c(key) {
        return InputResolution::action(InputAction::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputResolution::action(InputAction::Quit),
        KeyCode::Char('?') => InputResolution::action(InputAction::ToggleHelp),
        KeyCode::Char(c @ '1'..='6') => match Scenario::from_number(c as u8 - b'0') {
            Some(scenario) => InputResolution::action(InputAction::Select(scenario)),
            None => InputResolution::passthrough(),
        },
        KeyCode::Tab | KeyCode::Char(']') => InputResolution::action(InputAction::Next),
        KeyCode::BackTab | KeyCode::Char('[') => InputResolution::action(InputAction::Prev),
        KeyCode::Backspace => InputResolution::action(InputAction::Back),
        KeyCode::Up | KeyCode::Char('k') => InputResolution::action(InputAction::Scroll(-1)),
        KeyCode::Down | KeyCode::Char('j') => InputResolution::action(InputAction::Scroll(1)),
        KeyCode::PageUp => InputResolution::action(InputAction::Scroll(-PAGE_ROWS)),
        KeyCode::PageDown => InputResolution::action(InputAction::Scroll(PAGE_ROWS)),
        _ => InputResolution::passthrough(),
    }
}

fn resolve_scenario_key(key: &KeyEvent, scenario: Scenario) -> InputResolution {
    let KeyCode::Char(c) = key.code else {
        return InputResolution::passthrough();
    };
    let action = match (scenario, c) {
        (Scenario::Overview, 'a') => InputAction::Select(Scenario::Dashboard),
        (Scenario::Integration, '+' | '=') => {
            InputAction::Interact(Interaction::NudgeThreshold(Nudge::Up))
        }
        (Scenario::Integration, '-') => {
            InputAction::Interact(Interaction::NudgeThreshold(Nudge::Down))
        }
        (Scenario::Integration, 'r') => InputAction::Interact(Interaction::ResetThreshold),
        (Scenario::Time, 'w') => InputAction::Interact(Interaction::SetTimeframe(Timeframe::Week)),
        (Scenario::Time, 'm') => {
            InputAction::Interact(Interaction::SetTimeframe(Timeframe::Month))
        }
        (Scenario::Time, 'u') => {
            InputAction::Interact(Interaction::SetTimeframe(Timeframe::Quarter))
        }
        (Scenario::Behavior, 't') => InputAction::Interact(Interaction::Toggle(Flag::Alerts)),
        (Scenario::Behavior, 'd') => InputAction::Interact(Interaction::Toggle(Flag::AutoDetect)),
        (Scenario::Scale, 'g') => InputAction::Interact(Interaction::SetViewMode(ViewMode::Grid)),
        (Scenario::Scale, 'l') => {
            InputAction::Interact(Interaction::SetViewMode(ViewMode::Timeline))
        }
        _ => return InputResolution::passthrough(),
    };
    InputResolution::action(action)
}

const GLOBAL_BINDINGS: [HelpBinding; 7] = [
    HelpBinding::new("1-6", "Jump to scenario"),
    HelpBinding::new("Tab / ]", "Next scenario"),
    HelpBinding::new("S-Tab / [", "Previous scenario"),
    HelpBinding::new("Backspace", "Back through history"),
    HelpBinding::new("j / k", "Scroll content"),
    HelpBinding::new("?", "Toggle this help"),
    HelpBinding::new("q / Esc", "Quit"),
];

/// Help content for the current context.
#[must_use]
pub fn contextual_help(context: InputContext) -> ContextualHelp {
    let (screen_hint, local): (&'static str, &[HelpBinding]) = match context.scenario {
        Scenario::Overview => (
            "Pick a scenario card to assess it.",
            &[HelpBinding::new("a", "Open analytics dashboard")],
        ),
        Scenario::Integration => (
            "Raise or lower the agility-impact threshold to re-partition dependencies.",
            &[
                HelpBinding::new("+ / -", "Adjust risk threshold"),
                HelpBinding::new("r", "Reset threshold"),
            ],
        ),
        Scenario::Time => (
            "Realistic estimates inflate the base by the mean legacy overhead.",
            &[HelpBinding::new("w / m / u", "Week / month / quarter")],
        ),
        Scenario::Behavior => (
            "Active bypasses are highlighted in the feed.",
            &[
                HelpBinding::new("t", "Toggle alerts"),
                HelpBinding::new("d", "Toggle auto-detect"),
            ],
        ),
        Scenario::Scale => (
            "Timeline mode groups components by migration phase.",
            &[
                HelpBinding::new("g", "Grid view"),
                HelpBinding::new("l", "Timeline view"),
            ],
        ),
        Scenario::Dashboard => ("Aggregate risk across all scenarios.", &[]),
    };
    let mut bindings = local.to_vec();
    bindings.extend_from_slice(&GLOBAL_BINDINGS);
    ContextualHelp {
        title: context.scenario.label(),
        screen_hint,
        bindings,
    }
}

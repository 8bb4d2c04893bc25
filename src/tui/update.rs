//! Pure update function for the Elm-style dashboard.
//!
//! `update()` takes the current model and a message, mutates the model, and
//! returns a command describing any side effects the runtime should execute.
//! This module performs zero I/O.

use crossterm::event::KeyEventKind;

use crate::assessment::integration::ThresholdPartition;
use crate::assessment::navigation::Scenario;
use crate::assessment::shell::{Interaction, MountedView};
use crate::logger::activity::ActivityEvent;

use super::input::{InputAction, InputContext, resolve_key_event};
use super::model::{DashboardCmd, DashboardModel, DashboardMsg, NOTIFICATION_TTL, NotificationLevel};
use super::render::max_scroll;

/// Apply a message to the model and return the next command for the runtime.
pub fn update(model: &mut DashboardModel, msg: DashboardMsg) -> DashboardCmd {
    match msg {
        DashboardMsg::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return DashboardCmd::None;
            }
            let context = InputContext {
                scenario: model.active(),
                help_open: model.help_open,
            };
            let resolution = resolve_key_event(&key, context);
            match resolution.action {
                Some(action) => apply_input_action(model, action),
                None => DashboardCmd::None,
            }
        }

        DashboardMsg::Resize { cols, rows } => {
            model.terminal_size = (cols, rows);
            clamp_scroll(model);
            DashboardCmd::None
        }

        DashboardMsg::Select(target) => select(model, target),

        DashboardMsg::Back => {
            let from = model.active();
            if model.navigate_back() {
                DashboardCmd::Log(ActivityEvent::ScenarioSelected {
                    from,
                    to: model.active(),
                })
            } else {
                DashboardCmd::None
            }
        }

        DashboardMsg::Interact(Interaction::Select(target)) => select(model, target),

        DashboardMsg::Interact(interaction) => interact(model, interaction),

        DashboardMsg::Scroll(delta) => {
            model.scroll_by(delta);
            clamp_scroll(model);
            DashboardCmd::None
        }

        DashboardMsg::ToggleHelp => {
            model.help_open = !model.help_open;
            clamp_scroll(model);
            DashboardCmd::None
        }

        DashboardMsg::NotificationExpired(id) => {
            model.dismiss_notification(id);
            DashboardCmd::None
        }

        DashboardMsg::Quit => {
            model.quit = true;
            DashboardCmd::Quit
        }
    }
}

fn apply_input_action(model: &mut DashboardModel, action: InputAction) -> DashboardCmd {
    match action {
        InputAction::Quit => update(model, DashboardMsg::Quit),
        InputAction::CloseHelp => {
            model.help_open = false;
            clamp_scroll(model);
            DashboardCmd::None
        }
        InputAction::ToggleHelp => update(model, DashboardMsg::ToggleHelp),
        InputAction::Select(target) => select(model, target),
        InputAction::Next => select(model, model.active().next()),
        InputAction::Prev => select(model, model.active().prev()),
        InputAction::Back => update(model, DashboardMsg::Back),
        InputAction::Scroll(delta) => update(model, DashboardMsg::Scroll(delta)),
        InputAction::Interact(interaction) => update(model, DashboardMsg::Interact(interaction)),
    }
}

/// Keep the stored offset within the content currently on screen.
fn clamp_scroll(model: &mut DashboardModel) {
    model.scroll = model.scroll.min(max_scroll(model));
}

fn select(model: &mut DashboardModel, target: Scenario) -> DashboardCmd {
    let from = model.active();
    if model.navigate_to(target) {
        DashboardCmd::Log(ActivityEvent::ScenarioSelected { from, to: target })
    } else {
        DashboardCmd::None
    }
}

/// Apply a view-local interaction and describe the resulting state change.
fn interact(model: &mut DashboardModel, interaction: Interaction) -> DashboardCmd {
    if !model.shell.apply(interaction) {
        return DashboardCmd::None;
    }
    clamp_scroll(model);
    let Some((event, message)) = describe_change(model.shell.view(), interaction) else {
        return DashboardCmd::None;
    };
    let id = model.push_notification(NotificationLevel::Info, message);
    DashboardCmd::Batch(vec![
        DashboardCmd::Log(event),
        DashboardCmd::ScheduleNotificationExpiry {
            id,
            after: NOTIFICATION_TTL,
        },
    ])
}

/// Log event and footer message for an interaction that just took effect.
fn describe_change(view: &MountedView, interaction: Interaction) -> Option<(ActivityEvent, String)> {
    match (view, interaction) {
        (
            MountedView::Integration(v),
            Interaction::SetThreshold(_) | Interaction::NudgeThreshold(_) | Interaction::ResetThreshold,
        ) => {
            let threshold = v.threshold().value();
            let flagged = ThresholdPartition::new(v.dependencies(), threshold).flagged_count();
            Some((
                ActivityEvent::ThresholdChanged { threshold, flagged },
                format!("Risk threshold {threshold}%: {flagged} flagged"),
            ))
        }
        (MountedView::Behavior(v), Interaction::Toggle(flag)) => {
            let enabled = v.toggles().get(flag);
            Some((
                ActivityEvent::ToggleChanged { flag, enabled },
                format!("{} {}", flag.label(), if enabled { "on" } else { "off" }),
            ))
        }
        (MountedView::Time(v), Interaction::SetTimeframe(_)) => {
            let timeframe = v.timeframe();
            Some((
                ActivityEvent::TimeframeChanged { timeframe },
                format!("Timeframe: {}", timeframe.label()),
            ))
        }
        (MountedView::Scale(v), Interaction::SetViewMode(_)) => {
            let mode = v.view_mode();
            Some((
                ActivityEvent::ViewModeChanged { mode },
                format!("{} view", mode.label()),
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::behavior::Flag;
    use crate::assessment::shell::{Nudge, Shell, ViewSettings};
    use crate::tui::render::render_to_string;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn model_on(scenario: Scenario) -> DashboardModel {
        DashboardModel::new(Shell::new(scenario, ViewSettings::default()), (100, 30))
    }

    fn press(model: &mut DashboardModel, c: char) -> DashboardCmd {
        update(
            model,
            DashboardMsg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
        )
    }

    #[test]
    fn digit_selects_and_logs() {
        let mut model = model_on(Scenario::Overview);
        let cmd = press(&mut model, '2');
        assert_eq!(model.active(), Scenario::Integration);
        assert_eq!(
            cmd,
            DashboardCmd::Log(ActivityEvent::ScenarioSelected {
                from: Scenario::Overview,
                to: Scenario::Integration,
            })
        );
        assert_eq!(press(&mut model, '2'), DashboardCmd::None);
    }

    #[test]
    fn threshold_nudge_logs_partition() {
        let mut model = model_on(Scenario::Integration);
        let cmd = press(&mut model, '-');
        let flat = cmd.flatten();
        assert_eq!(
            flat[0],
            DashboardCmd::Log(ActivityEvent::ThresholdChanged {
                threshold: 65,
                flagged: 4,
            })
        );
        assert!(matches!(
            flat[1],
            DashboardCmd::ScheduleNotificationExpiry { .. }
        ));
        assert_eq!(model.notifications.len(), 1);
    }

    #[test]
    fn threshold_at_bound_is_a_no_op() {
        let mut model = model_on(Scenario::Integration);
        update(&mut model, DashboardMsg::Interact(Interaction::SetThreshold(100)));
        let cmd = update(
            &mut model,
            DashboardMsg::Interact(Interaction::NudgeThreshold(Nudge::Up)),
        );
        assert_eq!(cmd, DashboardCmd::None);
    }

    #[test]
    fn toggle_reports_new_value() {
        let mut model = model_on(Scenario::Behavior);
        let cmd = press(&mut model, 't');
        assert_eq!(
            cmd.flatten()[0],
            DashboardCmd::Log(ActivityEvent::ToggleChanged {
                flag: Flag::Alerts,
                enabled: false,
            })
        );
        let cmd = press(&mut model, 't');
        assert_eq!(
            cmd.flatten()[0],
            DashboardCmd::Log(ActivityEvent::ToggleChanged {
                flag: Flag::Alerts,
                enabled: true,
            })
        );
    }

    #[test]
    fn overview_a_opens_analytics_and_back_returns() {
        let mut model = model_on(Scenario::Overview);
        press(&mut model, 'a');
        assert_eq!(model.active(), Scenario::Dashboard);
        let cmd = update(
            &mut model,
            DashboardMsg::Key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
        );
        assert_eq!(model.active(), Scenario::Overview);
        assert!(matches!(cmd, DashboardCmd::Log(_)));
    }

    #[test]
    fn tab_wraps_through_sidebar() {
        let mut model = model_on(Scenario::Dashboard);
        update(
            &mut model,
            DashboardMsg::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
        );
        assert_eq!(model.active(), Scenario::Overview);
    }

    #[test]
    fn help_overlay_blocks_view_keys() {
        let mut model = model_on(Scenario::Integration);
        press(&mut model, '?');
        assert!(model.help_open);
        assert_eq!(press(&mut model, '+'), DashboardCmd::None);
        press(&mut model, '?');
        assert!(!model.help_open);
    }

    #[test]
    fn quit_sets_flag() {
        let mut model = model_on(Scenario::Overview);
        assert_eq!(press(&mut model, 'q'), DashboardCmd::Quit);
        assert!(model.quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut model = model_on(Scenario::Overview);
        let mut key = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(update(&mut model, DashboardMsg::Key(key)), DashboardCmd::None);
        assert_eq!(model.active(), Scenario::Overview);
    }

    #[test]
    fn overscroll_is_clamped_so_scrolling_up_responds() {
        let mut model = model_on(Scenario::Integration);
        let max = max_scroll(&model);
        assert!(max > 0, "integration content should overflow 100x30");

        for _ in 0..200 {
            update(&mut model, DashboardMsg::Scroll(1));
        }
        assert_eq!(model.scroll, max);
        let bottom = render_to_string(&model);

        update(&mut model, DashboardMsg::Scroll(-1));
        assert_eq!(model.scroll, max - 1);
        assert_ne!(render_to_string(&model), bottom);
    }

    #[test]
    fn growing_the_terminal_pulls_scroll_back() {
        let mut model = model_on(Scenario::Integration);
        update(&mut model, DashboardMsg::Scroll(i32::from(u16::MAX)));
        update(&mut model, DashboardMsg::Resize { cols: 100, rows: 200 });
        assert_eq!(model.scroll, max_scroll(&model));
    }

    #[test]
    fn notification_expiry_dismisses() {
        let mut model = model_on(Scenario::Scale);
        let cmd = press(&mut model, 'l');
        let id = cmd
            .flatten()
            .into_iter()
            .find_map(|c| match c {
                DashboardCmd::ScheduleNotificationExpiry { id, .. } => Some(id),
                _ => None,
            })
            .unwrap();
        update(&mut model, DashboardMsg::NotificationExpired(id));
        assert!(model.notifications.is_empty());
    }
}

//! Property-based tests for dashboard reducer invariants.
//!
//! Arbitrary sequences of keys, resizes and interactions must keep the model
//! consistent and the rendered frame exactly terminal-sized.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use proptest::prelude::*;

use super::model::{DashboardModel, DashboardMsg, MAX_NOTIFICATIONS};
use super::render::{frame_lines, max_scroll};
use super::update::update;
use crate::assessment::behavior::Flag;
use crate::assessment::navigation::Scenario;
use crate::assessment::scale::ViewMode;
use crate::assessment::shell::{Interaction, MountedView, Nudge, Shell, ViewSettings};
use crate::assessment::timeline::Timeframe;

// ──────────────────── strategies ────────────────────

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (1u8..=6).prop_map(|n| Scenario::from_number(n).unwrap_or_default())
}

fn arb_key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        (b'1'..=b'6').prop_map(|c| KeyCode::Char(char::from(c))),
        Just(KeyCode::Char('a')),
        Just(KeyCode::Char('+')),
        Just(KeyCode::Char('-')),
        Just(KeyCode::Char('r')),
        Just(KeyCode::Char('w')),
        Just(KeyCode::Char('u')),
        Just(KeyCode::Char('t')),
        Just(KeyCode::Char('d')),
        Just(KeyCode::Char('g')),
        Just(KeyCode::Char('l')),
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('?')),
        Just(KeyCode::Char('[')),
        Just(KeyCode::Char(']')),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Backspace),
        Just(KeyCode::PageDown),
        Just(KeyCode::PageUp),
    ]
}

fn arb_interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        arb_scenario().prop_map(Interaction::Select),
        (-50i32..=150).prop_map(Interaction::SetThreshold),
        Just(Interaction::NudgeThreshold(Nudge::Up)),
        Just(Interaction::NudgeThreshold(Nudge::Down)),
        Just(Interaction::ResetThreshold),
        Just(Interaction::Toggle(Flag::Alerts)),
        Just(Interaction::Toggle(Flag::AutoDetect)),
        Just(Interaction::SetTimeframe(Timeframe::Quarter)),
        Just(Interaction::SetViewMode(ViewMode::Timeline)),
    ]
}

fn arb_msg() -> impl Strategy<Value = DashboardMsg> {
    prop_oneof![
        4 => arb_key_code().prop_map(|code| DashboardMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        1 => (20u16..=200, 8u16..=60).prop_map(|(cols, rows)| DashboardMsg::Resize { cols, rows }),
        2 => arb_interaction().prop_map(DashboardMsg::Interact),
        1 => (-30i32..=30).prop_map(DashboardMsg::Scroll),
        1 => Just(DashboardMsg::Back),
        1 => (0u64..8).prop_map(DashboardMsg::NotificationExpired),
    ]
}

fn fresh_model() -> DashboardModel {
    DashboardModel::new(Shell::new(Scenario::Overview, ViewSettings::default()), (100, 30))
}

fn assert_model_invariants(model: &DashboardModel) {
    assert_eq!(model.active(), model.shell.navigation().active());
    assert_eq!(model.shell.view().content(), model.shell.navigation().render());
    assert!(model.notifications.len() <= MAX_NOTIFICATIONS);
    assert!(model.scroll <= max_scroll(model), "scroll past end of content");

    if let MountedView::Integration(view) = model.shell.view() {
        assert!(view.threshold().value() <= 100);
    }

    let (cols, rows) = model.terminal_size;
    let frame = frame_lines(model);
    assert_eq!(frame.len(), usize::from(rows), "frame height");
    for line in &frame {
        assert_eq!(line.width(), usize::from(cols), "frame width");
    }
}

// ──────────────────── property tests ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of 1-50 messages preserves all model invariants.
    #[test]
    fn reducer_preserves_invariants(
        msgs in prop::collection::vec(arb_msg(), 1..50)
    ) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
            assert_model_invariants(&model);
        }
    }

    /// The quit flag only transitions from false to true.
    #[test]
    fn quit_is_monotonic(
        msgs in prop::collection::vec(arb_msg(), 1..30),
        quit_at in 0usize..30
    ) {
        let mut model = fresh_model();
        for (i, msg) in msgs.into_iter().enumerate() {
            if i == quit_at {
                let _ = update(&mut model, DashboardMsg::Quit);
            }
            let was_quit = model.quit;
            let _ = update(&mut model, msg);
            if was_quit {
                prop_assert!(model.quit, "quit flag reverted to false after being set");
            }
        }
    }

    /// Selecting a different scenario and going back restores the original.
    #[test]
    fn select_then_back_returns(
        start in arb_scenario(),
        target in arb_scenario()
    ) {
        prop_assume!(start != target);
        let mut model = DashboardModel::new(Shell::new(start, ViewSettings::default()), (100, 30));

        update(&mut model, DashboardMsg::Select(target));
        prop_assert_eq!(model.active(), target);

        update(&mut model, DashboardMsg::Back);
        prop_assert_eq!(model.active(), start);
    }

    /// Key releases never change state.
    #[test]
    fn key_release_is_inert(code in arb_key_code()) {
        let mut model = fresh_model();
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        let before = model.active();
        let _ = update(&mut model, DashboardMsg::Key(key));
        prop_assert_eq!(model.active(), before);
        prop_assert!(!model.help_open);
        prop_assert!(model.notifications.is_empty());
    }
}

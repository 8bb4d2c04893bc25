//! Library-level checks of the assessment shell: headline numbers per view and
//! the mount/remount contract.

use legacymod::assessment::behavior::Flag;
use legacymod::assessment::scale::ViewMode;
use legacymod::assessment::timeline::Timeframe;
use legacymod::prelude::*;

fn shell_on(scenario: Scenario) -> Shell {
    Shell::new(scenario, ViewSettings::default())
}

#[test]
fn integration_headline_and_default_partition() {
    let ViewModel::Integration(vm) = shell_on(Scenario::Integration).view_model() else {
        panic!("integration view expected");
    };
    assert_eq!(vm.summary.total, 5);
    assert_eq!(vm.summary.critical, 2);
    assert_eq!(vm.summary.avg_impact, 76);
    assert_eq!(vm.threshold, 70);
    assert_eq!(vm.partition.flagged_count(), 3);
}

#[test]
fn threshold_is_clamped_and_resettable() {
    let mut shell = shell_on(Scenario::Integration);
    assert!(shell.apply(Interaction::SetThreshold(250)));
    let ViewModel::Integration(vm) = shell.view_model() else {
        panic!("integration view expected");
    };
    assert_eq!(vm.threshold, 100);
    assert_eq!(vm.partition.flagged_count(), 0);

    assert!(shell.apply(Interaction::ResetThreshold));
    let ViewModel::Integration(vm) = shell.view_model() else {
        panic!("integration view expected");
    };
    assert_eq!(vm.threshold, 70);
}

#[test]
fn time_estimate_follows_overhead_mean() {
    let ViewModel::Time(vm) = shell_on(Scenario::Time).view_model() else {
        panic!("time view expected");
    };
    assert_eq!(vm.estimate.base_days, 30);
    assert_eq!(vm.estimate.overhead_pct, 44);
    assert_eq!(vm.estimate.realistic_days, 43);
    assert_eq!(vm.summary.on_time_rate_pct, 60);
    assert_eq!(vm.timeframe, Timeframe::Month);
}

#[test]
fn behavior_and_scale_summaries() {
    let ViewModel::Behavior(vm) = shell_on(Scenario::Behavior).view_model() else {
        panic!("behavior view expected");
    };
    assert_eq!(vm.summary.users_affected, 147);
    assert!(vm.toggles.alerts);

    let ViewModel::Scale(vm) = shell_on(Scenario::Scale).view_model() else {
        panic!("scale view expected");
    };
    assert_eq!(vm.summary.avg_health, 75);
    assert_eq!(vm.summary.migration_progress_pct, 38);
}

#[test]
fn dashboard_overall_risk() {
    let ViewModel::Dashboard(vm) = shell_on(Scenario::Dashboard).view_model() else {
        panic!("dashboard view expected");
    };
    assert_eq!(vm.overall_risk, 75);
    assert_eq!(vm.scores.len(), 4);
}

#[test]
fn leaving_a_view_discards_its_local_state() {
    let mut shell = shell_on(Scenario::Behavior);
    shell.apply(Interaction::Toggle(Flag::Alerts));
    shell.select(Scenario::Scale);
    shell.apply(Interaction::SetViewMode(ViewMode::Timeline));
    shell.select(Scenario::Behavior);

    let ViewModel::Behavior(vm) = shell.view_model() else {
        panic!("behavior view expected");
    };
    assert!(vm.toggles.alerts, "toggle state survived a remount");
}

#[test]
fn reselecting_active_scenario_keeps_state() {
    let mut shell = shell_on(Scenario::Integration);
    shell.apply(Interaction::SetThreshold(50));
    assert!(!shell.select(Scenario::Integration));
    let ViewModel::Integration(vm) = shell.view_model() else {
        panic!("integration view expected");
    };
    assert_eq!(vm.threshold, 50);
}

#[test]
fn interactions_for_other_views_are_ignored() {
    let mut shell = shell_on(Scenario::Time);
    assert!(!shell.apply(Interaction::SetThreshold(10)));
    assert!(!shell.apply(Interaction::Toggle(Flag::AutoDetect)));
    assert_eq!(shell.active(), Scenario::Time);
}

#[test]
fn view_model_serializes_with_view_tag() {
    let value = serde_json::to_value(shell_on(Scenario::Scale).view_model()).expect("serialize");
    assert_eq!(value["view"], "scale");
    assert_eq!(value["view_mode"], "grid");
}

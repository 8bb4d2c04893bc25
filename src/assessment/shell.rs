//! Composition root: navigation plus the one mounted view.
//!
//! The shell owns the [`NavigationState`] and the local state of whichever
//! view is active. Selecting a different scenario drops the old view and
//! mounts the new one fresh; re-selecting the active scenario keeps it.
//! Interactions aimed at a view that is not mounted are ignored.

use serde::Serialize;

use super::analytics::{self, AnalyticsViewModel};
use super::behavior::{BehaviorView, BehaviorViewModel, Flag};
use super::integration::{self, IntegrationView, IntegrationViewModel, RiskThreshold};
use super::navigation::{ContentView, NavigationState, Scenario};
use super::overview::{self, OverviewViewModel};
use super::scale::{ScaleView, ScaleViewModel, ViewMode};
use super::timeline::{self, TimeView, TimeViewModel, Timeframe, TimelineEstimator};

/// Mount-time parameters for the stateful views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSettings {
    pub default_threshold: u8,
    pub threshold_step: u8,
    pub base_estimate_days: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_threshold: integration::DEFAULT_THRESHOLD,
            threshold_step: integration::THRESHOLD_STEP,
            base_estimate_days: timeline::DEFAULT_BASE_ESTIMATE_DAYS,
        }
    }
}

/// The active view and its local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountedView {
    Overview,
    Integration(IntegrationView),
    Time(TimeView),
    Behavior(BehaviorView),
    Scale(ScaleView),
    Dashboard,
}

impl MountedView {
    /// Fresh state for `content`.
    #[must_use]
    pub fn mount(content: ContentView, settings: &ViewSettings) -> Self {
        match content {
            ContentView::ScenarioOverview => Self::Overview,
            ContentView::IntegrationFriction => Self::Integration(IntegrationView::mount(
                RiskThreshold::new(settings.default_threshold, settings.threshold_step),
            )),
            ContentView::TimeExpectation => {
                Self::Time(TimeView::mount(TimelineEstimator::new(settings.base_estimate_days)))
            }
            ContentView::UserBehavior => Self::Behavior(BehaviorView::default()),
            ContentView::ScaleGrowth => Self::Scale(ScaleView::default()),
            ContentView::AnalyticsDashboard => Self::Dashboard,
        }
    }

    #[must_use]
    pub const fn content(&self) -> ContentView {
        match self {
            Self::Overview => ContentView::ScenarioOverview,
            Self::Integration(_) => ContentView::IntegrationFriction,
            Self::Time(_) => ContentView::TimeExpectation,
            Self::Behavior(_) => ContentView::UserBehavior,
            Self::Scale(_) => ContentView::ScaleGrowth,
            Self::Dashboard => ContentView::AnalyticsDashboard,
        }
    }

    #[must_use]
    pub fn view_model(&self) -> ViewModel {
        match self {
            Self::Overview => ViewModel::Overview(overview::view_model()),
            Self::Integration(v) => ViewModel::Integration(v.view_model()),
            Self::Time(v) => ViewModel::Time(v.view_model()),
            Self::Behavior(v) => ViewModel::Behavior(v.view_model()),
            Self::Scale(v) => ViewModel::Scale(v.view_model()),
            Self::Dashboard => ViewModel::Dashboard(analytics::view_model()),
        }
    }
}

/// Render-ready content for whichever view is mounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    Overview(OverviewViewModel),
    Integration(IntegrationViewModel),
    Time(TimeViewModel),
    Behavior(BehaviorViewModel),
    Scale(ScaleViewModel),
    Dashboard(AnalyticsViewModel),
}

/// One step of the threshold slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nudge {
    Up,
    Down,
}

/// Discrete interaction events reported by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Interaction {
    Select(Scenario),
    SetThreshold(i32),
    NudgeThreshold(Nudge),
    ResetThreshold,
    Toggle(Flag),
    SetTimeframe(Timeframe),
    SetViewMode(ViewMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    nav: NavigationState,
    view: MountedView,
    settings: ViewSettings,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Scenario::Overview, ViewSettings::default())
    }
}

impl Shell {
    #[must_use]
    pub fn new(initial: Scenario, settings: ViewSettings) -> Self {
        let nav = NavigationState::new(initial);
        Self {
            view: MountedView::mount(nav.render(), &settings),
            nav,
            settings,
        }
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    #[must_use]
    pub const fn active(&self) -> Scenario {
        self.nav.active()
    }

    #[must_use]
    pub const fn view(&self) -> &MountedView {
        &self.view
    }

    #[must_use]
    pub const fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Activate `scenario`, remounting only when it differs from the active one.
    pub fn select(&mut self, scenario: Scenario) -> bool {
        let changed = self.nav.select(scenario);
        if changed {
            self.view = MountedView::mount(self.nav.render(), &self.settings);
        }
        changed
    }

    /// Apply one interaction. Returns whether any state changed.
    pub fn apply(&mut self, interaction: Interaction) -> bool {
        match (interaction, &mut self.view) {
            (Interaction::Select(scenario), _) => self.select(scenario),
            (Interaction::SetThreshold(value), MountedView::Integration(v)) => {
                v.threshold_mut().set(value)
            }
            (Interaction::NudgeThreshold(Nudge::Up), MountedView::Integration(v)) => {
                v.threshold_mut().increase()
            }
            (Interaction::NudgeThreshold(Nudge::Down), MountedView::Integration(v)) => {
                v.threshold_mut().decrease()
            }
            (Interaction::ResetThreshold, MountedView::Integration(v)) => {
                v.threshold_mut().reset()
            }
            (Interaction::Toggle(flag), MountedView::Behavior(v)) => {
                v.toggle(flag);
                true
            }
            (Interaction::SetTimeframe(tf), MountedView::Time(v)) => v.set_timeframe(tf),
            (Interaction::SetViewMode(mode), MountedView::Scale(v)) => v.set_view_mode(mode),
            _ => false,
        }
    }

    #[must_use]
    pub fn view_model(&self) -> ViewModel {
        self.view.view_model()
    }
}

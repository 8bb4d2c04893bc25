//! Scenario navigation: the one piece of session-wide UI state.
//!
//! [`NavigationState`] holds the active [`Scenario`]. `select` replaces it and
//! `render` maps it onto exactly one [`ContentView`]. Both are total; an
//! unrecognized scenario id selects the overview.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tone::Tone;

// ──────────────────── scenarios ────────────────────

/// Top-level navigable sections, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Landing page with the four scenario cards.
    #[default]
    Overview,
    /// S1: legacy dependencies constraining agility.
    Integration,
    /// S2: delivery timelines under legacy overhead.
    Time,
    /// S3: bypass behavior and shadow systems.
    Behavior,
    /// S4: hybrid architecture growth.
    Scale,
    /// Aggregate charts across all scenarios.
    Dashboard,
}

/// Total number of scenarios (used for prev/next wrapping).
const SCENARIO_COUNT: u8 = 6;

impl Scenario {
    /// Every scenario in sidebar order.
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::Integration,
        Self::Time,
        Self::Behavior,
        Self::Scale,
        Self::Dashboard,
    ];

    /// Stable identifier used in config, CLI, and logs.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Integration => "integration",
            Self::Time => "time",
            Self::Behavior => "behavior",
            Self::Scale => "scale",
            Self::Dashboard => "dashboard",
        }
    }

    /// Resolve an identifier, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(needle))
    }

    /// Resolve an identifier; anything unrecognized is the overview.
    #[must_use]
    pub fn from_id_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// 1-based sidebar position, used for number-key hotkeys.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Overview => 1,
            Self::Integration => 2,
            Self::Time => 3,
            Self::Behavior => 4,
            Self::Scale => 5,
            Self::Dashboard => 6,
        }
    }

    /// Resolve a 1-based sidebar position. Returns `None` for out-of-range.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Overview),
            2 => Some(Self::Integration),
            3 => Some(Self::Time),
            4 => Some(Self::Behavior),
            5 => Some(Self::Scale),
            6 => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// Next sidebar entry, wrapping Dashboard → Overview.
    #[must_use]
    pub const fn next(self) -> Self {
        let n = self.number() % SCENARIO_COUNT + 1;
        match Self::from_number(n) {
            Some(s) => s,
            None => Self::Overview,
        }
    }

    /// Previous sidebar entry, wrapping Overview → Dashboard.
    #[must_use]
    pub const fn prev(self) -> Self {
        let n = if self.number() == 1 {
            SCENARIO_COUNT
        } else {
            self.number() - 1
        };
        match Self::from_number(n) {
            Some(s) => s,
            None => Self::Dashboard,
        }
    }

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Scenario Overview",
            Self::Integration => "Integration Friction",
            Self::Time => "Time & Change",
            Self::Behavior => "User Behavior",
            Self::Scale => "Scale & Growth",
            Self::Dashboard => "Analytics Dashboard",
        }
    }

    /// Short badge for the four assessment scenarios.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Integration => Some("S1"),
            Self::Time => Some("S2"),
            Self::Behavior => Some("S3"),
            Self::Scale => Some("S4"),
            Self::Overview | Self::Dashboard => None,
        }
    }

    /// Scenario hue.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Integration => Tone::Danger,
            Self::Time => Tone::Warning,
            Self::Behavior => Tone::Success,
            Self::Scale => Tone::Growth,
            Self::Overview | Self::Dashboard => Tone::Accent,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ──────────────────── content ────────────────────

/// The content component shown for the active scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentView {
    ScenarioOverview,
    IntegrationFriction,
    TimeExpectation,
    UserBehavior,
    ScaleGrowth,
    AnalyticsDashboard,
}

impl ContentView {
    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ScenarioOverview => "Legacy Modernization Scenarios",
            Self::IntegrationFriction => "Integration Friction Problem",
            Self::TimeExpectation => "Time and Change Expectation Issue",
            Self::UserBehavior => "User Behavior and Edge Cases",
            Self::ScaleGrowth => "Scale and Growth",
            Self::AnalyticsDashboard => "Analytics Dashboard",
        }
    }

    /// One-sentence framing shown under the heading.
    #[must_use]
    pub const fn lede(self) -> &'static str {
        match self {
            Self::ScenarioOverview => {
                "Assess and manage challenges across four critical modernization scenarios"
            }
            Self::IntegrationFriction => {
                "Identify which legacy dependencies most severely constrain agility and \
                 prioritize them without attempting risky, large-scale replacement."
            }
            Self::TimeExpectation => {
                "Evaluate and communicate realistic delivery timelines when legacy constraints \
                 dominate execution paths."
            }
            Self::UserBehavior => {
                "Detect and respond to repeated bypass behavior without suppressing productivity \
                 or increasing operational exposure."
            }
            Self::ScaleGrowth => {
                "Adapt decision-making and governance when hybrid architectures become the \
                 operational norm rather than a transitional exception."
            }
            Self::AnalyticsDashboard => "Comprehensive view of modernization progress",
        }
    }
}

// ──────────────────── state ────────────────────

/// Holder for the active scenario, owned by the composition root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    active: Scenario,
}

impl NavigationState {
    /// Start on `initial`.
    #[must_use]
    pub const fn new(initial: Scenario) -> Self {
        Self { active: initial }
    }

    /// Currently active scenario.
    #[must_use]
    pub const fn active(&self) -> Scenario {
        self.active
    }

    /// Replace the active scenario. Returns whether the value changed.
    pub fn select(&mut self, scenario: Scenario) -> bool {
        let changed = self.active != scenario;
        self.active = scenario;
        changed
    }

    /// Select by identifier; unrecognized ids select the overview.
    pub fn select_id(&mut self, raw: &str) -> Scenario {
        let scenario = Scenario::from_id_or_default(raw);
        self.select(scenario);
        scenario
    }

    /// Content component for the active scenario.
    #[must_use]
    pub const fn render(&self) -> ContentView {
        match self.active {
            Scenario::Overview => ContentView::ScenarioOverview,
            Scenario::Integration => ContentView::IntegrationFriction,
            Scenario::Time => ContentView::TimeExpectation,
            Scenario::Behavior => ContentView::UserBehavior,
            Scenario::Scale => ContentView::ScaleGrowth,
            Scenario::Dashboard => ContentView::AnalyticsDashboard,
        }
    }
}

// ──────────────────── chrome ────────────────────

/// Overall assessment completion shown under the sidebar.
pub const ASSESSMENT_COMPLETION_PCT: u8 = 68;

/// One sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub scenario: Scenario,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub active: bool,
}

/// Sidebar rows in fixed order, with the active entry marked.
#[must_use]
pub fn sidebar(nav: &NavigationState) -> Vec<SidebarEntry> {
    Scenario::ALL
        .into_iter()
        .map(|scenario| SidebarEntry {
            scenario,
            label: scenario.label(),
            badge: scenario.badge(),
            active: scenario == nav.active(),
        })
        .collect()
}

/// Always-rendered header content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub product: &'static str,
    pub tag: &'static str,
    pub search_hint: &'static str,
    pub user_initials: &'static str,
}

/// The header shown above every view.
pub const HEADER: Header = Header {
    product: "LegacyMod",
    tag: "Beta",
    search_hint: "Search scenarios, dependencies, metrics...",
    user_initials: "JD",
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_overview() {
        assert_eq!(NavigationState::default().active(), Scenario::Overview);
        assert_eq!(
            NavigationState::default().render(),
            ContentView::ScenarioOverview
        );
    }

    #[test]
    fn each_scenario_renders_its_own_view() {
        let expected = [
            (Scenario::Overview, ContentView::ScenarioOverview),
            (Scenario::Integration, ContentView::IntegrationFriction),
            (Scenario::Time, ContentView::TimeExpectation),
            (Scenario::Behavior, ContentView::UserBehavior),
            (Scenario::Scale, ContentView::ScaleGrowth),
            (Scenario::Dashboard, ContentView::AnalyticsDashboard),
        ];
        let mut nav = NavigationState::default();
        for (scenario, view) in expected {
            nav.select(scenario);
            assert_eq!(nav.render(), view);
        }
    }

    #[test]
    fn unknown_id_falls_back_to_overview() {
        let mut nav = NavigationState::new(Scenario::Scale);
        assert_eq!(nav.select_id("reports"), Scenario::Overview);
        assert_eq!(nav.render(), ContentView::ScenarioOverview);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Scenario::parse(" Behavior "), Some(Scenario::Behavior));
        assert_eq!(Scenario::parse("DASHBOARD"), Some(Scenario::Dashboard));
        assert_eq!(Scenario::parse(""), None);
    }

    #[test]
    fn select_reports_change() {
        let mut nav = NavigationState::default();
        assert!(!nav.select(Scenario::Overview));
        assert!(nav.select(Scenario::Time));
        assert!(!nav.select(Scenario::Time));
    }

    #[test]
    fn render_is_idempotent() {
        let mut nav = NavigationState::default();
        nav.select(Scenario::Behavior);
        assert_eq!(nav.render(), nav.render());
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(Scenario::Dashboard.next(), Scenario::Overview);
        assert_eq!(Scenario::Overview.prev(), Scenario::Dashboard);
        for s in Scenario::ALL {
            assert_eq!(s.next().prev(), s);
        }
    }

    #[test]
    fn numbers_round_trip() {
        for s in Scenario::ALL {
            assert_eq!(Scenario::from_number(s.number()), Some(s));
        }
        assert_eq!(Scenario::from_number(0), None);
        assert_eq!(Scenario::from_number(7), None);
    }

    #[test]
    fn sidebar_marks_exactly_one_active_entry() {
        let nav = NavigationState::new(Scenario::Time);
        let entries = sidebar(&nav);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries.iter().filter(|e| e.active).count(), 1);
        assert_eq!(entries[2].label, "Time & Change");
        assert_eq!(entries[2].badge, Some("S2"));
        assert!(entries[0].badge.is_none());
    }

    proptest! {
        #[test]
        fn arbitrary_ids_never_panic_and_map_totally(raw in ".{0,16}") {
            let mut nav = NavigationState::default();
            let chosen = nav.select_id(&raw);
            let known = Scenario::parse(&raw);
            prop_assert_eq!(chosen, known.unwrap_or(Scenario::Overview));
            prop_assert_eq!(nav.render(), NavigationState::new(chosen).render());
        }
    }
}

//! Aggregate analytics dashboard.
//!
//! Four chart series from independent fixtures plus one computed scalar, the
//! overall risk score. The summary cards and quick stats are fixtures in their
//! own right and are not reconciled with the per-scenario views.

use serde::Serialize;

use super::metrics::mean_rounded;
use super::navigation::{ContentView, Scenario};
use super::tone::Tone;

/// Current score of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioScore {
    pub scenario: Scenario,
    pub name: &'static str,
    pub score: u8,
}

/// One month of the risk trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub integration: u8,
    pub time: u8,
    pub behavior: u8,
    pub scale: u8,
}

impl TrendPoint {
    const fn new(month: &'static str, integration: u8, time: u8, behavior: u8, scale: u8) -> Self {
        Self {
            month,
            integration,
            time,
            behavior,
            scale,
        }
    }

    /// Value for one of the four assessment scenarios.
    #[must_use]
    pub const fn value(&self, scenario: Scenario) -> Option<u8> {
        match scenario {
            Scenario::Integration => Some(self.integration),
            Scenario::Time => Some(self.time),
            Scenario::Behavior => Some(self.behavior),
            Scenario::Scale => Some(self.scale),
            Scenario::Overview | Scenario::Dashboard => None,
        }
    }
}

/// One slice of the architecture composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub name: &'static str,
    pub value: u8,
    pub tone: Tone,
}

/// One day of detections against resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyActivity {
    pub day: &'static str,
    pub detections: u32,
    pub resolutions: u32,
}

impl WeeklyActivity {
    const fn new(day: &'static str, detections: u32, resolutions: u32) -> Self {
        Self {
            day,
            detections,
            resolutions,
        }
    }
}

pub const SCENARIO_SCORES: [ScenarioScore; 4] = [
    ScenarioScore {
        scenario: Scenario::Integration,
        name: "Integration",
        score: 85,
    },
    ScenarioScore {
        scenario: Scenario::Time,
        name: "Time",
        score: 72,
    },
    ScenarioScore {
        scenario: Scenario::Behavior,
        name: "Behavior",
        score: 78,
    },
    ScenarioScore {
        scenario: Scenario::Scale,
        name: "Scale",
        score: 65,
    },
];

pub const RISK_TREND: [TrendPoint; 6] = [
    TrendPoint::new("Aug", 92, 78, 85, 70),
    TrendPoint::new("Sep", 90, 76, 82, 68),
    TrendPoint::new("Oct", 88, 75, 80, 67),
    TrendPoint::new("Nov", 86, 73, 79, 66),
    TrendPoint::new("Dec", 85, 72, 78, 65),
    TrendPoint::new("Jan", 85, 72, 78, 65),
];

pub const SYSTEM_DISTRIBUTION: [DistributionSlice; 3] = [
    DistributionSlice {
        name: "Legacy",
        value: 35,
        tone: Tone::Danger,
    },
    DistributionSlice {
        name: "Hybrid",
        value: 25,
        tone: Tone::Warning,
    },
    DistributionSlice {
        name: "Modern",
        value: 40,
        tone: Tone::Success,
    },
];

pub const WEEKLY_ACTIVITY: [WeeklyActivity; 7] = [
    WeeklyActivity::new("Mon", 12, 8),
    WeeklyActivity::new("Tue", 8, 10),
    WeeklyActivity::new("Wed", 15, 12),
    WeeklyActivity::new("Thu", 10, 14),
    WeeklyActivity::new("Fri", 6, 9),
    WeeklyActivity::new("Sat", 3, 5),
    WeeklyActivity::new("Sun", 2, 3),
];

/// Unweighted mean of the scenario scores, rounded half-up.
#[must_use]
pub fn overall_risk(scores: &[ScenarioScore]) -> u32 {
    mean_rounded(scores, |s| u32::from(s.score))
}

/// Direction of a card's change note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
        }
    }
}

/// A headline card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
    pub change: &'static str,
    pub trend: Trend,
    pub tone: Tone,
}

/// The four headline cards. Only the first value is computed.
#[must_use]
pub fn summary_cards(overall: u32) -> [SummaryCard; 4] {
    [
        SummaryCard {
            label: "Overall Risk Score",
            value: overall.to_string(),
            change: "-3% from last month",
            trend: Trend::Down,
            tone: Tone::Success,
        },
        SummaryCard {
            label: "Critical Issues",
            value: "7".to_owned(),
            change: "+2 from last week",
            trend: Trend::Up,
            tone: Tone::Danger,
        },
        SummaryCard {
            label: "Resolved Issues",
            value: "23".to_owned(),
            change: "+8 this month",
            trend: Trend::Up,
            tone: Tone::Success,
        },
        SummaryCard {
            label: "Migration Progress",
            value: "68%".to_owned(),
            change: "+5% this quarter",
            trend: Trend::Up,
            tone: Tone::Accent,
        },
    ]
}

/// One quick-stat tile linking back to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStat {
    pub scenario: Scenario,
    pub label: &'static str,
    pub value: &'static str,
}

pub const QUICK_STATS: [QuickStat; 4] = [
    QuickStat {
        scenario: Scenario::Integration,
        label: "Integration Friction",
        value: "5 critical",
    },
    QuickStat {
        scenario: Scenario::Time,
        label: "Time Expectation",
        value: "44% overhead",
    },
    QuickStat {
        scenario: Scenario::Behavior,
        label: "User Behavior",
        value: "147 users",
    },
    QuickStat {
        scenario: Scenario::Scale,
        label: "Scale Growth",
        value: "8 systems",
    },
];

/// Render-ready analytics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsViewModel {
    pub subtitle: &'static str,
    pub updated_badge: &'static str,
    pub overall_risk: u32,
    pub cards: Vec<SummaryCard>,
    pub scores: Vec<ScenarioScore>,
    pub distribution: Vec<DistributionSlice>,
    pub trend: Vec<TrendPoint>,
    pub weekly: Vec<WeeklyActivity>,
    pub quick_stats: Vec<QuickStat>,
}

#[must_use]
pub fn view_model() -> AnalyticsViewModel {
    let overall = overall_risk(&SCENARIO_SCORES);
    AnalyticsViewModel {
        subtitle: ContentView::AnalyticsDashboard.lede(),
        updated_badge: "Last updated: Just now",
        overall_risk: overall,
        cards: summary_cards(overall).to_vec(),
        scores: SCENARIO_SCORES.to_vec(),
        distribution: SYSTEM_DISTRIBUTION.to_vec(),
        trend: RISK_TREND.to_vec(),
        weekly: WEEKLY_ACTIVITY.to_vec(),
        quick_stats: QUICK_STATS.to_vec(),
    }
}

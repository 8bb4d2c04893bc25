//! Scenario overview: the four assessment scenario cards.

use serde::Serialize;

use super::navigation::{ContentView, Scenario};
use super::tone::{Descriptor, Tone};

/// Qualitative risk band shown on a scenario card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    High,
    Medium,
}

impl RiskBand {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::High => Descriptor::new("High", Tone::Danger, '▲'),
            Self::Medium => Descriptor::new("Medium", Tone::Warning, '△'),
        }
    }
}

/// One scenario card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    /// Scenario this card opens.
    pub scenario: Scenario,
    /// 1-based scenario number.
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    /// Question the scenario asks of a modernization program.
    pub guiding_question: &'static str,
    pub risk_level: RiskBand,
    /// 0–100.
    pub impact_score: u8,
}

/// The four scenario cards, in presentation order.
#[must_use]
pub const fn summaries() -> [ScenarioSummary; 4] {
    [
        ScenarioSummary {
            scenario: Scenario::Integration,
            number: 1,
            title: "Integration Friction Problem",
            description: "New capabilities depend on data access and workflows embedded in legacy \
                          systems. Integration efforts are slow, fragile, and highly sensitive to \
                          legacy constraints.",
            guiding_question: "How should a system identify which legacy dependencies most \
                               severely constrain agility and prioritize them without attempting \
                               risky, large-scale replacement?",
            risk_level: RiskBand::High,
            impact_score: 85,
        },
        ScenarioSummary {
            scenario: Scenario::Time,
            number: 2,
            title: "Time and Change Expectation Issue",
            description: "Business stakeholders expect delivery speed comparable to modern \
                          digital platforms. Legacy change cycles remain long, opaque, and \
                          difficult to predict.",
            guiding_question: "How should a system evaluate and communicate realistic delivery \
                               timelines when legacy constraints dominate execution paths?",
            risk_level: RiskBand::Medium,
            impact_score: 72,
        },
        ScenarioSummary {
            scenario: Scenario::Behavior,
            number: 3,
            title: "User Behavior and Edge Cases",
            description: "Teams create external tools, scripts, or shadow systems to bypass slow \
                          legacy processes. Over time, fragmentation, inconsistency, and hidden \
                          risk accumulate.",
            guiding_question: "How should a system detect and respond to repeated bypass \
                               behavior without suppressing productivity or increasing \
                               operational exposure?",
            risk_level: RiskBand::High,
            impact_score: 78,
        },
        ScenarioSummary {
            scenario: Scenario::Scale,
            number: 4,
            title: "Scale and Growth",
            description: "During modernization, legacy and modern systems must coexist for \
                          extended periods. Architectural complexity increases before any \
                          simplification benefits are realized.",
            guiding_question: "How should a system adapt decision-making and governance when \
                               hybrid architectures become the operational norm rather than a \
                               transitional exception?",
            risk_level: RiskBand::Medium,
            impact_score: 65,
        },
    ]
}

/// Render-ready overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewViewModel {
    pub subtitle: &'static str,
    pub cards: Vec<ScenarioSummary>,
    /// Call-to-action that opens the analytics dashboard.
    pub analytics_cta: &'static str,
}

/// Build the overview page.
#[must_use]
pub fn view_model() -> OverviewViewModel {
    OverviewViewModel {
        subtitle: ContentView::ScenarioOverview.lede(),
        cards: summaries().to_vec(),
        analytics_cta: "View Analytics",
    }
}

/// Card for `scenario`, when it has one.
#[must_use]
pub fn summary_for(scenario: Scenario) -> Option<ScenarioSummary> {
    summaries().into_iter().find(|s| s.scenario == scenario)
}

//! Scenario 3: user bypass behavior and shadow systems.

use serde::Serialize;

use super::Insight;
use super::metrics::{count_where, sum_by};
use super::tone::{Descriptor, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Critical => Descriptor::new("critical", Tone::Danger, '◆'),
            Self::High => Descriptor::new("high", Tone::Warning, '◆'),
            Self::Medium => Descriptor::new("medium", Tone::Accent, '◇'),
            Self::Low => Descriptor::new("low", Tone::Muted, '◇'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BypassStatus {
    Active,
    Monitored,
    Resolved,
}

impl BypassStatus {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Active => Descriptor::new("active", Tone::Danger, '●'),
            Self::Monitored => Descriptor::new("monitored", Tone::Warning, '◐'),
            Self::Resolved => Descriptor::new("resolved", Tone::Success, '○'),
        }
    }
}

/// Icon family for a bypass type, chosen from its free-text name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassCategory {
    Spreadsheet,
    Script,
    Database,
    Manual,
    Other,
}

impl BypassCategory {
    /// First matching substring wins, in the order listed on the enum.
    #[must_use]
    pub fn classify(kind: &str) -> Self {
        if kind.contains("Spreadsheet") {
            Self::Spreadsheet
        } else if kind.contains("Script") {
            Self::Script
        } else if kind.contains("Database") {
            Self::Database
        } else if kind.contains("Manual") {
            Self::Manual
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Spreadsheet => '▦',
            Self::Script => '⌘',
            Self::Database => '▤',
            Self::Manual => '✎',
            Self::Other => '✱',
        }
    }
}

/// A detected workaround.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BypassBehavior {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub frequency: Frequency,
    pub risk_level: RiskLevel,
    pub users_affected: u32,
    /// ISO date, display only.
    pub detected_date: String,
    pub status: BypassStatus,
}

impl BypassBehavior {
    #[must_use]
    pub fn category(&self) -> BypassCategory {
        BypassCategory::classify(&self.kind)
    }
}

#[allow(clippy::too_many_arguments)]
fn behavior(
    id: u32,
    kind: &str,
    description: &str,
    frequency: Frequency,
    risk_level: RiskLevel,
    users_affected: u32,
    detected_date: &str,
    status: BypassStatus,
) -> BypassBehavior {
    BypassBehavior {
        id,
        kind: kind.to_owned(),
        description: description.to_owned(),
        frequency,
        risk_level,
        users_affected,
        detected_date: detected_date.to_owned(),
        status,
    }
}

/// Bypass fixture, created fresh for each mount.
#[must_use]
pub fn fixture() -> Vec<BypassBehavior> {
    use BypassStatus::{Active, Monitored, Resolved};
    use Frequency::{Daily, Weekly};
    use RiskLevel::{Critical, High, Medium};
    vec![
        behavior(
            1,
            "External Spreadsheets",
            "Teams using Google Sheets to track orders instead of legacy ERP",
            Daily,
            High,
            45,
            "2026-01-15",
            Active,
        ),
        behavior(
            2,
            "Custom Scripts",
            "Python scripts for data extraction bypassing API limits",
            Daily,
            Critical,
            12,
            "2026-01-20",
            Monitored,
        ),
        behavior(
            3,
            "Shadow Database",
            "Local SQLite copies of production data for reporting",
            Weekly,
            Critical,
            8,
            "2026-01-10",
            Active,
        ),
        behavior(
            4,
            "Manual Data Entry",
            "Duplicate data entry in modern tools and legacy system",
            Daily,
            Medium,
            67,
            "2026-01-05",
            Monitored,
        ),
        behavior(
            5,
            "API Workarounds",
            "Direct database queries instead of official API endpoints",
            Weekly,
            High,
            15,
            "2026-01-22",
            Resolved,
        ),
    ]
}

// ──────────────────── toggles ────────────────────

/// Boolean view flags. Cosmetic: neither gates any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    Alerts,
    AutoDetect,
}

impl Flag {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alerts => "Alerts",
            Self::AutoDetect => "Auto-detect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BehaviorToggles {
    pub alerts: bool,
    pub auto_detect: bool,
}

impl Default for BehaviorToggles {
    fn default() -> Self {
        Self {
            alerts: true,
            auto_detect: true,
        }
    }
}

impl BehaviorToggles {
    #[must_use]
    pub const fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Alerts => self.alerts,
            Flag::AutoDetect => self.auto_detect,
        }
    }

    /// Flip `flag` and return its new value.
    pub fn toggle(&mut self, flag: Flag) -> bool {
        let slot = match flag {
            Flag::Alerts => &mut self.alerts,
            Flag::AutoDetect => &mut self.auto_detect,
        };
        *slot = !*slot;
        *slot
    }
}

// ──────────────────── view model ────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BehaviorSummary {
    pub detected: usize,
    pub critical: usize,
    pub users_affected: u64,
    pub active: usize,
}

impl BehaviorSummary {
    #[must_use]
    pub fn from_behaviors(behaviors: &[BypassBehavior]) -> Self {
        Self {
            detected: behaviors.len(),
            critical: count_where(behaviors, |b| b.risk_level == RiskLevel::Critical),
            users_affected: sum_by(behaviors, |b| b.users_affected),
            active: count_where(behaviors, |b| b.status == BypassStatus::Active),
        }
    }
}

/// Response strategies, each with its call to action.
pub const STRATEGIES: [Insight; 3] = [
    Insight::with_action(
        "Understand",
        "Identify why users are bypassing official systems. Often indicates genuine productivity \
         blockers in legacy workflows.",
        "Run User Survey",
    ),
    Insight::with_action(
        "Accommodate",
        "Provide sanctioned alternatives that meet user needs while maintaining data integrity \
         and security controls.",
        "Create Workaround",
    ),
    Insight::with_action(
        "Modernize",
        "Prioritize modernization of specific legacy components causing the most bypass \
         behavior.",
        "View Priorities",
    ),
];

/// One feed row. Active rows are drawn with their risk tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRow {
    pub behavior: BypassBehavior,
    pub category: BypassCategory,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorViewModel {
    pub toggles: BehaviorToggles,
    pub summary: BehaviorSummary,
    pub feed: Vec<FeedRow>,
    pub strategies: Vec<Insight>,
}

/// Mounted behavior view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorView {
    behaviors: Vec<BypassBehavior>,
    toggles: BehaviorToggles,
}

impl Default for BehaviorView {
    fn default() -> Self {
        Self {
            behaviors: fixture(),
            toggles: BehaviorToggles::default(),
        }
    }
}

impl BehaviorView {
    #[must_use]
    pub fn behaviors(&self) -> &[BypassBehavior] {
        &self.behaviors
    }

    #[must_use]
    pub const fn toggles(&self) -> BehaviorToggles {
        self.toggles
    }

    pub fn toggle(&mut self, flag: Flag) -> bool {
        self.toggles.toggle(flag)
    }

    #[must_use]
    pub fn view_model(&self) -> BehaviorViewModel {
        BehaviorViewModel {
            toggles: self.toggles,
            summary: BehaviorSummary::from_behaviors(&self.behaviors),
            feed: self
                .behaviors
                .iter()
                .map(|b| FeedRow {
                    behavior: b.clone(),
                    category: b.category(),
                    highlighted: b.status == BypassStatus::Active,
                })
                .collect(),
            strategies: STRATEGIES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_over_fixture() {
        let summary = BehaviorSummary::from_behaviors(&fixture());
        assert_eq!(summary.detected, 5);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.users_affected, 147);
        assert_eq!(summary.active, 2);
    }

    #[test]
    fn categories_by_substring() {
        let categories: Vec<BypassCategory> = fixture().iter().map(BypassBehavior::category).collect();
        assert_eq!(
            categories,
            vec![
                BypassCategory::Spreadsheet,
                BypassCategory::Script,
                BypassCategory::Database,
                BypassCategory::Manual,
                BypassCategory::Other,
            ]
        );
        assert_eq!(BypassCategory::classify("Script Database"), BypassCategory::Script);
        assert_eq!(BypassCategory::classify("spreadsheet"), BypassCategory::Other);
    }

    #[test]
    fn toggles_default_on_and_flip() {
        let mut view = BehaviorView::default();
        assert!(view.toggles().alerts && view.toggles().auto_detect);
        assert!(!view.toggle(Flag::Alerts));
        assert!(!view.toggles().get(Flag::Alerts));
        assert!(view.toggles().get(Flag::AutoDetect));
        assert!(view.toggle(Flag::Alerts));
    }

    #[test]
    fn toggles_do_not_change_summary() {
        let mut view = BehaviorView::default();
        let before = view.view_model().summary;
        view.toggle(Flag::AutoDetect);
        assert_eq!(view.view_model().summary, before);
    }

    #[test]
    fn only_active_rows_are_highlighted() {
        let vm = BehaviorView::default().view_model();
        let highlighted: Vec<u32> = vm
            .feed
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.behavior.id)
            .collect();
        assert_eq!(highlighted, vec![1, 3]);
    }

    #[test]
    fn strategies_carry_actions() {
        assert!(STRATEGIES.iter().all(|s| s.action.is_some()));
        assert_eq!(STRATEGIES[1].action, Some("Create Workaround"));
    }

    #[test]
    fn descriptor_tones() {
        assert_eq!(RiskLevel::Medium.descriptor().tone, Tone::Accent);
        assert_eq!(BypassStatus::Resolved.descriptor().tone, Tone::Success);
    }
}

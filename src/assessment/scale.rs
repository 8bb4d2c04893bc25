//! Scenario 4: scale and growth of a hybrid architecture.
//!
//! Legacy, hybrid and modern components coexist. The view counts each kind,
//! averages health, and reports how many components finished migrating. The
//! stacked migration bar gets unrounded per-kind shares so its segments always
//! fill the full width.

use serde::Serialize;

use super::Insight;
use super::metrics::{count_where, mean_rounded, percent_rounded, share_pct};
use super::tone::{Descriptor, Tone, health_tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Legacy,
    Hybrid,
    Modern,
}

impl ComponentKind {
    /// Stacked-bar order.
    pub const ALL: [Self; 3] = [Self::Legacy, Self::Hybrid, Self::Modern];

    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Legacy => Descriptor::new("Legacy", Tone::Danger, '▣'),
            Self::Hybrid => Descriptor::new("Hybrid", Tone::Warning, '◩'),
            Self::Modern => Descriptor::new("Modern", Tone::Success, '◎'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationPhase {
    NotStarted,
    Planning,
    InProgress,
    Completed,
}

impl MigrationPhase {
    /// Timeline order: furthest along first.
    pub const TIMELINE: [Self; 4] = [
        Self::Completed,
        Self::InProgress,
        Self::Planning,
        Self::NotStarted,
    ];

    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Completed => Descriptor::new("completed", Tone::Success, '✔'),
            Self::InProgress => Descriptor::new("in progress", Tone::Warning, '○'),
            Self::Planning => Descriptor::new("planning", Tone::Accent, '○'),
            Self::NotStarted => Descriptor::new("not started", Tone::Muted, '!'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemComponent {
    pub id: u32,
    pub name: String,
    pub kind: ComponentKind,
    /// 0–100.
    pub health_score: u8,
    pub dependencies: u32,
    pub migration_phase: MigrationPhase,
    pub complexity: Complexity,
}

fn component(
    id: u32,
    name: &str,
    kind: ComponentKind,
    health_score: u8,
    dependencies: u32,
    migration_phase: MigrationPhase,
    complexity: Complexity,
) -> SystemComponent {
    SystemComponent {
        id,
        name: name.to_owned(),
        kind,
        health_score: health_score.min(100),
        dependencies,
        migration_phase,
        complexity,
    }
}

/// Component fixture, created fresh for each mount.
#[must_use]
pub fn fixture() -> Vec<SystemComponent> {
    use Complexity::{High, Low, Medium};
    use ComponentKind::{Hybrid, Legacy, Modern};
    use MigrationPhase::{Completed, InProgress, NotStarted, Planning};
    vec![
        component(1, "Customer Database", Legacy, 65, 12, Planning, High),
        component(2, "Order Processing", Hybrid, 78, 8, InProgress, High),
        component(3, "Inventory API", Modern, 92, 5, Completed, Medium),
        component(4, "Payment Gateway", Modern, 95, 3, Completed, Low),
        component(5, "Reporting Engine", Legacy, 55, 15, NotStarted, High),
        component(6, "User Authentication", Hybrid, 82, 10, InProgress, Medium),
        component(7, "Analytics Platform", Modern, 88, 4, Completed, Low),
        component(8, "Legacy ERP Core", Legacy, 45, 20, Planning, High),
    ]
}

// ──────────────────── view mode ────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Timeline,
}

impl ViewMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::Timeline => "Timeline",
        }
    }
}

// ──────────────────── view model ────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleSummary {
    pub legacy: usize,
    pub hybrid: usize,
    pub modern: usize,
    pub avg_health: u32,
    pub completed: usize,
    pub migration_progress_pct: u32,
}

impl ScaleSummary {
    #[must_use]
    pub fn from_components(components: &[SystemComponent]) -> Self {
        let completed = count_where(components, |c| c.migration_phase == MigrationPhase::Completed);
        Self {
            legacy: count_where(components, |c| c.kind == ComponentKind::Legacy),
            hybrid: count_where(components, |c| c.kind == ComponentKind::Hybrid),
            modern: count_where(components, |c| c.kind == ComponentKind::Modern),
            avg_health: mean_rounded(components, |c| u32::from(c.health_score)),
            completed,
            migration_progress_pct: percent_rounded(completed, components.len()),
        }
    }

    #[must_use]
    pub const fn count(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Legacy => self.legacy,
            ComponentKind::Hybrid => self.hybrid,
            ComponentKind::Modern => self.modern,
        }
    }
}

/// One segment of the stacked migration bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarSegment {
    pub kind: ComponentKind,
    pub count: usize,
    /// Unrounded share of the whole bar, in percent.
    pub share_pct: f64,
}

/// Legacy → hybrid → modern segments.
#[must_use]
pub fn migration_bar(summary: &ScaleSummary) -> Vec<BarSegment> {
    let total = summary.legacy + summary.hybrid + summary.modern;
    ComponentKind::ALL
        .into_iter()
        .map(|kind| BarSegment {
            kind,
            count: summary.count(kind),
            share_pct: share_pct(summary.count(kind), total),
        })
        .collect()
}

/// A component card with its health tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCard {
    pub component: SystemComponent,
    pub health_tone: Tone,
}

/// Cards grouped under one heading. Grid mode has a single unlabeled group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<MigrationPhase>,
    pub cards: Vec<ComponentCard>,
}

/// Arrange cards for `mode`. Fixture order is kept within every group.
#[must_use]
pub fn arrange(components: &[SystemComponent], mode: ViewMode) -> Vec<ComponentGroup> {
    let card = |c: &SystemComponent| ComponentCard {
        component: c.clone(),
        health_tone: health_tone(c.health_score),
    };
    match mode {
        ViewMode::Grid => vec![ComponentGroup {
            phase: None,
            cards: components.iter().map(card).collect(),
        }],
        ViewMode::Timeline => MigrationPhase::TIMELINE
            .into_iter()
            .filter_map(|phase| {
                let cards: Vec<ComponentCard> = components
                    .iter()
                    .filter(|c| c.migration_phase == phase)
                    .map(card)
                    .collect();
                (!cards.is_empty()).then_some(ComponentGroup {
                    phase: Some(phase),
                    cards,
                })
            })
            .collect(),
    }
}

/// Governance guidance for hybrid architectures.
pub const GOVERNANCE: [Insight; 3] = [
    Insight::new(
        "Legacy First",
        "When data consistency and stability are critical. Prefer proven patterns over new \
         approaches.",
    ),
    Insight::new(
        "Hybrid Strategy",
        "For gradual migrations. Use adapters and bridges to connect old and new systems during \
         transition.",
    ),
    Insight::new(
        "Modern First",
        "For new capabilities with minimal legacy dependencies. Move fast with cloud-native \
         approaches.",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleViewModel {
    pub view_mode: ViewMode,
    pub summary: ScaleSummary,
    pub migration_bar: Vec<BarSegment>,
    pub groups: Vec<ComponentGroup>,
    pub governance: Vec<Insight>,
}

/// Mounted scale view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleView {
    components: Vec<SystemComponent>,
    view_mode: ViewMode,
}

impl Default for ScaleView {
    fn default() -> Self {
        Self {
            components: fixture(),
            view_mode: ViewMode::default(),
        }
    }
}

impl ScaleView {
    #[must_use]
    pub fn components(&self) -> &[SystemComponent] {
        &self.components
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Returns whether the mode changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        let changed = self.view_mode != mode;
        self.view_mode = mode;
        changed
    }

    #[must_use]
    pub fn view_model(&self) -> ScaleViewModel {
        let summary = ScaleSummary::from_components(&self.components);
        ScaleViewModel {
            view_mode: self.view_mode,
            summary,
            migration_bar: migration_bar(&summary),
            groups: arrange(&self.components, self.view_mode),
            governance: GOVERNANCE.to_vec(),
        }
    }
}

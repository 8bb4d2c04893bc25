//! Scenario 1: integration friction.
//!
//! Legacy dependencies are scored by how much they constrain agility and how
//! risky they are to replace. A user-adjustable [`RiskThreshold`] flags the
//! dependencies whose agility impact meets it; nothing is ever hidden, flagged
//! rows are only highlighted.

use serde::Serialize;

use super::Insight;
use super::metrics::{count_where, mean_rounded};
use super::tone::{Descriptor, Tone};

/// Threshold a freshly mounted view starts at.
pub const DEFAULT_THRESHOLD: u8 = 70;
/// Slider increment.
pub const THRESHOLD_STEP: u8 = 5;
/// Upper bound of the slider.
pub const THRESHOLD_MAX: u8 = 100;

// ──────────────────── records ────────────────────

/// Remediation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Critical => Descriptor::new("critical", Tone::Danger, '■'),
            Self::High => Descriptor::new("high", Tone::Warning, '■'),
            Self::Medium => Descriptor::new("medium", Tone::Success, '■'),
            Self::Low => Descriptor::new("low", Tone::Muted, '□'),
        }
    }
}

/// How far the dependency assessment has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    Assessed,
    InProgress,
    Pending,
}

impl AssessmentStatus {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Assessed => Descriptor::new("assessed", Tone::Success, '✓'),
            Self::InProgress => Descriptor::new("in progress", Tone::Warning, '○'),
            Self::Pending => Descriptor::new("pending", Tone::Muted, '!'),
        }
    }
}

/// A legacy dependency that new capabilities have to go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// 0–100: how strongly this dependency slows change.
    pub agility_impact: u8,
    /// 0–100: how risky replacing it would be.
    pub replacement_risk: u8,
    pub priority: Priority,
    pub status: AssessmentStatus,
}

impl Dependency {
    fn new(
        id: u32,
        name: &str,
        category: &str,
        agility_impact: u8,
        replacement_risk: u8,
        priority: Priority,
        status: AssessmentStatus,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            category: category.to_owned(),
            agility_impact: agility_impact.min(100),
            replacement_risk: replacement_risk.min(100),
            priority,
            status,
        }
    }
}

/// Dependency fixture, created fresh for each mount.
#[must_use]
pub fn fixture() -> Vec<Dependency> {
    use AssessmentStatus::{Assessed, InProgress, Pending};
    use Priority::{Critical, High, Low, Medium};
    vec![
        Dependency::new(1, "Customer Data API", "Data Access", 92, 85, Critical, Assessed),
        Dependency::new(2, "Order Processing Workflow", "Workflow", 78, 72, High, InProgress),
        Dependency::new(3, "Inventory Sync Service", "Integration", 65, 45, Medium, Assessed),
        Dependency::new(4, "Legacy Auth Module", "Security", 88, 90, Critical, Pending),
        Dependency::new(5, "Reporting Database", "Data Access", 55, 30, Low, Pending),
    ]
}

// ──────────────────── threshold ────────────────────

/// View-local slider state. Values are clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskThreshold {
    value: u8,
    step: u8,
    initial: u8,
}

impl Default for RiskThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, THRESHOLD_STEP)
    }
}

impl RiskThreshold {
    /// Slider starting at `initial`, moving by `step`.
    #[must_use]
    pub fn new(initial: u8, step: u8) -> Self {
        let initial = initial.min(THRESHOLD_MAX);
        Self {
            value: initial,
            step: step.clamp(1, THRESHOLD_MAX),
            initial,
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub const fn step(&self) -> u8 {
        self.step
    }

    /// Set an absolute value, clamped. Returns whether the value changed.
    pub fn set(&mut self, value: i32) -> bool {
        let clamped = u8::try_from(value.clamp(0, i32::from(THRESHOLD_MAX))).unwrap_or(0);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Move up one step.
    pub fn increase(&mut self) -> bool {
        self.set(i32::from(self.value) + i32::from(self.step))
    }

    /// Move down one step.
    pub fn decrease(&mut self) -> bool {
        self.set(i32::from(self.value) - i32::from(self.step))
    }

    /// Return to the value the view was mounted with.
    pub fn reset(&mut self) -> bool {
        self.set(i32::from(self.initial))
    }
}

/// Whether `dependency` meets the threshold.
#[must_use]
pub const fn is_flagged(dependency: &Dependency, threshold: u8) -> bool {
    dependency.agility_impact >= threshold
}

/// A dependency row with its flag, in fixture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRow {
    pub dependency: Dependency,
    pub flagged: bool,
}

/// Partition of the dependency list around a threshold. Both halves are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdPartition {
    pub threshold: u8,
    pub rows: Vec<DependencyRow>,
}

impl ThresholdPartition {
    /// Flag every dependency against `threshold`, preserving order.
    #[must_use]
    pub fn new(dependencies: &[Dependency], threshold: u8) -> Self {
        Self {
            threshold,
            rows: dependencies
                .iter()
                .map(|d| DependencyRow {
                    dependency: d.clone(),
                    flagged: is_flagged(d, threshold),
                })
                .collect(),
        }
    }

    /// Rows at or above the threshold.
    pub fn flagged(&self) -> impl Iterator<Item = &Dependency> {
        self.rows
            .iter()
            .filter(|r| r.flagged)
            .map(|r| &r.dependency)
    }

    /// Rows below the threshold.
    pub fn normal(&self) -> impl Iterator<Item = &Dependency> {
        self.rows
            .iter()
            .filter(|r| !r.flagged)
            .map(|r| &r.dependency)
    }

    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.rows.iter().filter(|r| r.flagged).count()
    }
}

// ──────────────────── view model ────────────────────

/// Headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegrationSummary {
    pub total: usize,
    pub critical: usize,
    pub avg_impact: u32,
    pub assessed: usize,
}

impl IntegrationSummary {
    #[must_use]
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        Self {
            total: dependencies.len(),
            critical: count_where(dependencies, |d| d.priority == Priority::Critical),
            avg_impact: mean_rounded(dependencies, |d| u32::from(d.agility_impact)),
            assessed: count_where(dependencies, |d| d.status == AssessmentStatus::Assessed),
        }
    }
}

/// Strategic recommendations shown under the dependency list.
pub const RECOMMENDATIONS: [Insight; 2] = [
    Insight::new(
        "Incremental Modernization",
        "Focus on wrapping legacy APIs with modern interfaces before attempting full \
         replacement. This reduces risk while improving developer experience.",
    ),
    Insight::new(
        "Dependency Mapping",
        "Create comprehensive dependency maps to identify cascade effects before making changes \
         to critical integrations.",
    ),
];

/// Render-ready integration page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationViewModel {
    pub summary: IntegrationSummary,
    pub threshold: u8,
    pub partition: ThresholdPartition,
    pub recommendations: Vec<Insight>,
}

/// Mounted integration view: its fixture plus the slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationView {
    dependencies: Vec<Dependency>,
    threshold: RiskThreshold,
}

impl Default for IntegrationView {
    fn default() -> Self {
        Self::mount(RiskThreshold::default())
    }
}

impl IntegrationView {
    /// Mount with a fresh fixture and the given slider.
    #[must_use]
    pub fn mount(threshold: RiskThreshold) -> Self {
        Self {
            dependencies: fixture(),
            threshold,
        }
    }

    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    #[must_use]
    pub const fn threshold(&self) -> &RiskThreshold {
        &self.threshold
    }

    pub fn threshold_mut(&mut self) -> &mut RiskThreshold {
        &mut self.threshold
    }

    #[must_use]
    pub fn view_model(&self) -> IntegrationViewModel {
        IntegrationViewModel {
            summary: IntegrationSummary::from_dependencies(&self.dependencies),
            threshold: self.threshold.value(),
            partition: ThresholdPartition::new(&self.dependencies, self.threshold.value()),
            recommendations: RECOMMENDATIONS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn summary_over_fixture() {
        let summary = IntegrationSummary::from_dependencies(&fixture());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.avg_impact, 76);
        assert_eq!(summary.assessed, 2);
    }

    #[test]
    fn threshold_seventy_flags_three() {
        let partition = ThresholdPartition::new(&fixture(), 70);
        let flagged: Vec<u8> = partition.flagged().map(|d| d.agility_impact).collect();
        assert_eq!(flagged, vec![92, 78, 88]);
        let normal: Vec<u8> = partition.normal().map(|d| d.agility_impact).collect();
        assert_eq!(normal, vec![65, 55]);
        assert_eq!(partition.rows.len(), 5);
    }

    #[test]
    fn threshold_is_inclusive() {
        let partition = ThresholdPartition::new(&fixture(), 92);
        assert_eq!(partition.flagged_count(), 1);
        let partition = ThresholdPartition::new(&fixture(), 93);
        assert_eq!(partition.flagged_count(), 0);
    }

    #[test]
    fn threshold_steps_and_clamps() {
        let mut t = RiskThreshold::default();
        assert_eq!(t.value(), 70);
        assert!(t.increase());
        assert_eq!(t.value(), 75);
        t.set(98);
        t.increase();
        assert_eq!(t.value(), 100);
        assert!(!t.increase());
        t.set(3);
        t.decrease();
        assert_eq!(t.value(), 0);
        t.set(-40);
        assert_eq!(t.value(), 0);
        t.set(400);
        assert_eq!(t.value(), 100);
        assert!(t.reset());
        assert_eq!(t.value(), 70);
    }

    #[test]
    fn remount_resets_threshold() {
        let mut view = IntegrationView::default();
        view.threshold_mut().set(20);
        assert_eq!(view.view_model().partition.flagged_count(), 5);
        let view = IntegrationView::default();
        assert_eq!(view.threshold().value(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn priority_descriptors_are_total() {
        for p in [Priority::Critical, Priority::High, Priority::Medium, Priority::Low] {
            assert!(!p.descriptor().label.is_empty());
        }
        assert_eq!(Priority::Critical.descriptor().tone, Tone::Danger);
        assert_eq!(AssessmentStatus::Pending.descriptor().tone, Tone::Muted);
    }

    proptest! {
        #[test]
        fn partition_never_drops_rows(threshold in 0_u8..=100) {
            let deps = fixture();
            let partition = ThresholdPartition::new(&deps, threshold);
            prop_assert_eq!(partition.flagged().count() + partition.normal().count(), deps.len());
            for d in partition.flagged() {
                prop_assert!(d.agility_impact >= threshold);
            }
            for d in partition.normal() {
                prop_assert!(d.agility_impact < threshold);
            }
        }

        #[test]
        fn slider_stays_in_bounds(ops in prop::collection::vec(-3_i32..=3, 0..64)) {
            let mut t = RiskThreshold::default();
            for op in ops {
                match op {
                    0 => { t.reset(); }
                    n if n > 0 => { t.increase(); }
                    _ => { t.decrease(); }
                }
                prop_assert!(t.value() <= THRESHOLD_MAX);
            }
        }
    }
}

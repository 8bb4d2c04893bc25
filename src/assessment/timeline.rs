//! Scenario 2: time and change expectations.
//!
//! Projects carry an expected and an actual duration plus the share of their
//! schedule attributed to legacy overhead. The [`TimelineEstimator`] turns a
//! modern-platform baseline into a realistic estimate using the mean overhead.

#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use super::metrics::{count_where, mean_rounded, percent_rounded, round_half_up};
use super::tone::{Descriptor, Tone, variance_tone};

/// Modern-platform baseline, in days.
pub const DEFAULT_BASE_ESTIMATE_DAYS: u32 = 30;

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Delayed,
    AtRisk,
}

impl ProjectStatus {
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Completed => Descriptor::new("completed", Tone::Success, '✓'),
            Self::InProgress => Descriptor::new("in progress", Tone::Accent, '◔'),
            Self::Delayed => Descriptor::new("delayed", Tone::Danger, '✗'),
            Self::AtRisk => Descriptor::new("at risk", Tone::Warning, '△'),
        }
    }

    /// Delayed and at-risk projects both count against on-time delivery.
    #[must_use]
    pub const fn is_late(self) -> bool {
        matches!(self, Self::Delayed | Self::AtRisk)
    }
}

/// A legacy-dependent delivery project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub expected_days: u32,
    pub actual_days: u32,
    /// Schedule inflation attributed to legacy constraints, in percent.
    pub legacy_overhead_pct: u32,
    pub status: ProjectStatus,
    pub legacy_dependencies: u32,
}

impl Project {
    /// `(actual - expected) / expected * 100`, rounded. Zero expected yields 0.
    #[must_use]
    pub fn variance_pct(&self) -> i64 {
        if self.expected_days == 0 {
            return 0;
        }
        let delta = f64::from(self.actual_days) - f64::from(self.expected_days);
        round_half_up(delta / f64::from(self.expected_days) * 100.0)
    }

    /// `min(actual / expected * 100, 100)`. Zero expected counts as done.
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        if self.expected_days == 0 {
            return 100.0;
        }
        (f64::from(self.actual_days) / f64::from(self.expected_days) * 100.0).min(100.0)
    }
}

fn project(
    id: u32,
    name: &str,
    expected_days: u32,
    actual_days: u32,
    legacy_overhead_pct: u32,
    status: ProjectStatus,
    legacy_dependencies: u32,
) -> Project {
    Project {
        id,
        name: name.to_owned(),
        expected_days,
        actual_days,
        legacy_overhead_pct,
        status,
        legacy_dependencies,
    }
}

/// Project fixture, created fresh for each mount.
#[must_use]
pub fn fixture() -> Vec<Project> {
    use ProjectStatus::{AtRisk, Completed, Delayed, InProgress};
    vec![
        project(1, "Customer Portal Redesign", 45, 72, 60, Delayed, 8),
        project(2, "Payment Gateway Integration", 30, 28, 35, Completed, 3),
        project(3, "Inventory Management Module", 60, 45, 52, InProgress, 6),
        project(4, "Analytics Dashboard", 25, 38, 45, AtRisk, 4),
        project(5, "Mobile App Backend", 40, 32, 28, InProgress, 2),
    ]
}

// ──────────────────── estimator ────────────────────

/// Realistic-timeline calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEstimator {
    pub base_days: u32,
}

impl Default for TimelineEstimator {
    fn default() -> Self {
        Self {
            base_days: DEFAULT_BASE_ESTIMATE_DAYS,
        }
    }
}

impl TimelineEstimator {
    #[must_use]
    pub const fn new(base_days: u32) -> Self {
        Self { base_days }
    }

    /// `round(base * (1 + overhead / 100))`.
    #[must_use]
    pub fn realistic(&self, overhead_mean_pct: u32) -> u32 {
        let factor = 1.0 + f64::from(overhead_mean_pct) / 100.0;
        u32::try_from(round_half_up(f64::from(self.base_days) * factor)).unwrap_or(u32::MAX)
    }
}

// ──────────────────── timeframe ────────────────────

/// Reporting window selector. Cosmetic: the fixture is not windowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
}

impl Timeframe {
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Quarter];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
        }
    }
}

// ──────────────────── view model ────────────────────

/// Headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSummary {
    pub avg_overhead_pct: u32,
    /// Delayed plus at-risk.
    pub late: usize,
    pub on_time_rate_pct: u32,
    pub total: usize,
}

impl TimeSummary {
    #[must_use]
    pub fn from_projects(projects: &[Project]) -> Self {
        let late = count_where(projects, |p| p.status.is_late());
        Self {
            avg_overhead_pct: mean_rounded(projects, |p| p.legacy_overhead_pct),
            late,
            on_time_rate_pct: percent_rounded(projects.len() - late, projects.len()),
            total: projects.len(),
        }
    }
}

/// One row of the tracking list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub project: Project,
    pub variance_pct: i64,
    pub variance_tone: Tone,
    pub progress_pct: f64,
}

/// The calculator panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimatePanel {
    pub base_days: u32,
    pub overhead_pct: u32,
    pub realistic_days: u32,
}

/// A stakeholder communication template with its placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub title: &'static str,
    pub body: String,
}

/// Stakeholder templates, filled from the live summary.
#[must_use]
pub fn communication_templates(projects: &[Project], summary: &TimeSummary) -> [Template; 2] {
    let risk = if summary.late > 0 { "elevated" } else { "normal" };
    let first_deps = projects.first().map_or(0, |p| p.legacy_dependencies);
    [
        Template {
            title: "Timeline Adjustment Notice",
            body: format!(
                "Based on legacy system analysis, we recommend adding {}% buffer to the baseline \
                 estimate. This accounts for integration testing, data migration constraints, and \
                 coordination with existing workflows.",
                summary.avg_overhead_pct
            ),
        },
        Template {
            title: "Risk Communication",
            body: format!(
                "This project has {risk} timeline risk due to dependencies on {first_deps} legacy \
                 systems. We've built in appropriate contingency based on historical performance \
                 data."
            ),
        },
    ]
}

/// Render-ready time page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeViewModel {
    pub timeframe: Timeframe,
    pub summary: TimeSummary,
    pub estimate: EstimatePanel,
    pub rows: Vec<ProjectRow>,
    pub templates: Vec<Template>,
}

/// Mounted time view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeView {
    projects: Vec<Project>,
    estimator: TimelineEstimator,
    timeframe: Timeframe,
}

impl Default for TimeView {
    fn default() -> Self {
        Self::mount(TimelineEstimator::default())
    }
}

impl TimeView {
    #[must_use]
    pub fn mount(estimator: TimelineEstimator) -> Self {
        Self {
            projects: fixture(),
            estimator,
            timeframe: Timeframe::default(),
        }
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns whether the selection changed.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> bool {
        let changed = self.timeframe != timeframe;
        self.timeframe = timeframe;
        changed
    }

    #[must_use]
    pub fn view_model(&self) -> TimeViewModel {
        let summary = TimeSummary::from_projects(&self.projects);
        let rows = self
            .projects
            .iter()
            .map(|p| {
                let variance = p.variance_pct();
                ProjectRow {
                    project: p.clone(),
                    variance_pct: variance,
                    variance_tone: variance_tone(variance),
                    progress_pct: p.progress_pct(),
                }
            })
            .collect();
        TimeViewModel {
            timeframe: self.timeframe,
            summary,
            estimate: EstimatePanel {
                base_days: self.estimator.base_days,
                overhead_pct: summary.avg_overhead_pct,
                realistic_days: self.estimator.realistic(summary.avg_overhead_pct),
            },
            rows,
            templates: communication_templates(&self.projects, &summary).to_vec(),
        }
    }
}

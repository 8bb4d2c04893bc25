//! Frame composition for the dashboard.
//!
//! Rendering is two-phase. [`frame_lines`] lays the whole screen out as styled
//! [`Line`]s, each exactly as wide as the terminal, with no terminal access.
//! [`render_frame`] paints those lines through crossterm, and
//! [`render_to_string`] flattens them to plain text for tests and the `view`
//! command. Both phases are idempotent.

#![allow(missing_docs)]

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::assessment::Insight;
use crate::assessment::analytics::AnalyticsViewModel;
use crate::assessment::behavior::{BehaviorViewModel, Flag};
use crate::assessment::integration::IntegrationViewModel;
use crate::assessment::navigation::{ASSESSMENT_COMPLETION_PCT, HEADER, sidebar};
use crate::assessment::overview::OverviewViewModel;
use crate::assessment::scale::{ScaleViewModel, ViewMode};
use crate::assessment::shell::{Shell, ViewModel};
use crate::assessment::timeline::{TimeViewModel, Timeframe};
use crate::assessment::tone::{Descriptor, Tone};

use super::input::{InputContext, contextual_help};
use super::model::{DashboardModel, MIN_COLS, MIN_ROWS, NotificationLevel};
use super::theme::Theme;
use super::widgets::{gauge, hbar, sparkline, stacked_widths, truncate, wrap};

/// Sidebar column width, excluding the divider.
pub const SIDEBAR_WIDTH: usize = 30;

// ──────────────────── styled text ────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: true,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// One terminal row of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub const fn blank() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    pub fn heading(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::bold(text, tone)],
        }
    }

    #[must_use]
    pub fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Truncate or pad to exactly `width` cells. A cut is marked with `…`.
    #[must_use]
    pub fn fit(self, width: usize) -> Self {
        let mut used = self.width();
        let mut spans = self.spans;
        if used > width {
            let mut kept = Vec::with_capacity(spans.len());
            used = 0;
            for span in spans {
                let remaining = width - used;
                if span.width() < remaining {
                    used += span.width();
                    kept.push(span);
                } else {
                    let text = truncate(&span.text, remaining);
                    used += text.chars().count();
                    kept.push(Span { text, ..span });
                    break;
                }
            }
            spans = kept;
        }
        if used < width {
            spans.push(Span::new(" ".repeat(width - used), Tone::Neutral));
        }
        Self { spans }
    }

    fn concat(mut self, other: Self) -> Self {
        self.spans.extend(other.spans);
        self
    }
}

fn descriptor_span(d: Descriptor) -> Span {
    Span::new(format!("{} {}", d.glyph, d.label), d.tone)
}

fn indent(n: usize) -> Span {
    Span::new(" ".repeat(n), Tone::Neutral)
}

/// Word-wrap `text` into lines prefixed by `pad` spaces.
fn wrapped(text: &str, width: usize, pad: usize, tone: Tone) -> Vec<Line> {
    wrap(text, width.saturating_sub(pad).max(8))
        .into_iter()
        .map(|l| Line::blank().push(indent(pad)).push(Span::new(l, tone)))
        .collect()
}

fn section(out: &mut Vec<Line>, title: &str, description: Option<&str>, width: usize) {
    out.push(Line::blank());
    out.push(Line::heading(title, Tone::Neutral));
    if let Some(description) = description {
        out.extend(wrapped(description, width, 0, Tone::Muted));
    }
}

fn insights(out: &mut Vec<Line>, items: &[Insight], width: usize) {
    for item in items {
        out.push(Line::blank().push(indent(2)).push(Span::bold(item.title, Tone::Accent)));
        out.extend(wrapped(item.body, width, 4, Tone::Muted));
        if let Some(action) = item.action {
            out.push(Line::blank().push(indent(4)).push(Span::new(format!("[{action}]"), Tone::Accent)));
        }
    }
}

// ──────────────────── metric cards ────────────────────

struct Card {
    label: &'static str,
    value: String,
    tone: Tone,
    note: Option<String>,
}

impl Card {
    fn new(label: &'static str, value: impl ToString, tone: Tone) -> Self {
        Self {
            label,
            value: value.to_string(),
            tone,
            note: None,
        }
    }
}

/// Lay cards out side by side, wrapping to more rows when cells get narrow.
fn cards(out: &mut Vec<Line>, items: &[Card], width: usize) {
    const MIN_CELL: usize = 20;
    let per_row = (width / MIN_CELL).clamp(1, items.len().max(1));
    let cell = width / per_row;
    let fit_cell = |line: Line| line.fit(cell.saturating_sub(1)).push(indent(1));
    let has_note = items.iter().any(|c| c.note.is_some());
    for chunk in items.chunks(per_row) {
        let mut label = Line::blank();
        let mut value = Line::blank();
        let mut note = Line::blank();
        for card in chunk {
            label = label.concat(fit_cell(Line::styled(card.label.to_uppercase(), Tone::Muted)));
            value = value.concat(fit_cell(Line::heading(card.value.clone(), card.tone)));
            let text = card.note.clone().unwrap_or_default();
            note = note.concat(fit_cell(Line::styled(text, Tone::Muted)));
        }
        out.push(label);
        out.push(value);
        if has_note {
            out.push(note);
        }
    }
}

/// Horizontal stacked bar, one colored run per `(share_pct, tone)` segment.
fn stacked_bar(segments: &[(f64, Tone)], width: usize) -> Line {
    let shares: Vec<f64> = segments.iter().map(|(s, _)| *s).collect();
    let widths = stacked_widths(&shares, width);
    segments
        .iter()
        .zip(widths)
        .filter(|(_, w)| *w > 0)
        .fold(Line::blank(), |line, ((_, tone), w)| {
            line.push(Span::new("█".repeat(w), *tone))
        })
}

fn selector<T: Copy + PartialEq>(options: &[T], active: T, label: impl Fn(T) -> &'static str) -> Vec<Span> {
    options
        .iter()
        .map(|option| {
            if *option == active {
                Span::bold(format!("[{}] ", label(*option)), Tone::Accent)
            } else {
                Span::new(format!(" {}  ", label(*option)), Tone::Muted)
            }
        })
        .collect()
}

fn bar_width(width: usize) -> usize {
    (width / 3).clamp(10, 30)
}

// ──────────────────── views ────────────────────

fn overview_lines(vm: &OverviewViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    for card in &vm.cards {
        let risk = card.risk_level.descriptor();
        out.push(
            Line::blank()
                .push(Span::bold(format!("[{}] ", card.scenario.number()), Tone::Accent))
                .push(Span::bold(format!("S{} ", card.number), card.scenario.tone()))
                .push(Span::bold(card.title, Tone::Neutral)),
        );
        out.extend(wrapped(card.description, width, 4, Tone::Neutral));
        out.extend(wrapped(&format!("\"{}\"", card.guiding_question), width, 4, Tone::Muted));
        out.push(
            Line::blank()
                .push(indent(4))
                .push(Span::new("Risk: ", Tone::Muted))
                .push(Span::new(format!("{} {}", risk.glyph, risk.label), risk.tone))
                .push(Span::new("   Impact Score: ", Tone::Muted))
                .push(Span::bold(card.impact_score.to_string(), card.scenario.tone())),
        );
        out.push(Line::blank());
    }
    out.push(
        Line::blank()
            .push(Span::bold("[a] ", Tone::Accent))
            .push(Span::bold(format!("{} →", vm.analytics_cta), Tone::Accent)),
    );
    out
}

fn integration_lines(vm: &IntegrationViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    let s = vm.summary;
    cards(
        &mut out,
        &[
            Card::new("Total Dependencies", s.total, Tone::Neutral),
            Card::new("Critical Items", s.critical, Tone::Danger),
            Card::new("Avg Impact Score", s.avg_impact, Tone::Warning),
            Card::new("Assessed", s.assessed, Tone::Success),
        ],
        width,
    );

    section(
        &mut out,
        "Risk Threshold Configuration",
        Some("Set the agility impact threshold to filter high-priority dependencies"),
        width,
    );
    out.push(
        Line::blank()
            .push(Span::new("Agility Impact Threshold ", Tone::Muted))
            .push(Span::bold(gauge(f64::from(vm.threshold), bar_width(width)), Tone::Danger)),
    );
    out.extend(wrapped(
        &format!(
            "{} dependencies at or above the threshold are flagged as high priority",
            vm.partition.flagged_count()
        ),
        width,
        0,
        Tone::Muted,
    ));

    section(
        &mut out,
        "Legacy Dependencies",
        Some("Prioritized list of legacy system dependencies affecting agility"),
        width,
    );
    for row in &vm.partition.rows {
        let d = &row.dependency;
        let marker = if row.flagged {
            Span::bold("▲ ", Tone::Danger)
        } else {
            indent(2)
        };
        out.push(
            Line::blank()
                .push(marker)
                .push(Span::bold(d.name.clone(), Tone::Neutral))
                .push(indent(2))
                .push(descriptor_span(d.priority.descriptor()))
                .push(indent(2))
                .push(descriptor_span(d.status.descriptor())),
        );
        let impact_tone = if row.flagged { Tone::Danger } else { Tone::Neutral };
        out.push(
            Line::blank()
                .push(indent(4))
                .push(Span::new(format!("{}   ", d.category), Tone::Muted))
                .push(Span::new("Agility Impact ", Tone::Muted))
                .push(Span::bold(format!("{}%", d.agility_impact), impact_tone))
                .push(Span::new("   Replacement Risk ", Tone::Muted))
                .push(Span::bold(format!("{}%", d.replacement_risk), Tone::Warning)),
        );
    }

    section(&mut out, "Strategic Recommendations", None, width);
    insights(&mut out, &vm.recommendations, width);
    out
}

fn time_lines(vm: &TimeViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    out.push(Line {
        spans: std::iter::once(Span::new("Timeframe ", Tone::Muted))
            .chain(selector(&Timeframe::ALL, vm.timeframe, Timeframe::label))
            .collect(),
    });
    out.push(Line::blank());

    let s = vm.summary;
    cards(
        &mut out,
        &[
            Card::new("Avg Legacy Overhead", format!("{}%", s.avg_overhead_pct), Tone::Danger),
            Card::new("On-Time Delivery", format!("{}%", s.on_time_rate_pct), Tone::Success),
            Card::new("At Risk / Delayed", s.late, Tone::Warning),
            Card::new("Active Projects", s.total, Tone::Accent),
        ],
        width,
    );

    section(
        &mut out,
        "Legacy Overhead Timeline Calculator",
        Some("Estimate realistic timelines accounting for legacy constraints"),
        width,
    );
    let e = vm.estimate;
    out.push(
        Line::blank()
            .push(Span::new("Base Estimate ", Tone::Muted))
            .push(Span::bold(format!("{} days", e.base_days), Tone::Neutral))
            .push(Span::new("  +  Legacy Overhead ", Tone::Muted))
            .push(Span::bold(format!("{}%", e.overhead_pct), Tone::Danger))
            .push(Span::new("  =  Realistic ", Tone::Muted))
            .push(Span::bold(format!("{} days", e.realistic_days), Tone::Accent)),
    );

    section(
        &mut out,
        "Project Timeline Tracking",
        Some("Compare expected vs actual delivery across legacy-dependent projects"),
        width,
    );
    for row in &vm.rows {
        let p = &row.project;
        out.push(
            Line::blank()
                .push(Span::bold(p.name.clone(), Tone::Neutral))
                .push(indent(2))
                .push(descriptor_span(p.status.descriptor())),
        );
        out.push(
            Line::blank()
                .push(indent(4))
                .push(Span::new(
                    format!("Expected {}d  Actual {}d  Variance ", p.expected_days, p.actual_days),
                    Tone::Muted,
                ))
                .push(Span::bold(format!("{:+}%", row.variance_pct), row.variance_tone))
                .push(Span::new(
                    format!(
                        "  Overhead {}%  Legacy deps {}",
                        p.legacy_overhead_pct, p.legacy_dependencies
                    ),
                    Tone::Muted,
                )),
        );
        out.push(
            Line::blank()
                .push(indent(4))
                .push(Span::new(gauge(row.progress_pct, bar_width(width)), row.variance_tone)),
        );
    }

    section(
        &mut out,
        "Stakeholder Communication Templates",
        Some("Pre-built templates for communicating realistic timelines"),
        width,
    );
    for template in &vm.templates {
        out.push(Line::blank().push(indent(2)).push(Span::bold(template.title, Tone::Accent)));
        out.extend(wrapped(&template.body, width, 4, Tone::Muted));
    }
    out
}

fn toggle_span(flag: Flag, on: bool) -> [Span; 2] {
    [
        Span::new(format!("{} ", flag.label()), Tone::Muted),
        if on {
            Span::bold("[on]  ", Tone::Success)
        } else {
            Span::new("[off] ", Tone::Muted)
        },
    ]
}

fn behavior_lines(vm: &BehaviorViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    out.push(Line {
        spans: [Flag::Alerts, Flag::AutoDetect]
            .into_iter()
            .flat_map(|flag| toggle_span(flag, vm.toggles.get(flag)))
            .collect(),
    });
    out.push(Line::blank());

    let s = vm.summary;
    cards(
        &mut out,
        &[
            Card::new("Detected Bypasses", s.detected, Tone::Accent),
            Card::new("Critical Risk", s.critical, Tone::Danger),
            Card::new("Users Affected", s.users_affected, Tone::Warning),
            Card::new("Active Issues", s.active, Tone::Growth),
        ],
        width,
    );

    section(
        &mut out,
        "Bypass Detection Feed",
        Some("Real-time monitoring of shadow systems and workaround behaviors"),
        width,
    );
    for row in &vm.feed {
        let b = &row.behavior;
        let marker = if row.highlighted {
            Span::bold("● ", Tone::Danger)
        } else {
            indent(2)
        };
        out.push(
            Line::blank()
                .push(marker)
                .push(Span::new(format!("{} ", row.category.glyph()), Tone::Accent))
                .push(Span::bold(b.kind.clone(), Tone::Neutral))
                .push(indent(2))
                .push(descriptor_span(b.risk_level.descriptor()))
                .push(indent(2))
                .push(descriptor_span(b.status.descriptor())),
        );
        out.extend(wrapped(&b.description, width, 4, Tone::Neutral));
        out.push(Line::blank().push(indent(4)).push(Span::new(
            format!(
                "{} · {} users · detected {}",
                b.frequency.label(),
                b.users_affected,
                b.detected_date
            ),
            Tone::Muted,
        )));
    }

    section(&mut out, "Response Strategies", None, width);
    insights(&mut out, &vm.strategies, width);
    out
}

fn scale_lines(vm: &ScaleViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    out.push(Line {
        spans: std::iter::once(Span::new("View ", Tone::Muted))
            .chain(selector(&[ViewMode::Grid, ViewMode::Timeline], vm.view_mode, ViewMode::label))
            .collect(),
    });
    out.push(Line::blank());

    let s = vm.summary;
    cards(
        &mut out,
        &[
            Card::new("Legacy Systems", s.legacy, Tone::Danger),
            Card::new("Hybrid Systems", s.hybrid, Tone::Warning),
            Card::new("Modern Systems", s.modern, Tone::Success),
            Card::new("Avg Health", format!("{}%", s.avg_health), Tone::Accent),
            Card::new("Migration", format!("{}%", s.migration_progress_pct), Tone::Growth),
        ],
        width,
    );

    section(
        &mut out,
        "Overall Migration Progress",
        Some("Track the transition from legacy to modern architecture"),
        width,
    );
    let segments: Vec<(f64, Tone)> = vm
        .migration_bar
        .iter()
        .map(|seg| (seg.share_pct, seg.kind.descriptor().tone))
        .collect();
    out.push(stacked_bar(&segments, width.min(60)));
    out.push(vm.migration_bar.iter().fold(Line::blank(), |line, seg| {
        let d = seg.kind.descriptor();
        line.push(Span::new(format!("{} {} ({})  ", d.glyph, d.label, seg.count), d.tone))
    }));

    section(
        &mut out,
        "System Components",
        Some("Inventory of all system components and their modernization status"),
        width,
    );
    for group in &vm.groups {
        let pad = if let Some(phase) = group.phase {
            let d = phase.descriptor();
            out.push(Line::heading(format!("{} {}", d.glyph, d.label), d.tone));
            4
        } else {
            2
        };
        for card in &group.cards {
            let c = &card.component;
            let kind = c.kind.descriptor();
            out.push(
                Line::blank()
                    .push(indent(pad - 2))
                    .push(Span::new(format!("{} ", kind.glyph), kind.tone))
                    .push(Span::bold(c.name.clone(), Tone::Neutral))
                    .push(Span::new("  health ", Tone::Muted))
                    .push(Span::bold(format!("{}%", c.health_score), card.health_tone)),
            );
            let mut detail = Line::blank().push(indent(pad)).push(Span::new(
                format!("{} deps · {} complexity", c.dependencies, c.complexity.label()),
                Tone::Muted,
            ));
            if group.phase.is_none() {
                detail = detail
                    .push(Span::new(" · ", Tone::Muted))
                    .push(descriptor_span(c.migration_phase.descriptor()));
            }
            out.push(detail);
        }
    }

    section(
        &mut out,
        "Hybrid Architecture Governance",
        Some("Decision framework for managing coexisting legacy and modern systems"),
        width,
    );
    insights(&mut out, &vm.governance, width);
    out
}

/// Normalize a series against its own range so small movements stay visible.
fn trend_spark(values: &[u8]) -> String {
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    if max == min {
        return sparkline(&vec![0.5; values.len()]);
    }
    let span = f64::from(max - min);
    let normalized: Vec<f64> = values.iter().map(|v| f64::from(v - min) / span).collect();
    sparkline(&normalized)
}

fn dashboard_lines(vm: &AnalyticsViewModel, width: usize) -> Vec<Line> {
    let mut out = Vec::new();
    out.push(Line::styled(vm.updated_badge, Tone::Muted));
    out.push(Line::blank());

    let summary: Vec<Card> = vm
        .cards
        .iter()
        .map(|c| Card {
            label: c.label,
            value: c.value.clone(),
            tone: c.tone,
            note: Some(format!("{} {}", c.trend.glyph(), c.change)),
        })
        .collect();
    cards(&mut out, &summary, width);

    let bar = bar_width(width);
    section(&mut out, "Scenario Risk Scores", None, width);
    for score in &vm.scores {
        out.push(
            Line::blank()
                .push(Span::new(format!("{:<12}", score.name), Tone::Neutral))
                .push(Span::new(hbar(u32::from(score.score), 100, bar), score.scenario.tone()))
                .push(Span::bold(format!(" {}", score.score), score.scenario.tone())),
        );
    }

    section(&mut out, "System Distribution", None, width);
    let segments: Vec<(f64, Tone)> = vm
        .distribution
        .iter()
        .map(|slice| (f64::from(slice.value), slice.tone))
        .collect();
    out.push(stacked_bar(&segments, width.min(60)));
    out.push(vm.distribution.iter().fold(Line::blank(), |line, slice| {
        line.push(Span::new(format!("{} {}%  ", slice.name, slice.value), slice.tone))
    }));

    section(&mut out, "Risk Trend Over Time", None, width);
    if let (Some(first), Some(last)) = (vm.trend.first(), vm.trend.last()) {
        out.push(Line::styled(
            format!("{:<12}{} → {}", "", first.month, last.month),
            Tone::Muted,
        ));
    }
    for score in &vm.scores {
        let series: Vec<u8> = vm
            .trend
            .iter()
            .filter_map(|p| p.value(score.scenario))
            .collect();
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            continue;
        };
        out.push(
            Line::blank()
                .push(Span::new(format!("{:<12}", score.name), Tone::Neutral))
                .push(Span::new(trend_spark(&series), score.scenario.tone()))
                .push(Span::new(format!("  {first} → {last}"), Tone::Muted)),
        );
    }

    section(&mut out, "Weekly Activity", None, width);
    let peak = vm
        .weekly
        .iter()
        .map(|d| d.detections.max(d.resolutions))
        .max()
        .unwrap_or(0);
    let half = (bar / 2).max(5);
    for day in &vm.weekly {
        out.push(
            Line::blank()
                .push(Span::new(format!("{} ", day.day), Tone::Neutral))
                .push(Span::new(hbar(day.detections, peak, half), Tone::Danger))
                .push(Span::new(format!(" {:>2}  ", day.detections), Tone::Muted))
                .push(Span::new(hbar(day.resolutions, peak, half), Tone::Success))
                .push(Span::new(format!(" {:>2}", day.resolutions), Tone::Muted)),
        );
    }
    out.push(
        Line::blank()
            .push(Span::new("■ detections  ", Tone::Danger))
            .push(Span::new("■ resolutions", Tone::Success)),
    );

    section(&mut out, "Quick Stats", None, width);
    for stat in &vm.quick_stats {
        out.push(
            Line::blank()
                .push(Span::bold(format!("[{}] ", stat.scenario.number()), Tone::Accent))
                .push(Span::new(format!("{}: ", stat.label), Tone::Muted))
                .push(Span::bold(stat.value, stat.scenario.tone())),
        );
    }
    out
}

/// Heading, lede and body of the mounted view, wrapped to `width`.
#[must_use]
pub fn content_lines(shell: &Shell, width: usize) -> Vec<Line> {
    let content = shell.view().content();
    let scenario = shell.active();
    let mut title = Line::heading(content.title(), Tone::Neutral);
    if let Some(badge) = scenario.badge() {
        title = title.push(Span::bold(format!("  {badge}"), scenario.tone()));
    }
    let mut out = vec![title];
    out.extend(wrapped(content.lede(), width, 0, Tone::Muted));
    out.push(Line::blank());
    out.extend(match shell.view_model() {
        ViewModel::Overview(vm) => overview_lines(&vm, width),
        ViewModel::Integration(vm) => integration_lines(&vm, width),
        ViewModel::Time(vm) => time_lines(&vm, width),
        ViewModel::Behavior(vm) => behavior_lines(&vm, width),
        ViewModel::Scale(vm) => scale_lines(&vm, width),
        ViewModel::Dashboard(vm) => dashboard_lines(&vm, width),
    });
    out
}

// ──────────────────── chrome ────────────────────

fn header_line(cols: usize) -> Line {
    let left = Line::blank()
        .push(Span::bold(format!(" ◆ {}", HEADER.product), Tone::Accent))
        .push(Span::new(format!(" [{}]", HEADER.tag), Tone::Muted));
    let right = format!("{} ", HEADER.user_initials);
    let search = format!("   ⌕ {}", HEADER.search_hint);
    let gap = cols.saturating_sub(left.width() + right.chars().count());
    let mut line = left;
    if gap > search.chars().count() + 1 {
        line = line
            .push(Span::new(search.clone(), Tone::Muted))
            .push(indent(gap - search.chars().count()));
    } else {
        line = line.push(indent(gap));
    }
    line.push(Span::bold(right, Tone::Neutral)).fit(cols)
}

fn sidebar_lines(shell: &Shell) -> Vec<Line> {
    let inner = SIDEBAR_WIDTH - 1;
    let mut out = vec![Line::heading(" NAVIGATION", Tone::Muted)];
    for entry in sidebar(shell.navigation()) {
        let (marker, tone) = if entry.active {
            ("▸", Tone::Accent)
        } else {
            (" ", Tone::Neutral)
        };
        let label = Line::blank()
            .push(Span::new(format!(" {marker} {} ", entry.scenario.number()), tone))
            .push(if entry.active {
                Span::bold(entry.label, tone)
            } else {
                Span::new(entry.label, tone)
            });
        let badge = entry.badge.unwrap_or("");
        let gap = inner.saturating_sub(label.width() + badge.chars().count());
        out.push(
            label
                .push(indent(gap))
                .push(Span::new(badge, entry.scenario.tone())),
        );
    }
    out.push(Line::blank());
    out.push(Line::heading(" Assessment Progress", Tone::Neutral));
    out.push(
        Line::blank()
            .push(Span::new(" Overall Completion ", Tone::Muted))
            .push(Span::bold(format!("{ASSESSMENT_COMPLETION_PCT}%"), Tone::Accent)),
    );
    out.push(Line::styled(
        format!(" {}", hbar(u32::from(ASSESSMENT_COMPLETION_PCT), 100, inner - 2)),
        Tone::Accent,
    ));
    out
}

fn help_lines(model: &DashboardModel, width: usize) -> Vec<Line> {
    let help = contextual_help(InputContext {
        scenario: model.active(),
        help_open: true,
    });
    let mut out = vec![
        Line::heading(format!("Keys: {}", help.title), Tone::Accent),
        Line::styled(help.screen_hint, Tone::Muted),
        Line::blank(),
    ];
    let key_width = help
        .bindings
        .iter()
        .map(|b| b.keys.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    for binding in &help.bindings {
        out.push(
            Line::blank()
                .push(Span::bold(format!("  {:<key_width$}", binding.keys), Tone::Accent))
                .push(Span::new(binding.description, Tone::Neutral)),
        );
    }
    out.push(Line::blank());
    out.push(Line::styled("? or Esc closes this help", Tone::Muted));
    out.into_iter().map(|l| l.fit(width)).collect()
}

fn footer_line(model: &DashboardModel, cols: usize) -> Line {
    if let Some(note) = model.notifications.last() {
        let tone = match note.level {
            NotificationLevel::Info => Tone::Accent,
            NotificationLevel::Warning => Tone::Warning,
            NotificationLevel::Error => Tone::Danger,
        };
        return Line::blank()
            .push(Span::bold(" ● ", tone))
            .push(Span::new(note.message.clone(), tone))
            .fit(cols);
    }
    Line::styled(
        " 1-6 scenario  Tab/[ ] cycle  Backspace back  j/k scroll  ? help  q quit",
        Tone::Muted,
    )
    .fit(cols)
}

fn too_small_lines(cols: usize, rows: usize) -> Vec<Line> {
    let messages = [
        Line::heading("Terminal too small", Tone::Warning),
        Line::styled(format!("need {MIN_COLS}x{MIN_ROWS}, have {cols}x{rows}"), Tone::Muted),
        Line::styled("q to quit", Tone::Muted),
    ];
    let top = rows.saturating_sub(messages.len()) / 2;
    let mut out: Vec<Line> = (0..top).map(|_| Line::blank().fit(cols)).collect();
    for message in messages {
        let pad = cols.saturating_sub(message.width()) / 2;
        out.push(Line::blank().push(indent(pad)).concat(message).fit(cols));
    }
    while out.len() < rows {
        out.push(Line::blank().fit(cols));
    }
    out.truncate(rows);
    out
}

fn pane_content(model: &DashboardModel, width: usize) -> Vec<Line> {
    if model.help_open {
        help_lines(model, width)
    } else {
        content_lines(&model.shell, width)
    }
}

/// Largest useful scroll offset for the current content and terminal size.
#[must_use]
pub fn max_scroll(model: &DashboardModel) -> u16 {
    if model.is_too_small() {
        return 0;
    }
    let (cols, rows) = (
        usize::from(model.terminal_size.0),
        usize::from(model.terminal_size.1),
    );
    let body_height = rows - 3;
    let content = pane_content(model, cols - SIDEBAR_WIDTH - 2);
    u16::try_from(content.len().saturating_sub(body_height)).unwrap_or(u16::MAX)
}

/// Lay out the whole screen: exactly `rows` lines of exactly `cols` cells.
#[must_use]
pub fn frame_lines(model: &DashboardModel) -> Vec<Line> {
    let (cols, rows) = (
        usize::from(model.terminal_size.0),
        usize::from(model.terminal_size.1),
    );
    if model.is_too_small() {
        return too_small_lines(cols, rows);
    }

    let body_height = rows - 3;
    let content_width = cols - SIDEBAR_WIDTH - 2;
    let content = pane_content(model, content_width);
    let max_scroll = content.len().saturating_sub(body_height);
    let offset = usize::from(model.scroll).min(max_scroll);

    let mut side = sidebar_lines(&model.shell).into_iter();
    let mut main = content.into_iter().skip(offset);

    let mut out = Vec::with_capacity(rows);
    out.push(header_line(cols));
    out.push(Line::styled("─".repeat(cols), Tone::Muted));
    for _ in 0..body_height {
        let left = side.next().unwrap_or_default().fit(SIDEBAR_WIDTH);
        let right = main.next().unwrap_or_default().fit(content_width);
        out.push(
            left.push(Span::new("│ ", Tone::Muted))
                .concat(right),
        );
    }
    out.push(footer_line(model, cols));
    out
}

fn plain(lines: &[Line]) -> String {
    let mut text = lines
        .iter()
        .map(|l| l.text().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

/// Whole frame as plain text, trailing spaces trimmed.
#[must_use]
pub fn render_to_string(model: &DashboardModel) -> String {
    plain(&frame_lines(model))
}

/// The mounted view alone, without chrome or a height limit.
#[must_use]
pub fn render_view_to_string(shell: &Shell, width: usize) -> String {
    let lines: Vec<Line> = content_lines(shell, width)
        .into_iter()
        .map(|l| l.fit(width))
        .collect();
    plain(&lines)
}

/// Paint one frame.
///
/// # Errors
/// Returns I/O errors from the terminal writer.
pub fn render_frame<W: Write>(out: &mut W, model: &DashboardModel, theme: &Theme) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in frame_lines(model).iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row))?;
        for span in &line.spans {
            if let Some(color) = theme.foreground(span.tone) {
                queue!(out, SetForegroundColor(color))?;
            }
            if span.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::navigation::Scenario;
    use crate::assessment::shell::{Interaction, ViewSettings};

    fn model(scenario: Scenario, cols: u16, rows: u16) -> DashboardModel {
        DashboardModel::new(Shell::new(scenario, ViewSettings::default()), (cols, rows))
    }

    #[test]
    fn fit_pads_and_truncates() {
        let line = Line::styled("abc", Tone::Neutral).fit(6);
        assert_eq!(line.text(), "abc   ");
        let line = Line::blank()
            .push(Span::new("abc", Tone::Neutral))
            .push(Span::new("defgh", Tone::Danger))
            .fit(6);
        assert_eq!(line.text(), "abcde…");
        assert_eq!(line.width(), 6);
    }

    #[test]
    fn fit_keeps_exact_width_lines() {
        let line = Line::blank()
            .push(Span::new("ab", Tone::Neutral))
            .push(Span::new("cd", Tone::Neutral))
            .fit(4);
        assert_eq!(line.text(), "abcd");
    }

    #[test]
    fn frame_has_exact_dimensions() {
        for scenario in Scenario::ALL {
            let m = model(scenario, 100, 30);
            let lines = frame_lines(&m);
            assert_eq!(lines.len(), 30);
            assert!(lines.iter().all(|l| l.width() == 100), "{scenario:?}");
        }
    }

    #[test]
    fn too_small_terminal_shows_notice() {
        let text = render_to_string(&model(Scenario::Overview, 40, 10));
        assert!(text.contains("Terminal too small"));
        assert!(text.contains("have 40x10"));
        assert!(!text.contains("NAVIGATION"));
    }

    #[test]
    fn sidebar_marks_active_entry() {
        let text = render_to_string(&model(Scenario::Time, 100, 30));
        assert!(text.contains("▸ 3 Time & Change"));
        assert!(text.contains("LegacyMod"));
        assert!(text.contains("68%"));
    }

    #[test]
    fn integration_view_shows_threshold_and_flags() {
        let text = render_view_to_string(&Shell::new(Scenario::Integration, ViewSettings::default()), 80);
        assert!(text.contains("Integration Friction Problem  S1"));
        assert!(text.contains("70%"));
        assert!(text.contains("3 dependencies at or above the threshold"));
        assert_eq!(text.matches("▲ ").count(), 3);
    }

    #[test]
    fn threshold_change_reflows_partition() {
        let mut shell = Shell::new(Scenario::Integration, ViewSettings::default());
        shell.apply(Interaction::SetThreshold(50));
        let text = render_view_to_string(&shell, 80);
        assert!(text.contains("5 dependencies at or above the threshold"));
    }

    #[test]
    fn time_view_shows_realistic_estimate() {
        let text = render_view_to_string(&Shell::new(Scenario::Time, ViewSettings::default()), 90);
        assert!(text.contains("Realistic 43 days"));
        assert!(text.contains("+60%"));
        assert!(text.contains("[Month]"));
    }

    #[test]
    fn dashboard_view_shows_overall_risk() {
        let text = render_view_to_string(&Shell::new(Scenario::Dashboard, ViewSettings::default()), 90);
        assert!(text.contains("75"));
        assert!(text.contains("Weekly Activity"));
        assert!(text.contains("5 critical"));
    }

    #[test]
    fn help_overlay_replaces_content() {
        let mut m = model(Scenario::Behavior, 100, 30);
        m.help_open = true;
        let text = render_to_string(&m);
        assert!(text.contains("Toggle alerts"));
        assert!(!text.contains("Bypass Detection Feed"));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut m = model(Scenario::Scale, 100, 20);
        m.scroll = u16::MAX;
        let lines = frame_lines(&m);
        assert_eq!(lines.len(), 20);
        assert!(render_to_string(&m).contains("Modern First"));
    }

    #[test]
    fn render_is_idempotent() {
        let m = model(Scenario::Behavior, 120, 40);
        assert_eq!(render_to_string(&m), render_to_string(&m));
    }

    #[test]
    fn render_frame_writes_without_color_when_disabled() {
        use super::super::theme::AccessibilityProfile;
        let m = model(Scenario::Overview, 80, 20);
        let mut buf = Vec::new();
        render_frame(&mut buf, &m, &Theme::new(AccessibilityProfile::from_no_color_flag(true))).unwrap();
        let raw = String::from_utf8(buf).unwrap();
        assert!(raw.contains("LegacyMod"));
        assert!(!raw.contains("\u{1b}[38;5"));
    }
}

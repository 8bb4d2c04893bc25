//! Text-cell widget primitives shared across dashboard screens.

#![allow(missing_docs)]

/// Sparkline glyph ramp.
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const FILL: char = '█';
const EMPTY: char = '░';

/// Render a normalized sparkline from `0.0..=1.0` values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| {
            let idx = (value.clamp(0.0, 1.0) * 7.0).round() as usize;
            SPARK_CHARS[idx.min(7)]
        })
        .collect()
}

/// Scale integer samples against `max` and render them as a sparkline.
#[must_use]
pub fn sparkline_of(values: &[u32], max: u32) -> String {
    if max == 0 {
        return sparkline(&vec![0.0; values.len()]);
    }
    let normalized: Vec<f64> = values
        .iter()
        .map(|v| f64::from(*v) / f64::from(max))
        .collect();
    sparkline(&normalized)
}

/// Number of filled cells for `pct` of `width`, clamped to the width.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn filled_cells(pct: f64, width: usize) -> usize {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    filled.min(width)
}

/// `[███░░] 62%` style gauge.
#[must_use]
pub fn gauge(pct: f64, width: usize) -> String {
    let filled = filled_cells(pct, width);
    format!(
        "[{}{}] {:.0}%",
        FILL.to_string().repeat(filled),
        EMPTY.to_string().repeat(width - filled),
        pct.clamp(0.0, 100.0),
    )
}

/// Bare horizontal bar of `value / max` over `width` cells, no brackets.
#[must_use]
pub fn hbar(value: u32, max: u32, width: usize) -> String {
    let pct = if max == 0 {
        0.0
    } else {
        f64::from(value) * 100.0 / f64::from(max)
    };
    let filled = filled_cells(pct, width);
    format!(
        "{}{}",
        FILL.to_string().repeat(filled),
        EMPTY.to_string().repeat(width - filled)
    )
}

/// Split `width` cells across `shares` (percentages summing to about 100).
///
/// Rounding slack goes to the last non-zero segment so the result always
/// covers exactly `width` cells when any share is positive.
#[must_use]
pub fn stacked_widths(shares: &[f64], width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = shares.iter().map(|s| filled_cells(*s, width)).collect();
    let total: usize = widths.iter().sum();
    if let Some(last) = shares.iter().rposition(|s| *s > 0.0) {
        if total > width {
            widths[last] = widths[last].saturating_sub(total - width);
        } else {
            widths[last] += width - total;
        }
    }
    widths
}

/// Greedy word wrap. Words longer than `width` are hard-split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `text` to at most `width` cells, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_clamps_out_of_range_values() {
        let line = sparkline(&[-9.0, 0.0, 0.5, 1.0, 7.5]);
        assert_eq!(line.chars().count(), 5);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn sparkline_of_handles_zero_max() {
        assert_eq!(sparkline_of(&[3, 4], 0), "▁▁");
        assert_eq!(sparkline_of(&[0, 15], 15), "▁█");
    }

    #[test]
    fn gauge_half() {
        let g = gauge(50.0, 20);
        assert!(g.ends_with("50%"));
        assert_eq!(g.matches('█').count(), 10);
        assert_eq!(g.matches('░').count(), 10);
    }

    #[test]
    fn gauge_clamps_over_100() {
        let g = gauge(150.0, 10);
        assert_eq!(g.matches('█').count(), 10);
        assert!(g.ends_with("100%"));
    }

    #[test]
    fn hbar_scales_against_max() {
        assert_eq!(hbar(45, 90, 4), "██░░");
        assert_eq!(hbar(1, 0, 3), "░░░");
    }

    #[test]
    fn stacked_widths_cover_full_width() {
        let widths = stacked_widths(&[37.5, 25.0, 37.5], 30);
        assert_eq!(widths.iter().sum::<usize>(), 30);
        let widths = stacked_widths(&[33.4, 33.3, 33.3], 10);
        assert_eq!(widths.iter().sum::<usize>(), 10);
        assert_eq!(stacked_widths(&[0.0, 0.0], 10), vec![0, 0]);
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("", 8).is_empty());
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Mainframe", 5), "Main…");
        assert_eq!(truncate("ok", 5), "ok");
        assert_eq!(truncate("ok", 0), "");
    }
}

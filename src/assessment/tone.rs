//! Semantic tones and presentation descriptors for categorical fields.
//!
//! Every categorical enum in the assessment core maps totally onto a
//! [`Descriptor`]. Renderers translate a [`Tone`] into concrete colors; the
//! core never names a color.

use serde::Serialize;

/// Semantic color role, independent of any terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Primary brand accent.
    Accent,
    /// Scenario 1 hue; also used for critical/legacy/delayed states.
    Danger,
    /// Scenario 2 hue; also used for high/hybrid/at-risk states.
    Warning,
    /// Scenario 3 hue; also used for healthy/modern/completed states.
    Success,
    /// Scenario 4 hue.
    Growth,
    /// De-emphasized text.
    Muted,
    /// Default foreground.
    Neutral,
}

/// Label, tone, and glyph for one categorical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Human-readable label.
    pub label: &'static str,
    /// Semantic tone.
    pub tone: Tone,
    /// Single-cell glyph drawn next to the label.
    pub glyph: char,
}

impl Descriptor {
    pub(crate) const fn new(label: &'static str, tone: Tone, glyph: char) -> Self {
        Self { label, tone, glyph }
    }
}

/// Tone for a 0–100 health score: `>= 80` good, `>= 60` warning, else danger.
#[must_use]
pub const fn health_tone(score: u8) -> Tone {
    if score >= 80 {
        Tone::Success
    } else if score >= 60 {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

/// Tone for a schedule variance: overruns are danger, everything else good.
#[must_use]
pub const fn variance_tone(variance_pct: i64) -> Tone {
    if variance_pct > 0 {
        Tone::Danger
    } else {
        Tone::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_tone_boundaries() {
        assert_eq!(health_tone(100), Tone::Success);
        assert_eq!(health_tone(80), Tone::Success);
        assert_eq!(health_tone(79), Tone::Warning);
        assert_eq!(health_tone(60), Tone::Warning);
        assert_eq!(health_tone(59), Tone::Danger);
        assert_eq!(health_tone(0), Tone::Danger);
    }

    #[test]
    fn variance_tone_zero_is_not_an_overrun() {
        assert_eq!(variance_tone(0), Tone::Success);
        assert_eq!(variance_tone(-25), Tone::Success);
        assert_eq!(variance_tone(1), Tone::Danger);
    }
}

//! Semantic tone to terminal color mapping and the accessibility profile.

#![allow(missing_docs)]

use std::env;

use crossterm::style::Color;

use crate::assessment::tone::Tone;

/// Contrast profile used by palette selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContrastMode {
    #[default]
    Standard,
    High,
}

/// Color output mode for compatibility with `NO_COLOR` and terminal policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Enabled,
    Disabled,
}

/// Accessibility knobs consumed by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessibilityProfile {
    pub contrast: ContrastMode,
    pub color: ColorMode,
}

impl AccessibilityProfile {
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            contrast: ContrastMode::Standard,
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    /// Reads `NO_COLOR` and `LEGACYMOD_HIGH_CONTRAST`.
    #[must_use]
    pub fn from_environment() -> Self {
        let mut profile = Self::from_no_color_flag(env::var_os("NO_COLOR").is_some());
        if env::var("LEGACYMOD_HIGH_CONTRAST").is_ok_and(|v| v == "1" || v == "true") {
            profile.contrast = ContrastMode::High;
        }
        profile
    }

    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }
}

/// Concrete colors for each [`Tone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: Color,
    pub danger: Color,
    pub warning: Color,
    pub success: Color,
    pub growth: Color,
    pub muted: Color,
    pub neutral: Color,
}

impl ThemePalette {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            accent: Color::Cyan,
            danger: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
            growth: Color::Magenta,
            muted: Color::DarkGrey,
            neutral: Color::White,
        }
    }

    #[must_use]
    pub const fn high_contrast() -> Self {
        Self {
            accent: Color::Cyan,
            danger: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
            growth: Color::Magenta,
            muted: Color::Grey,
            neutral: Color::White,
        }
    }

    #[must_use]
    pub const fn from_contrast(mode: ContrastMode) -> Self {
        match mode {
            ContrastMode::Standard => Self::standard(),
            ContrastMode::High => Self::high_contrast(),
        }
    }

    #[must_use]
    pub const fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Accent => self.accent,
            Tone::Danger => self.danger,
            Tone::Warning => self.warning,
            Tone::Success => self.success,
            Tone::Growth => self.growth,
            Tone::Muted => self.muted,
            Tone::Neutral => self.neutral,
        }
    }
}

/// Palette plus accessibility profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accessibility: AccessibilityProfile,
    pub palette: ThemePalette,
}

impl Theme {
    #[must_use]
    pub const fn new(accessibility: AccessibilityProfile) -> Self {
        Self {
            palette: ThemePalette::from_contrast(accessibility.contrast),
            accessibility,
        }
    }

    /// Foreground for `tone`, or `None` when color is disabled.
    #[must_use]
    pub const fn foreground(&self, tone: Tone) -> Option<Color> {
        if self.accessibility.no_color() {
            None
        } else {
            Some(self.palette.color(tone))
        }
    }
}

//! Assessment core: fixture datasets, pure reducers, the navigation shell, and
//! one view-model module per scenario.
//!
//! Nothing in here performs I/O or can fail. Every view owns its fixture and
//! its local interaction state; the [`shell::Shell`] composes them behind the
//! single session-wide [`navigation::NavigationState`].

pub mod analytics;
pub mod behavior;
pub mod integration;
pub mod metrics;
pub mod navigation;
pub mod overview;
pub mod scale;
pub mod shell;
pub mod timeline;
pub mod tone;

use serde::Serialize;

/// A titled block of static narrative shown beneath a view's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    /// Card heading.
    pub title: &'static str,
    /// Body text.
    pub body: &'static str,
    /// Call-to-action label, when the card carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
}

impl Insight {
    pub(crate) const fn new(title: &'static str, body: &'static str) -> Self {
        Self {
            title,
            body,
            action: None,
        }
    }

    pub(crate) const fn with_action(
        title: &'static str,
        body: &'static str,
        action: &'static str,
    ) -> Self {
        Self {
            title,
            body,
            action: Some(action),
        }
    }
}

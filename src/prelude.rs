//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use legacymod::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{LmError, Result};

// Assessment
pub use crate::assessment::navigation::{ContentView, NavigationState, Scenario};
pub use crate::assessment::shell::{Interaction, MountedView, Nudge, Shell, ViewModel, ViewSettings};
pub use crate::assessment::tone::Tone;

// Logging
pub use crate::logger::activity::{ActivityEvent, ActivityLog};

#![forbid(unsafe_code)]

//! LegacyMod: a terminal dashboard for assessing legacy-system modernization.
//!
//! Four diagnostic scenarios plus an overview and an aggregate dashboard:
//! 1. **Integration friction**: legacy dependencies ranked against a risk threshold
//! 2. **Time & change**: delivery overhead and realistic estimates
//! 3. **User behavior**: workarounds that bypass the legacy system
//! 4. **Scale & growth**: the migration state of every component
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use legacymod::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use legacymod::assessment::shell::{Interaction, Shell};
//! use legacymod::core::config::Config;
//! ```

pub mod prelude;

pub mod assessment;
pub mod core;
pub mod logger;
#[cfg(feature = "tui")]
pub mod tui;

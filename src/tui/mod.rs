//! Interactive terminal dashboard.
//!
//! Elm-style split: [`model`] holds state, [`update`] is the pure transition
//! function, [`render`] draws a model, and [`runtime`] owns the terminal and
//! executes commands. Only the runtime and the terminal guard touch I/O.

#![allow(missing_docs)]

pub mod input;
pub mod model;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod update;
pub mod widgets;

#[cfg(test)]
mod test_properties;

pub use render::{render_to_string, render_view_to_string};
pub use runtime::{DashboardRuntimeConfig, run_dashboard};

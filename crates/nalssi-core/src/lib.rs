//! Core types for the nalssi weather widget.
//!
//! Everything here is a plain value type shared between the scene crate and
//! the terminal application: weather conditions, the viewport, and units.
//! No rendering dependencies.

mod conditions;
mod viewport;

pub use conditions::{Conditions, PrecipKind, Units};
pub use viewport::Viewport;

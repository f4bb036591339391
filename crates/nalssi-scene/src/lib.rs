//! Animated weather layers for the nalssi widget.
//!
//! The scene is a stack of independently painted layers: a sky gradient, the
//! sun or moon, drifting cloud puffs, and falling precipitation streaks. Each
//! layer owns its particles, regenerates them when the viewport or weather
//! inputs change, and fully repaints its own [`Surface`] every frame. An
//! external frame driver calls [`Scene::advance`] once per display refresh.

mod color;
pub mod layers;
mod raster;
mod scene;
mod surface;

pub use color::{Rgba, lerp};
pub use raster::Raster;
pub use scene::{Scene, SceneFrame};
pub use surface::{Stroke, Surface};

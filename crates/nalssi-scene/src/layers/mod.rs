//! The individual weather layers, bottom of the stack first.

pub mod celestial;
pub mod clouds;
pub mod precipitation;
pub mod sky;

pub use celestial::{CelestialBody, CelestialLayer};
pub use clouds::{CloudLayer, CloudPuff};
pub use precipitation::{PrecipProfile, PrecipitationLayer, Raindrop};
pub use sky::{SkyLayer, sky_color};

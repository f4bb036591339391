//! Weather condition inputs supplied by the host.

use serde::{Deserialize, Serialize};

/// Kind of precipitation falling from the sky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipKind {
    #[default]
    Rain,
    Snow,
    Sleet,
}

impl PrecipKind {
    /// Cycle to the next kind (used by the keyboard override).
    pub fn next(self) -> Self {
        match self {
            PrecipKind::Rain => PrecipKind::Snow,
            PrecipKind::Snow => PrecipKind::Sleet,
            PrecipKind::Sleet => PrecipKind::Rain,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            PrecipKind::Rain => "rain",
            PrecipKind::Snow => "snow",
            PrecipKind::Sleet => "sleet",
        }
    }

    /// Parse a loose name. Anything unrecognized falls back to rain.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "snow" => PrecipKind::Snow,
            "sleet" => PrecipKind::Sleet,
            _ => PrecipKind::Rain,
        }
    }
}

/// Temperature units for the readout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    /// Toggle between Celsius and Fahrenheit.
    pub fn toggle(self) -> Self {
        match self {
            Units::Celsius => Units::Fahrenheit,
            Units::Fahrenheit => Units::Celsius,
        }
    }

    /// Convert a temperature in Celsius into these units.
    pub fn from_celsius(self, temp_c: i32) -> i32 {
        match self {
            Units::Celsius => temp_c,
            Units::Fahrenheit => temp_c * 9 / 5 + 32,
        }
    }

    /// The degree suffix shown next to the readout.
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
        }
    }
}

/// The full set of scalar weather inputs that drive the scene.
///
/// All fractional fields are unit-interval values; [`Conditions::clamped`]
/// enforces that at the boundary so the layers never see out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    /// What is falling from the sky.
    pub precip: PrecipKind,
    /// How much of it is falling, 0 (none) to 1 (downpour).
    pub precip_amount: f32,
    /// How much of the sky the cloud deck covers, 0 to 1.
    pub cloud_cover: f32,
    /// Horizontal wind strength, 0 to 1.
    pub wind: f32,
    /// Sun up or moon up.
    pub is_day: bool,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            precip: PrecipKind::Rain,
            precip_amount: 0.0,
            cloud_cover: 0.0,
            wind: 0.0,
            is_day: true,
        }
    }
}

impl Conditions {
    /// Clamp every fractional field into the unit interval.
    pub fn clamped(self) -> Self {
        Self {
            precip_amount: self.precip_amount.clamp(0.0, 1.0),
            cloud_cover: self.cloud_cover.clamp(0.0, 1.0),
            wind: self.wind.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precip_kind_from_name() {
        assert_eq!(PrecipKind::from_name("rain"), PrecipKind::Rain);
        assert_eq!(PrecipKind::from_name("Snow"), PrecipKind::Snow);
        assert_eq!(PrecipKind::from_name(" sleet "), PrecipKind::Sleet);
        assert_eq!(PrecipKind::from_name("hail"), PrecipKind::Rain); // Fallback
    }

    #[test]
    fn test_precip_kind_cycle_covers_all() {
        let start = PrecipKind::Rain;
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_units_conversion() {
        assert_eq!(Units::Celsius.from_celsius(21), 21);
        assert_eq!(Units::Fahrenheit.from_celsius(0), 32);
        assert_eq!(Units::Fahrenheit.from_celsius(100), 212);
        assert_eq!(Units::Fahrenheit.from_celsius(-40), -40);
    }

    #[test]
    fn test_conditions_clamped() {
        let wild = Conditions {
            precip_amount: 2.5,
            cloud_cover: -1.0,
            wind: 1.0,
            ..Conditions::default()
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.precip_amount, 1.0);
        assert_eq!(clamped.cloud_cover, 0.0);
        assert_eq!(clamped.wind, 1.0);
    }
}

//! Seasons and their climate tables.
//!
//! The year is four seasons long and always cycles in the same order:
//! spring, summer, fall, winter. Each season carries the base temperature
//! range and rain chance the environment samples from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of simulated days per season.
pub const DEFAULT_DAYS_IN_SEASON: u32 = 20;

/// A season of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Mild and wet; the starting season.
    #[default]
    Spring,
    /// Hot and dry.
    Summer,
    /// Cooling, moderately wet.
    Fall,
    /// Cold enough for frost.
    Winter,
}

/// Base daily temperature bounds for a season, in °F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// Lowest base temperature.
    pub min: i32,
    /// Highest base temperature.
    pub max: i32,
}

impl Season {
    /// All seasons in cycle order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Spring, Self::Summer, Self::Fall, Self::Winter]
    }

    /// The season that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Fall,
            Self::Fall => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// The season across the year from this one (spring/fall, summer/winter).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Spring => Self::Fall,
            Self::Summer => Self::Winter,
            Self::Fall => Self::Spring,
            Self::Winter => Self::Summer,
        }
    }

    /// Base temperature range for daily high/low generation.
    #[must_use]
    pub const fn temperature_range(self) -> TemperatureRange {
        match self {
            Self::Spring => TemperatureRange { min: 45, max: 75 },
            Self::Summer => TemperatureRange { min: 65, max: 95 },
            Self::Fall => TemperatureRange { min: 40, max: 75 },
            Self::Winter => TemperatureRange { min: 20, max: 55 },
        }
    }

    /// Chance of rain on any given day, in percent.
    #[must_use]
    pub const fn rain_chance(self) -> u32 {
        match self {
            Self::Spring => 40,
            Self::Summer => 20,
            Self::Fall => 35,
            Self::Winter => 25,
        }
    }

    /// Contribution of the season to the daily growth modifier.
    #[must_use]
    pub fn growth_bonus(self) -> f64 {
        match self {
            Self::Spring => 0.2,
            Self::Summer => 0.3,
            Self::Fall => -0.1,
            Self::Winter => -0.3,
        }
    }

    /// Get the display name of this season.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

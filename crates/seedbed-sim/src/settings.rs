//! Simulation settings.

use serde::{Deserialize, Serialize};

use crate::garden::{DEFAULT_HEIGHT, DEFAULT_SOIL_MOISTURE, DEFAULT_SOIL_TEMPERATURE, DEFAULT_WIDTH};
use crate::season::DEFAULT_DAYS_IN_SEASON;

/// Parameters for building a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Garden width in plots
    pub width: u32,
    /// Garden height in plots
    pub height: u32,
    /// Weather seed (None = random)
    pub seed: Option<u64>,
    /// Days per season
    pub days_in_season: u32,
    /// Starting soil moisture for every plot (percent)
    pub initial_soil_moisture: u32,
    /// Starting soil temperature for every plot (°F)
    pub initial_soil_temperature: i32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            days_in_season: DEFAULT_DAYS_IN_SEASON,
            initial_soil_moisture: DEFAULT_SOIL_MOISTURE,
            initial_soil_temperature: DEFAULT_SOIL_TEMPERATURE,
        }
    }
}

impl SimSettings {
    /// Validate and clamp settings to sensible ranges.
    pub fn validate(&mut self) {
        self.width = self.width.clamp(1, 64);
        self.height = self.height.clamp(1, 64);
        self.days_in_season = self.days_in_season.clamp(1, 365);
        self.initial_soil_moisture = self.initial_soil_moisture.min(100);
        self.initial_soil_temperature = self.initial_soil_temperature.clamp(-40, 130);
    }

    /// The configured seed, or a fresh random one.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| fastrand::u64(..))
    }
}

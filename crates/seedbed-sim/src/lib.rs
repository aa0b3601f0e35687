//! # Seedbed Sim
//!
//! Garden simulation core for Seedbed.
//!
//! This crate provides the day-by-day simulation:
//! - Seasons and daily weather (temperature, sunlight, rain)
//! - The garden grid with per-plot soil moisture and temperature
//! - Plant lifecycle (germination, growth stages, dormancy, harvest, death)
//! - The species catalog
//! - A [`Simulation`] context tying them together behind text commands
//!
//! Randomness is injected through [`RandomSource`] so a seed reproduces a
//! whole year.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod garden;
pub mod plants;
pub mod rng;
pub mod season;
pub mod settings;
pub mod simulation;
pub mod species;
pub mod weather;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::garden::*;
    pub use crate::plants::*;
    pub use crate::rng::*;
    pub use crate::season::*;
    pub use crate::settings::*;
    pub use crate::simulation::*;
    pub use crate::species::*;
    pub use crate::weather::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_common::PlotCoord;

    #[test]
    fn test_summer_tomato_first_day() {
        // Wet soil, warm ground, neutral weather: 15 * 1.5 * 1.0 * 1.0
        let mut garden = Garden::with_initial_soil(5, 5, 50, 70);
        let coord = PlotCoord::new(0, 0);
        assert!(garden.plant_seed(coord, Species::Tomato, Season::Summer));

        garden.advance_day(0, 1.0, Season::Summer, 0, 70);

        let plant = garden.plant(coord).expect("plant");
        assert!((plant.progress() - 22.5).abs() < 1e-9);
        assert_eq!(plant.stage(), GrowthStage::Germinating);
        assert!(!plant.is_germinating());
    }

    #[test]
    fn test_full_year_with_seed_is_stable() {
        let mut sim = Simulation::with_seed(42);
        sim.plant_seed(PlotCoord::new(2, 2), Species::Asparagus);
        for _ in 0..80 {
            sim.advance_day();
        }
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.environment.day, 81);
        assert_eq!(snapshot.environment.season, Season::Spring);
        assert_eq!(snapshot.garden.cells.len(), 25);
    }
}

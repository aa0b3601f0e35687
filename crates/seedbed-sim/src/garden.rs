//! Garden grid and soil.
//!
//! This module provides the plot grid:
//! - Per-plot soil moisture and temperature
//! - Point commands (plant, water, harvest, clear)
//! - The daily garden update, run in a fixed order each day

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use seedbed_common::PlotCoord;

use crate::plants::{GrowthStage, HarvestOutcome, Plant, PlantStatus};
use crate::season::Season;
use crate::species::Species;
use crate::weather::round_half_up;

/// Default garden width in plots.
pub const DEFAULT_WIDTH: u32 = 5;
/// Default garden height in plots.
pub const DEFAULT_HEIGHT: u32 = 5;
/// Soil moisture of a freshly created plot (percent).
pub const DEFAULT_SOIL_MOISTURE: u32 = 50;
/// Soil temperature of a freshly created plot (°F).
pub const DEFAULT_SOIL_TEMPERATURE: i32 = 65;
/// Fully saturated soil (percent).
pub const MAX_SOIL_MOISTURE: u32 = 100;
/// Fraction of the air/soil gap closed each day.
pub const SOIL_TEMPERATURE_LAG: f64 = 0.3;

/// How much direct sun a plot receives. Every plot is in full sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunExposure {
    /// Open sky.
    #[default]
    Full,
}

/// One plot of the garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Occupant, if any.
    pub plant: Option<Plant>,
    /// Soil moisture (0-100).
    pub soil_moisture: u32,
    /// Soil quality (0-100).
    pub soil_quality: u32,
    /// Sun exposure.
    pub sun_exposure: SunExposure,
    /// Weed pressure (0-100).
    pub weed_level: u32,
    /// Whether the plot has been plowed.
    pub is_plowed: bool,
    /// Soil temperature (°F).
    pub soil_temperature: i32,
}

impl Cell {
    fn new(soil_moisture: u32, soil_temperature: i32) -> Self {
        Self {
            plant: None,
            soil_moisture: soil_moisture.min(MAX_SOIL_MOISTURE),
            soil_quality: 50,
            sun_exposure: SunExposure::Full,
            weed_level: 0,
            is_plowed: false,
            soil_temperature,
        }
    }

    /// Check if there's a plant in this plot.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.plant.is_some()
    }
}

/// Display view of a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantView {
    /// Species.
    pub species: Species,
    /// Display name.
    pub name: String,
    /// Icon for the current state.
    pub icon: String,
    /// Growth stage.
    pub stage: GrowthStage,
    /// Progress toward the next stage.
    pub progress: f64,
    /// Condition summary.
    pub status: PlantStatus,
    /// Harvests taken this season.
    pub harvest_count: u32,
}

impl From<&Plant> for PlantView {
    fn from(plant: &Plant) -> Self {
        Self {
            species: plant.species(),
            name: plant.name().to_string(),
            icon: plant.icon().to_string(),
            stage: plant.stage(),
            progress: plant.progress(),
            status: plant.status(),
            harvest_count: plant.harvest_count(),
        }
    }
}

/// Display view of one plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Soil moisture (0-100).
    pub soil_moisture: u32,
    /// Soil temperature (°F).
    pub soil_temperature: i32,
    /// Occupant, if any.
    pub plant: Option<PlantView>,
}

/// Display view of the whole grid, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenSnapshot {
    /// Width in plots.
    pub width: u32,
    /// Height in plots.
    pub height: u32,
    /// Average soil temperature (°F).
    pub average_soil_temperature: i32,
    /// Plots, row by row.
    pub cells: Vec<CellView>,
}

/// A fixed-size grid of plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garden {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Garden {
    /// Create a garden with default soil.
    ///
    /// Zero dimensions are raised to one.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_initial_soil(width, height, DEFAULT_SOIL_MOISTURE, DEFAULT_SOIL_TEMPERATURE)
    }

    /// Create a garden with custom starting soil.
    #[must_use]
    pub fn with_initial_soil(
        width: u32,
        height: u32,
        soil_moisture: u32,
        soil_temperature: i32,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = (0..width as usize * height as usize)
            .map(|_| Cell::new(soil_moisture, soil_temperature))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Width in plots.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in plots.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether a coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: PlotCoord) -> bool {
        coord.is_within(self.width, self.height)
    }

    /// Get a plot.
    #[must_use]
    pub fn cell(&self, coord: PlotCoord) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(coord.to_index(self.width))
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, coord: PlotCoord) -> Option<&mut Cell> {
        if self.contains(coord) {
            self.cells.get_mut(coord.to_index(self.width))
        } else {
            None
        }
    }

    fn cell_or_warn(&mut self, coord: PlotCoord, action: &str) -> Option<&mut Cell> {
        let (width, height) = (self.width, self.height);
        let cell = self.cell_mut(coord);
        if cell.is_none() {
            warn!(%coord, width, height, action, "Plot outside the garden");
        }
        cell
    }

    /// Get the plant in a plot.
    #[must_use]
    pub fn plant(&self, coord: PlotCoord) -> Option<&Plant> {
        self.cell(coord).and_then(|cell| cell.plant.as_ref())
    }

    /// Iterate over all plots with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (PlotCoord, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (PlotCoord::from_index(i, width), cell))
    }

    /// Number of occupied plots.
    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Sow a seed.
    ///
    /// Returns false if the plot is occupied or outside the garden.
    pub fn plant_seed(&mut self, coord: PlotCoord, species: Species, season: Season) -> bool {
        let Some(cell) = self.cell_or_warn(coord, "plant") else {
            return false;
        };

        if cell.plant.is_some() {
            debug!(%coord, "Cannot plant, plot already occupied");
            return false;
        }

        let plant = Plant::new(species, season);
        debug!(
            %coord,
            plant = plant.name(),
            preferred = %plant.profile().preferred_season,
            dormant = plant.is_dormant(),
            "Planted seed"
        );
        cell.plant = Some(plant);
        true
    }

    /// Water a plot to saturation.
    ///
    /// Returns false only if the plot is outside the garden.
    pub fn water_plot(&mut self, coord: PlotCoord) -> bool {
        let Some(cell) = self.cell_or_warn(coord, "water") else {
            return false;
        };
        cell.soil_moisture = MAX_SOIL_MOISTURE;
        debug!(%coord, "Watered plot");
        true
    }

    /// Add rainfall to every plot, capped at saturation.
    pub fn water_garden_from_rain(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        for cell in &mut self.cells {
            cell.soil_moisture = cell.soil_moisture.saturating_add(amount).min(MAX_SOIL_MOISTURE);
        }
        debug!(amount, "Rain watered the garden");
    }

    /// Harvest a plot.
    ///
    /// Returns the species' reward, or 0 if there was nothing ready to pick.
    /// Spent plants are removed from the plot.
    pub fn harvest_plant(&mut self, coord: PlotCoord) -> u32 {
        let Some(cell) = self.cell_or_warn(coord, "harvest") else {
            return 0;
        };

        let Some(plant) = cell.plant.as_mut() else {
            debug!(%coord, "No plant to harvest");
            return 0;
        };

        if !plant.is_harvestable() {
            debug!(%coord, plant = plant.name(), "Plant not ready for harvest");
            return 0;
        }

        let reward = plant.profile().harvest_reward;
        let outcome = plant.harvest();
        debug!(%coord, plant = plant.name(), reward, ?outcome, "Harvested");

        if outcome == HarvestOutcome::Remove {
            cell.plant = None;
        }
        reward
    }

    /// Remove whatever grows in a plot.
    ///
    /// Returns false if the plot was already empty.
    pub fn clear_plot(&mut self, coord: PlotCoord) -> bool {
        let Some(cell) = self.cell_or_warn(coord, "clear") else {
            return false;
        };
        match cell.plant.take() {
            Some(plant) => {
                debug!(%coord, plant = plant.name(), "Cleared plot");
                true
            },
            None => {
                debug!(%coord, "No plant to clear");
                false
            },
        }
    }

    /// Move every plot's soil temperature 30% of the way toward the air.
    pub fn update_soil_temperatures(&mut self, air_temperature: i32) {
        for cell in &mut self.cells {
            let current = f64::from(cell.soil_temperature);
            let gap = f64::from(air_temperature) - current;
            cell.soil_temperature = round_half_up(current + gap * SOIL_TEMPERATURE_LAG);
        }
    }

    /// Expose every plant to the air temperature.
    ///
    /// Returns the number of plants killed.
    pub fn check_plants_for_temperature_effects(&mut self, air_temperature: i32) -> u32 {
        let width = self.width;
        let mut killed = 0;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let Some(plant) = cell.plant.as_mut() else {
                continue;
            };
            if plant.is_dead() {
                continue;
            }
            if !plant.check_temperature_survival(air_temperature) {
                killed += 1;
                debug!(
                    coord = %PlotCoord::from_index(i, width),
                    plant = plant.name(),
                    air_temperature,
                    "Frost killed plant"
                );
            }
        }
        killed
    }

    /// Average soil temperature across all plots.
    #[must_use]
    pub fn average_soil_temperature(&self) -> i32 {
        let total: f64 = self
            .cells
            .iter()
            .map(|c| f64::from(c.soil_temperature))
            .sum();
        round_half_up(total / self.cells.len() as f64)
    }

    /// Run one day.
    ///
    /// In order: soil temperature, frost, rain, growth, then drying. Growth
    /// only runs for living plants in moist soil; drying applies to every
    /// plot. Returns the number of plants killed by the cold.
    pub fn advance_day(
        &mut self,
        moisture_reduction: u32,
        growth_modifier: f64,
        season: Season,
        rainfall: u32,
        air_temperature: i32,
    ) -> u32 {
        self.update_soil_temperatures(air_temperature);
        let killed = self.check_plants_for_temperature_effects(air_temperature);
        self.water_garden_from_rain(rainfall);

        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if let Some(plant) = cell.plant.as_mut() {
                if !plant.is_dead() && cell.soil_moisture > 0 {
                    plant.grow(
                        cell.soil_moisture,
                        growth_modifier,
                        season,
                        cell.soil_temperature,
                    );
                }
            }

            cell.soil_moisture = cell.soil_moisture.saturating_sub(moisture_reduction);

            if let Some(plant) = &cell.plant {
                trace!(
                    coord = %PlotCoord::from_index(i, width),
                    plant = plant.name(),
                    stage = plant.stage().index(),
                    progress = plant.progress(),
                    moisture = cell.soil_moisture,
                    soil_temperature = cell.soil_temperature,
                    "Plot at end of day"
                );
            }
        }

        killed
    }

    /// Capture the grid for display.
    #[must_use]
    pub fn snapshot(&self) -> GardenSnapshot {
        GardenSnapshot {
            width: self.width,
            height: self.height,
            average_soil_temperature: self.average_soil_temperature(),
            cells: self
                .cells()
                .map(|(coord, cell)| CellView {
                    x: coord.x,
                    y: coord.y,
                    soil_moisture: cell.soil_moisture,
                    soil_temperature: cell.soil_temperature,
                    plant: cell.plant.as_ref().map(PlantView::from),
                })
                .collect(),
        }
    }
}

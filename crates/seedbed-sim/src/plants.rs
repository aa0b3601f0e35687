//! Plant lifecycle.
//!
//! This module provides the per-plot plant state machine:
//! - Germination gated on soil temperature
//! - Growth stages from seed to harvestable, paced by season and weather
//! - Drought and frost death (terminal)
//! - Perennial dormancy outside the production seasons
//! - Repeat harvests for continuous-harvest species

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::season::Season;
use crate::species::{Species, SpeciesProfile, DEAD_ICON};

/// Daily growth before any multipliers (percent of a stage).
pub const BASE_GROWTH: f64 = 15.0;

/// Progress needed to move to the next stage.
pub const STAGE_COMPLETE: f64 = 100.0;

/// Progress a continuous-harvest plant keeps after being picked.
pub const REGROWTH_HEAD_START: f64 = 30.0;

/// Consecutive dry days that kill a plant.
pub const DROUGHT_DAYS: u32 = 2;

/// Air temperature that kills any annual (°F).
pub const FREEZING_TEMPERATURE: i32 = 32;

/// Air temperature that kills frost-tender annuals (°F).
pub const CHILL_TEMPERATURE: i32 = 40;

/// Soil temperature above which growth is stunted (°F).
pub const HEAT_STRESS_TEMPERATURE: i32 = 95;

/// Growth stage of a plant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    /// Seed in the ground, waiting for warm soil.
    #[default]
    Germinating,
    /// First leaves.
    Seedling,
    /// Leafing out.
    Growing,
    /// Full size, fruit forming.
    Mature,
    /// Ready to pick.
    Harvestable,
}

impl GrowthStage {
    /// Get the display name of this stage.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Germinating => "Germinating",
            Self::Seedling => "Seedling",
            Self::Growing => "Growing",
            Self::Mature => "Mature",
            Self::Harvestable => "Harvestable",
        }
    }

    /// Numeric stage, 0 through 4.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Get the next growth stage, saturating at harvestable.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Germinating => Self::Seedling,
            Self::Seedling => Self::Growing,
            Self::Growing => Self::Mature,
            Self::Mature | Self::Harvestable => Self::Harvestable,
        }
    }
}

/// What the garden should do with a plant after a harvest attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// Nothing was picked.
    NotReady,
    /// Picked; the plant stays in the plot.
    Keep,
    /// Picked; the plant is spent and leaves the plot.
    Remove,
}

/// Summary of a plant's condition for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "progress", rename_all = "snake_case")]
pub enum PlantStatus {
    /// Dead; clear the plot.
    Dead,
    /// Perennial resting out of season.
    Dormant,
    /// Ready to harvest.
    ReadyToHarvest,
    /// Growing; whole-percent progress toward the next stage.
    Growing(u32),
}

/// A plant occupying one garden plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    species: Species,
    stage: GrowthStage,
    progress: f64,
    is_dead: bool,
    is_dormant: bool,
    is_germinating: bool,
    dry_days: u32,
    harvest_count: u32,
}

impl Plant {
    /// Create a freshly sown plant.
    ///
    /// Perennials sown outside their production seasons start dormant.
    #[must_use]
    pub fn new(species: Species, current_season: Season) -> Self {
        let profile = species.profile();
        Self {
            species,
            stage: GrowthStage::Germinating,
            progress: 0.0,
            is_dead: false,
            is_dormant: profile.perennial && !profile.produces_in(current_season),
            is_germinating: true,
            dry_days: 0,
            harvest_count: 0,
        }
    }

    /// Species of this plant.
    #[must_use]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Static profile of this plant's species.
    #[must_use]
    pub fn profile(&self) -> &'static SpeciesProfile {
        self.species.profile()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Current growth stage.
    #[must_use]
    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    /// Progress toward the next stage, `0.0..100.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Check if this plant is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Check if this plant is dormant.
    #[must_use]
    pub fn is_dormant(&self) -> bool {
        self.is_dormant
    }

    /// Check if this plant is still waiting to sprout.
    #[must_use]
    pub fn is_germinating(&self) -> bool {
        self.is_germinating
    }

    /// Consecutive days without soil moisture.
    #[must_use]
    pub fn dry_days(&self) -> u32 {
        self.dry_days
    }

    /// Harvests taken this season.
    #[must_use]
    pub fn harvest_count(&self) -> u32 {
        self.harvest_count
    }

    /// Check if this plant can be harvested.
    #[must_use]
    pub fn is_harvestable(&self) -> bool {
        self.stage == GrowthStage::Harvestable && !self.is_dormant && !self.is_dead
    }

    /// Icon for the current state.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        if self.is_dead {
            DEAD_ICON
        } else {
            self.profile().icons[usize::from(self.stage.index())]
        }
    }

    /// Condition summary for display.
    #[must_use]
    pub fn status(&self) -> PlantStatus {
        if self.is_dead {
            PlantStatus::Dead
        } else if self.is_dormant {
            PlantStatus::Dormant
        } else if self.is_harvestable() {
            PlantStatus::ReadyToHarvest
        } else {
            PlantStatus::Growing(self.progress.floor() as u32)
        }
    }

    /// Advance one day of growth.
    ///
    /// Dormancy is settled first, then water, then eligibility, then the
    /// germination gate, and only then is growth applied.
    pub fn grow(
        &mut self,
        soil_moisture: u32,
        growth_modifier: f64,
        season: Season,
        soil_temperature: i32,
    ) {
        if self.is_dead {
            return;
        }

        let profile = self.profile();

        self.update_dormancy(profile, season);

        if soil_moisture == 0 {
            self.dry_days += 1;
            if self.dry_days >= DROUGHT_DAYS {
                self.is_dead = true;
                debug!(plant = self.name(), "Died from drought");
            }
            return;
        }
        self.dry_days = 0;

        if self.is_dormant
            || (self.stage >= GrowthStage::Harvestable && !profile.continuous_harvest)
            || (self.stage >= GrowthStage::Mature && self.harvest_count >= profile.max_harvests)
        {
            return;
        }

        if self.is_germinating && self.stage == GrowthStage::Germinating {
            if soil_temperature < profile.min_germination_temp {
                debug!(
                    plant = self.name(),
                    soil_temperature,
                    needed = profile.min_germination_temp,
                    "Soil too cold to germinate"
                );
                return;
            }
            self.is_germinating = false;
        }

        let amount = growth_amount(profile, growth_modifier, season, soil_temperature);
        self.progress += amount;

        if self.progress >= STAGE_COMPLETE {
            self.progress = 0.0;
            if self.stage >= GrowthStage::Mature && profile.continuous_harvest {
                self.stage = GrowthStage::Harvestable;
            } else {
                self.stage = self.stage.next();
            }
            debug!(plant = self.name(), stage = self.stage.display_name(), "Advanced stage");
        }
    }

    fn update_dormancy(&mut self, profile: &SpeciesProfile, season: Season) {
        if !profile.perennial {
            return;
        }

        let should_be_dormant = !profile.produces_in(season);
        if should_be_dormant && !self.is_dormant {
            self.is_dormant = true;
            self.stage = self.stage.min(GrowthStage::Growing);
            self.progress = 0.0;
            self.harvest_count = 0;
            debug!(plant = self.name(), %season, "Entered dormancy");
        } else if !should_be_dormant && self.is_dormant {
            self.is_dormant = false;
            debug!(plant = self.name(), %season, "Woke from dormancy");
        }
    }

    /// Pick the plant.
    ///
    /// Continuous-harvest plants under their limit drop back to mature with a
    /// head start; perennials at their limit rest at the growing stage until
    /// next season; everything else is spent.
    pub fn harvest(&mut self) -> HarvestOutcome {
        if !self.is_harvestable() {
            return HarvestOutcome::NotReady;
        }

        let profile = self.profile();
        self.harvest_count += 1;

        if profile.continuous_harvest && self.harvest_count < profile.max_harvests {
            self.stage = GrowthStage::Mature;
            self.progress = REGROWTH_HEAD_START;
            HarvestOutcome::Keep
        } else if profile.perennial && self.harvest_count >= profile.max_harvests {
            self.stage = GrowthStage::Growing;
            self.progress = 0.0;
            self.harvest_count = 0;
            HarvestOutcome::Keep
        } else {
            HarvestOutcome::Remove
        }
    }

    /// Check whether the plant survives the given air temperature.
    ///
    /// Perennials always survive. Annuals die at freezing, and frost-tender
    /// annuals die from a chill as well. Returns false if the plant is dead.
    pub fn check_temperature_survival(&mut self, air_temperature: i32) -> bool {
        if self.is_dead {
            return false;
        }

        let profile = self.profile();
        if profile.perennial {
            return true;
        }

        let lethal = if profile.frost_tender {
            CHILL_TEMPERATURE
        } else {
            FREEZING_TEMPERATURE
        };

        if air_temperature <= lethal {
            self.is_dead = true;
            debug!(plant = self.name(), air_temperature, "Killed by cold");
            return false;
        }
        true
    }
}

/// Growth for one day, before it is added to progress.
///
/// Multipliers compose in a fixed order: season preference, production
/// season, weather, species rate, then soil temperature stress.
#[must_use]
pub fn growth_amount(
    profile: &SpeciesProfile,
    growth_modifier: f64,
    season: Season,
    soil_temperature: i32,
) -> f64 {
    let mut amount = BASE_GROWTH;

    if season == profile.preferred_season {
        amount *= 1.5;
    } else if season == profile.preferred_season.opposite() {
        amount *= 0.75;
    }

    if !profile.produces_in(season) {
        amount *= 0.5;
    }

    amount *= growth_modifier;
    amount *= profile.growth_rate;

    if soil_temperature < profile.min_germination_temp + 5 {
        amount *= 0.5;
    }
    if soil_temperature > HEAT_STRESS_TEMPERATURE {
        amount *= 0.7;
    }

    amount
}

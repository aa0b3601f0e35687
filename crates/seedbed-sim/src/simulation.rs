//! Simulation context.
//!
//! [`Simulation`] owns one [`Environment`] and one [`Garden`] and is the
//! surface a front end talks to: point commands, the composite next-day
//! tick, and read-only snapshots. There is no process-wide state; callers
//! construct a simulation and pass it where it is needed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

use seedbed_common::{PlotCoord, SeedbedError, SeedbedResult};

use crate::garden::{Garden, GardenSnapshot};
use crate::rng::{self, RandomSource};
use crate::season::Season;
use crate::settings::SimSettings;
use crate::species::Species;
use crate::weather::{Environment, EnvironmentSnapshot};

/// A user action against the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Sow a seed in an empty plot.
    Plant {
        /// Target plot
        coord: PlotCoord,
        /// What to sow
        species: Species,
    },
    /// Water a plot to saturation.
    Water {
        /// Target plot
        coord: PlotCoord,
    },
    /// Pick a ripe plant.
    Harvest {
        /// Target plot
        coord: PlotCoord,
    },
    /// Pull whatever grows in a plot.
    Clear {
        /// Target plot
        coord: PlotCoord,
    },
    /// Move to the next day.
    AdvanceDay,
}

impl Command {
    /// Target plot, if the command has one.
    #[must_use]
    pub fn coord(&self) -> Option<PlotCoord> {
        match self {
            Self::Plant { coord, .. }
            | Self::Water { coord }
            | Self::Harvest { coord }
            | Self::Clear { coord } => Some(*coord),
            Self::AdvanceDay => None,
        }
    }
}

fn parse_coord<'a>(
    mut args: impl Iterator<Item = &'a str>,
    usage: &str,
) -> SeedbedResult<PlotCoord> {
    let mut next = || {
        args.next()
            .and_then(|a| a.parse::<u32>().ok())
            .ok_or_else(|| SeedbedError::InvalidCommand(format!("usage: {usage}")))
    };
    let x = next()?;
    let y = next()?;
    Ok(PlotCoord::new(x, y))
}

impl FromStr for Command {
    type Err = SeedbedError;

    /// Parse `plant X Y SPECIES`, `water X Y`, `harvest X Y`, `clear X Y`,
    /// or `next`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| SeedbedError::InvalidCommand("empty command".to_string()))?
            .to_ascii_lowercase();

        let command = match verb.as_str() {
            "plant" | "sow" => {
                let coord = parse_coord(&mut parts, "plant X Y SPECIES")?;
                let species = parts
                    .next()
                    .ok_or_else(|| {
                        SeedbedError::InvalidCommand("usage: plant X Y SPECIES".to_string())
                    })?
                    .parse()?;
                Self::Plant { coord, species }
            },
            "water" => Self::Water {
                coord: parse_coord(&mut parts, "water X Y")?,
            },
            "harvest" => Self::Harvest {
                coord: parse_coord(&mut parts, "harvest X Y")?,
            },
            "clear" => Self::Clear {
                coord: parse_coord(&mut parts, "clear X Y")?,
            },
            "next" | "day" => Self::AdvanceDay,
            other => return Err(SeedbedError::InvalidCommand(format!("unknown command '{other}'"))),
        };

        if let Some(extra) = parts.next() {
            return Err(SeedbedError::InvalidCommand(format!(
                "unexpected argument '{extra}'"
            )));
        }
        Ok(command)
    }
}

/// What happened on one simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    /// The new day number.
    pub day: u32,
    /// Season on the new day.
    pub season: Season,
    /// True if the season turned over today.
    pub season_changed: bool,
    /// Air temperature (°F).
    pub temperature: i32,
    /// Rainfall percent.
    pub rainfall: u32,
    /// Soil drying applied to every plot.
    pub moisture_reduction: u32,
    /// Growth multiplier applied to every plant.
    pub growth_modifier: f64,
    /// True when the day brought frost.
    pub frost_warning: bool,
    /// Plants killed by the cold today.
    pub frost_kills: u32,
}

/// Result of an executed command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Seed sown (false if the plot was occupied).
    Planted(bool),
    /// Plot watered.
    Watered(bool),
    /// Reward earned (0 if nothing was ready).
    Harvested(u32),
    /// Plot cleared (false if it was empty).
    Cleared(bool),
    /// The day advanced.
    DayAdvanced(DayReport),
}

impl CommandOutcome {
    /// Check whether the command had an effect.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Planted(ok) | Self::Watered(ok) | Self::Cleared(ok) => *ok,
            Self::Harvested(reward) => *reward > 0,
            Self::DayAdvanced(_) => true,
        }
    }
}

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Weather and season.
    pub environment: EnvironmentSnapshot,
    /// Plots and plants.
    pub garden: GardenSnapshot,
    /// Total harvest rewards collected.
    pub earnings: u64,
    /// Number of successful harvests.
    pub harvests: u32,
}

/// A garden and its weather.
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = fastrand::Rng> {
    environment: Environment<R>,
    garden: Garden,
    earnings: u64,
    harvests: u32,
}

impl Simulation<fastrand::Rng> {
    /// Build a simulation from settings.
    ///
    /// Settings are validated first; a missing seed is drawn at random and
    /// logged so the run can be replayed.
    #[must_use]
    pub fn from_settings(settings: &SimSettings) -> Self {
        let mut settings = settings.clone();
        settings.validate();

        let seed = settings.resolve_seed();
        info!(
            seed,
            width = settings.width,
            height = settings.height,
            "Starting garden simulation"
        );

        let environment =
            Environment::with_days_in_season(rng::seeded(seed), settings.days_in_season);
        let garden = Garden::with_initial_soil(
            settings.width,
            settings.height,
            settings.initial_soil_moisture,
            settings.initial_soil_temperature,
        );
        Self::new(environment, garden)
    }

    /// Default-sized garden with a seeded environment.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_settings(&SimSettings {
            seed: Some(seed),
            ..SimSettings::default()
        })
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Assemble a simulation from its parts.
    pub fn new(environment: Environment<R>, garden: Garden) -> Self {
        Self {
            environment,
            garden,
            earnings: 0,
            harvests: 0,
        }
    }

    /// The weather and season.
    pub fn environment(&self) -> &Environment<R> {
        &self.environment
    }

    /// Mutable access to the weather, e.g. to force a season.
    pub fn environment_mut(&mut self) -> &mut Environment<R> {
        &mut self.environment
    }

    /// The garden grid.
    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Total harvest rewards collected.
    pub fn earnings(&self) -> u64 {
        self.earnings
    }

    /// Number of successful harvests.
    pub fn harvests(&self) -> u32 {
        self.harvests
    }

    /// Sow a seed in the current season.
    pub fn plant_seed(&mut self, coord: PlotCoord, species: Species) -> bool {
        let season = self.environment.season();
        self.garden.plant_seed(coord, species, season)
    }

    /// Water a plot to saturation.
    pub fn water_plot(&mut self, coord: PlotCoord) -> bool {
        self.garden.water_plot(coord)
    }

    /// Harvest a plot, banking the reward.
    pub fn harvest_plant(&mut self, coord: PlotCoord) -> u32 {
        let reward = self.garden.harvest_plant(coord);
        if reward > 0 {
            self.earnings += u64::from(reward);
            self.harvests += 1;
        }
        reward
    }

    /// Remove whatever grows in a plot.
    pub fn clear_plot(&mut self, coord: PlotCoord) -> bool {
        self.garden.clear_plot(coord)
    }

    /// Advance the weather, then the garden, by one day.
    pub fn advance_day(&mut self) -> DayReport {
        let previous_season = self.environment.season();

        let moisture_reduction = self.environment.advance_day();
        let growth_modifier = self.environment.growth_modifier();
        let season = self.environment.season();
        let rainfall = self.environment.rainfall_moisture();
        let temperature = self.environment.air_temperature();

        let frost_kills = self.garden.advance_day(
            moisture_reduction,
            growth_modifier,
            season,
            rainfall,
            temperature,
        );

        let report = DayReport {
            day: self.environment.day(),
            season,
            season_changed: season != previous_season,
            temperature,
            rainfall,
            moisture_reduction,
            growth_modifier,
            frost_warning: self.environment.frost_warning(),
            frost_kills,
        };
        debug!(?report, "Day complete");
        report
    }

    /// Run a command.
    ///
    /// Plots outside the garden are rejected with an error; every other
    /// failure is reported through the outcome.
    pub fn execute(&mut self, command: Command) -> SeedbedResult<CommandOutcome> {
        if let Some(coord) = command.coord() {
            if !self.garden.contains(coord) {
                return Err(SeedbedError::OutOfBounds {
                    x: coord.x,
                    y: coord.y,
                    width: self.garden.width(),
                    height: self.garden.height(),
                });
            }
        }

        let outcome = match command {
            Command::Plant { coord, species } => {
                CommandOutcome::Planted(self.plant_seed(coord, species))
            },
            Command::Water { coord } => CommandOutcome::Watered(self.water_plot(coord)),
            Command::Harvest { coord } => CommandOutcome::Harvested(self.harvest_plant(coord)),
            Command::Clear { coord } => CommandOutcome::Cleared(self.clear_plot(coord)),
            Command::AdvanceDay => CommandOutcome::DayAdvanced(self.advance_day()),
        };

        if !outcome.succeeded() {
            debug!(?command, "Command had no effect");
        }
        Ok(outcome)
    }

    /// Capture the full state for display.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            environment: self.environment.snapshot(),
            garden: self.garden.snapshot(),
            earnings: self.earnings,
            harvests: self.harvests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::Plant;
    use crate::weather::{Sunlight, WeatherConditions};

    fn at(x: u32, y: u32) -> PlotCoord {
        PlotCoord::new(x, y)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "plant 1 2 corn".parse::<Command>().ok(),
            Some(Command::Plant {
                coord: at(1, 2),
                species: Species::Corn
            })
        );
        assert_eq!(
            "WATER 0 4".parse::<Command>().ok(),
            Some(Command::Water { coord: at(0, 4) })
        );
        assert_eq!(
            "harvest 3 3".parse::<Command>().ok(),
            Some(Command::Harvest { coord: at(3, 3) })
        );
        assert_eq!(
            "clear 0 0".parse::<Command>().ok(),
            Some(Command::Clear { coord: at(0, 0) })
        );
        assert_eq!("next".parse::<Command>().ok(), Some(Command::AdvanceDay));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("".parse::<Command>(), Err(SeedbedError::InvalidCommand(_))));
        assert!(matches!("dig 1 1".parse::<Command>(), Err(SeedbedError::InvalidCommand(_))));
        assert!(matches!("water 1".parse::<Command>(), Err(SeedbedError::InvalidCommand(_))));
        assert!(matches!("water -1 2".parse::<Command>(), Err(SeedbedError::InvalidCommand(_))));
        assert!(matches!("next now".parse::<Command>(), Err(SeedbedError::InvalidCommand(_))));
        assert!(matches!(
            "plant 1 1 kale".parse::<Command>(),
            Err(SeedbedError::UnknownSpecies(_))
        ));
    }

    #[test]
    fn test_execute_rejects_out_of_bounds() {
        let mut sim = Simulation::with_seed(1);
        let result = sim.execute(Command::Water { coord: at(5, 0) });
        assert!(matches!(
            result,
            Err(SeedbedError::OutOfBounds {
                x: 5,
                width: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_execute_reports_failures_as_outcomes() {
        let mut sim = Simulation::with_seed(1);
        let plant = Command::Plant {
            coord: at(0, 0),
            species: Species::Tomato,
        };
        assert_eq!(sim.execute(plant).ok(), Some(CommandOutcome::Planted(true)));
        assert_eq!(sim.execute(plant).ok(), Some(CommandOutcome::Planted(false)));

        let harvest = sim.execute(Command::Harvest { coord: at(0, 0) }).ok();
        assert_eq!(harvest, Some(CommandOutcome::Harvested(0)));
        assert!(!CommandOutcome::Harvested(0).succeeded());

        let clear = sim.execute(Command::Clear { coord: at(1, 1) }).ok();
        assert_eq!(clear, Some(CommandOutcome::Cleared(false)));
    }

    #[test]
    fn test_same_seed_same_year() {
        let mut a = Simulation::with_seed(2024);
        let mut b = Simulation::with_seed(2024);
        for sim in [&mut a, &mut b] {
            sim.plant_seed(at(0, 0), Species::Carrot);
            sim.plant_seed(at(2, 2), Species::Strawberry);
        }
        for _ in 0..90 {
            let ra = a.advance_day();
            let rb = b.advance_day();
            assert_eq!(ra, rb);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_day_report_tracks_season_change() {
        let mut sim = Simulation::with_seed(11);
        let mut changes = Vec::new();
        for _ in 0..60 {
            let report = sim.advance_day();
            if report.season_changed {
                changes.push((report.day, report.season));
            }
        }
        assert_eq!(
            changes,
            vec![(20, Season::Summer), (40, Season::Fall), (60, Season::Winter)]
        );
    }

    #[test]
    fn test_harvest_banks_reward() {
        let mut sim = Simulation::with_seed(3);
        let coord = at(1, 1);
        sim.plant_seed(coord, Species::Lettuce);

        for _ in 0..50 {
            if sim.garden().plant(coord).is_some_and(Plant::is_harvestable) {
                break;
            }
            if let Some(plant) = sim.garden.cell_mut(coord).and_then(|c| c.plant.as_mut()) {
                plant.grow(100, 2.3, Season::Spring, 75);
            }
        }

        let reward = sim.harvest_plant(coord);
        assert_eq!(reward, Species::Lettuce.profile().harvest_reward);
        assert_eq!(sim.earnings(), u64::from(reward));
        assert_eq!(sim.harvests(), 1);
        assert!(sim.garden().plant(coord).is_none());

        assert_eq!(sim.harvest_plant(coord), 0);
        assert_eq!(sim.harvests(), 1);
    }

    #[test]
    fn test_forced_conditions_drive_garden_tick() {
        let mut sim = Simulation::with_seed(5);
        sim.environment_mut().set_season(Season::Summer);
        sim.plant_seed(at(0, 0), Species::Tomato);
        sim.environment_mut()
            .set_conditions(70, Sunlight::Moderate, WeatherConditions::Clear, 0);

        let env = sim.environment();
        let (reduction, modifier) = (env.moisture_reduction(), env.growth_modifier());
        sim.garden.advance_day(reduction, modifier, Season::Summer, 0, 70);

        // Soil 65 -> 67; 15 * 1.5 * (1 + 0.5 + 0.2 + 0.3)
        let plant = sim.garden().plant(at(0, 0)).expect("plant");
        assert!((plant.progress() - 45.0).abs() < 1e-9);
        assert_eq!(sim.garden().cell(at(0, 0)).map(|c| c.soil_moisture), Some(30));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut sim = Simulation::with_seed(8);
        sim.plant_seed(at(0, 0), Species::Sunflower);
        let json = serde_json::to_string(&sim.snapshot()).expect("serialize");
        assert!(json.contains("\"name\":\"Sunflower\""));
        assert!(json.contains("\"earnings\":0"));
    }
}

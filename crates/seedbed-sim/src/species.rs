//! Species catalog.
//!
//! The set of plantable species is closed: every [`Species`] maps to exactly
//! one static [`SpeciesProfile`]. Names coming from outside are parsed at the
//! boundary; the growth engine never sees an unknown species.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use seedbed_common::SeedbedError;

use crate::season::Season;

/// Icon shown for any dead plant.
pub const DEAD_ICON: &str = "🥀";

/// A plantable species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Summer fruit, picked repeatedly.
    #[default]
    Tomato,
    /// Cool-season root.
    Carrot,
    /// Tall summer grain.
    Corn,
    /// Leafy spring green.
    Lettuce,
    /// Fall gourd.
    Pumpkin,
    /// Summer flower.
    Sunflower,
    /// Perennial berry.
    Strawberry,
    /// Perennial spring spear.
    Asparagus,
}

/// Static growing characteristics of a species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesProfile {
    /// Display name.
    pub name: &'static str,
    /// Short description for tooltips.
    pub description: &'static str,
    /// Multiplier on daily growth.
    pub growth_rate: f64,
    /// Relative thirst; informational.
    pub water_need: f64,
    /// Icons for growth stages 0 through 4.
    pub icons: [&'static str; 5],
    /// Reward for one harvest.
    pub harvest_reward: u32,
    /// Season with a 1.5x growth bonus.
    pub preferred_season: Season,
    /// Seasons in which the plant bears; perennials are dormant outside them.
    pub production_seasons: &'static [Season],
    /// Survives frost and returns each year.
    pub perennial: bool,
    /// Regrows fruit after picking instead of being pulled.
    pub continuous_harvest: bool,
    /// Harvests allowed per season.
    pub max_harvests: u32,
    /// Soil temperature needed to sprout (°F).
    pub min_germination_temp: i32,
    /// Killed by chilly (not just freezing) nights.
    pub frost_tender: bool,
}

impl SpeciesProfile {
    /// Check whether the plant bears in the given season.
    #[must_use]
    pub fn produces_in(&self, season: Season) -> bool {
        self.production_seasons.contains(&season)
    }

    /// Short lifecycle label, e.g. "Annual, Single Harvest".
    #[must_use]
    pub fn lifecycle_label(&self) -> &'static str {
        match (self.perennial, self.max_harvests > 1) {
            (true, true) => "Perennial, Multiple Harvests",
            (true, false) => "Perennial, Single Harvest",
            (false, true) => "Annual, Multiple Harvests",
            (false, false) => "Annual, Single Harvest",
        }
    }
}

const SEEDLING_ICONS: [&str; 4] = ["🌰", "🌱", "🌿", "🌱"];

const fn icons(ripe: &'static str) -> [&'static str; 5] {
    [
        SEEDLING_ICONS[0],
        SEEDLING_ICONS[1],
        SEEDLING_ICONS[2],
        SEEDLING_ICONS[3],
        ripe,
    ]
}

static TOMATO: SpeciesProfile = SpeciesProfile {
    name: "Tomato",
    description: "A juicy red fruit that grows well in summer.",
    growth_rate: 1.0,
    water_need: 1.2,
    icons: icons("🍅"),
    harvest_reward: 10,
    preferred_season: Season::Summer,
    production_seasons: &[Season::Summer, Season::Fall],
    perennial: false,
    continuous_harvest: true,
    max_harvests: 3,
    min_germination_temp: 60,
    frost_tender: true,
};

static CARROT: SpeciesProfile = SpeciesProfile {
    name: "Carrot",
    description: "A root vegetable that grows well in spring.",
    growth_rate: 0.8,
    water_need: 0.9,
    icons: icons("🥕"),
    harvest_reward: 5,
    preferred_season: Season::Spring,
    production_seasons: &[Season::Spring, Season::Fall],
    perennial: false,
    continuous_harvest: false,
    max_harvests: 1,
    min_germination_temp: 45,
    frost_tender: false,
};

static CORN: SpeciesProfile = SpeciesProfile {
    name: "Corn",
    description: "A tall grain that grows best in hot summer weather.",
    growth_rate: 1.2,
    water_need: 1.5,
    icons: icons("🌽"),
    harvest_reward: 15,
    preferred_season: Season::Summer,
    production_seasons: &[Season::Summer],
    perennial: false,
    continuous_harvest: false,
    max_harvests: 1,
    min_germination_temp: 60,
    frost_tender: true,
};

static LETTUCE: SpeciesProfile = SpeciesProfile {
    name: "Lettuce",
    description: "A leafy vegetable that prefers cool weather.",
    growth_rate: 0.7,
    water_need: 1.1,
    icons: icons("🥬"),
    harvest_reward: 6,
    preferred_season: Season::Spring,
    production_seasons: &[Season::Spring, Season::Fall],
    perennial: false,
    continuous_harvest: false,
    max_harvests: 1,
    min_germination_temp: 40,
    frost_tender: false,
};

static PUMPKIN: SpeciesProfile = SpeciesProfile {
    name: "Pumpkin",
    description: "A large orange gourd that matures in the fall.",
    growth_rate: 0.9,
    water_need: 1.3,
    icons: icons("🎃"),
    harvest_reward: 20,
    preferred_season: Season::Fall,
    production_seasons: &[Season::Fall],
    perennial: false,
    continuous_harvest: false,
    max_harvests: 1,
    min_germination_temp: 65,
    frost_tender: true,
};

static SUNFLOWER: SpeciesProfile = SpeciesProfile {
    name: "Sunflower",
    description: "A tall flower that follows the sun as it grows.",
    growth_rate: 1.1,
    water_need: 1.0,
    icons: icons("🌻"),
    harvest_reward: 12,
    preferred_season: Season::Summer,
    production_seasons: &[Season::Summer],
    perennial: false,
    continuous_harvest: false,
    max_harvests: 1,
    min_germination_temp: 55,
    frost_tender: false,
};

static STRAWBERRY: SpeciesProfile = SpeciesProfile {
    name: "Strawberry",
    description: "A sweet berry that returns every spring.",
    growth_rate: 0.9,
    water_need: 1.1,
    icons: icons("🍓"),
    harvest_reward: 8,
    preferred_season: Season::Spring,
    production_seasons: &[Season::Spring, Season::Summer],
    perennial: true,
    continuous_harvest: true,
    max_harvests: 3,
    min_germination_temp: 50,
    frost_tender: false,
};

static ASPARAGUS: SpeciesProfile = SpeciesProfile {
    name: "Asparagus",
    description: "Spears that come back each spring for years.",
    growth_rate: 0.6,
    water_need: 1.0,
    icons: icons("🎋"),
    harvest_reward: 14,
    preferred_season: Season::Spring,
    production_seasons: &[Season::Spring],
    perennial: true,
    continuous_harvest: true,
    max_harvests: 2,
    min_germination_temp: 50,
    frost_tender: false,
};

impl Species {
    /// All species in catalog order.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Tomato,
            Self::Carrot,
            Self::Corn,
            Self::Lettuce,
            Self::Pumpkin,
            Self::Sunflower,
            Self::Strawberry,
            Self::Asparagus,
        ]
    }

    /// The static profile for this species.
    #[must_use]
    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Self::Tomato => &TOMATO,
            Self::Carrot => &CARROT,
            Self::Corn => &CORN,
            Self::Lettuce => &LETTUCE,
            Self::Pumpkin => &PUMPKIN,
            Self::Sunflower => &SUNFLOWER,
            Self::Strawberry => &STRAWBERRY,
            Self::Asparagus => &ASPARAGUS,
        }
    }

    /// Lowercase identifier used in commands and config.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Tomato => "tomato",
            Self::Carrot => "carrot",
            Self::Corn => "corn",
            Self::Lettuce => "lettuce",
            Self::Pumpkin => "pumpkin",
            Self::Sunflower => "sunflower",
            Self::Strawberry => "strawberry",
            Self::Asparagus => "asparagus",
        }
    }

    /// Parse a species name, falling back to tomato for unknown names.
    ///
    /// Prefer [`str::parse`], which rejects unknown names.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

impl FromStr for Species {
    type Err = SeedbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|species| species.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SeedbedError::UnknownSpecies(wanted.to_string()))
    }
}

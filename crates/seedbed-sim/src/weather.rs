//! Daily weather and season simulation.
//!
//! This module provides the [`Environment`], advanced once per simulated day:
//! - Seasons cycle every `days_in_season` days
//! - Daily high/low temperatures drawn from the season's range
//! - Sunlight and rain resampled together each day
//! - Soil drying (moisture reduction) and the plant growth modifier

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::rng::{self, RandomSource};
use crate::season::{Season, DEFAULT_DAYS_IN_SEASON};

/// Air temperature at or below which frost forms (°F).
pub const FROST_TEMPERATURE: i32 = 32;

/// Maximum random swing applied to the season's base range (°F).
const TEMPERATURE_VARIATION: f64 = 10.0;

/// Minimum gap between the daily high and low (°F).
const MIN_DAILY_SPREAD: f64 = 10.0;

/// Upper bound on a single day's moisture reduction (percent).
pub const MAX_MOISTURE_REDUCTION: u32 = 50;

/// Floor for the growth modifier so eligible plants always grow a little.
pub const MIN_GROWTH_MODIFIER: f64 = 0.1;

/// Amount of sunlight reaching the garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sunlight {
    /// Full sun (60% of days).
    #[default]
    Bright,
    /// Partial sun (30% of days, and every light-rain day).
    Moderate,
    /// Overcast (10% of days, and every heavy-rain day).
    Dim,
}

impl Sunlight {
    /// Get the display name for this sunlight level.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bright => "Bright",
            Self::Moderate => "Moderate",
            Self::Dim => "Dim",
        }
    }

    /// Soil drying caused by sunlight (percent).
    #[must_use]
    pub const fn drying(self) -> u32 {
        match self {
            Self::Bright => 15,
            Self::Moderate => 10,
            Self::Dim => 5,
        }
    }

    /// Contribution to the daily growth modifier.
    #[must_use]
    pub fn growth_bonus(self) -> f64 {
        match self {
            Self::Bright => 0.5,
            Self::Moderate => 0.2,
            Self::Dim => -0.3,
        }
    }
}

impl fmt::Display for Sunlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Precipitation for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherConditions {
    /// No rain.
    #[default]
    Clear,
    /// 10-40% rainfall.
    LightRain,
    /// 40-100% rainfall.
    HeavyRain,
}

impl WeatherConditions {
    /// Get the display name for these conditions.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::LightRain => "Light rain",
            Self::HeavyRain => "Heavy rain",
        }
    }

    /// Check if it's raining.
    #[must_use]
    pub fn is_raining(self) -> bool {
        matches!(self, Self::LightRain | Self::HeavyRain)
    }
}

impl fmt::Display for WeatherConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Soil drying for a day with the given conditions.
///
/// Rain days never dry the soil. Otherwise heat and sun each contribute,
/// and the total is clamped to `0..=50`.
#[must_use]
pub fn moisture_reduction(temperature: i32, sunlight: Sunlight, rainfall: u32) -> u32 {
    if rainfall > 0 {
        return 0;
    }

    let heat = match temperature {
        t if t < 60 => 5,
        t if t < 80 => 10,
        _ => 20,
    };

    (heat + sunlight.drying()).min(MAX_MOISTURE_REDUCTION)
}

/// Growth multiplier for a day with the given conditions, floored at 0.1.
#[must_use]
pub fn growth_modifier(temperature: i32, sunlight: Sunlight, season: Season) -> f64 {
    let mut modifier = 1.0;

    modifier += if (65..=85).contains(&temperature) {
        0.5
    } else if !(55..=95).contains(&temperature) {
        -0.5
    } else {
        -0.2
    };

    modifier += sunlight.growth_bonus();
    modifier += season.growth_bonus();

    modifier.max(MIN_GROWTH_MODIFIER)
}

/// Round half up, matching how whole-degree readings are reported.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Read-only view of the environment for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// Day counter, starting at 1.
    pub day: u32,
    /// Current season.
    pub season: Season,
    /// Days per season.
    pub days_in_season: u32,
    /// Current air temperature (°F).
    pub temperature: i32,
    /// Today's high (°F).
    pub high_temp: i32,
    /// Today's low (°F).
    pub low_temp: i32,
    /// Today's sunlight.
    pub sunlight: Sunlight,
    /// Today's precipitation.
    pub weather: WeatherConditions,
    /// Rainfall percent (0-100).
    pub rainfall: u32,
    /// True when the temperature is at or below freezing.
    pub frost_warning: bool,
}

/// The garden's weather and season state.
///
/// Owns its random source; every randomized field is redrawn from it in a
/// fixed order so that a given seed always produces the same year.
#[derive(Debug, Clone)]
pub struct Environment<R: RandomSource = fastrand::Rng> {
    day: u32,
    days_in_season: u32,
    season: Season,
    high_temp: i32,
    low_temp: i32,
    temperature: i32,
    frost_warning: bool,
    sunlight: Sunlight,
    weather: WeatherConditions,
    rainfall: u32,
    rng: R,
}

impl Environment<fastrand::Rng> {
    /// Create an environment with a seeded generator.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(rng::seeded(seed))
    }
}

impl<R: RandomSource> Environment<R> {
    /// Create a day-1 spring environment using the given random source.
    ///
    /// The first day's high/low and temperature are drawn immediately.
    pub fn new(rng: R) -> Self {
        Self::with_days_in_season(rng, DEFAULT_DAYS_IN_SEASON)
    }

    /// Create an environment with a custom season length.
    pub fn with_days_in_season(rng: R, days_in_season: u32) -> Self {
        let mut env = Self {
            day: 1,
            days_in_season: days_in_season.max(1),
            season: Season::Spring,
            high_temp: 80,
            low_temp: 65,
            temperature: 75,
            frost_warning: false,
            sunlight: Sunlight::Bright,
            weather: WeatherConditions::Clear,
            rainfall: 0,
            rng,
        };
        env.generate_daily_high_low();
        env.update_temperature();
        env
    }

    /// Advance to the next day.
    ///
    /// Returns the day's moisture reduction.
    pub fn advance_day(&mut self) -> u32 {
        self.day += 1;

        if self.day % self.days_in_season == 0 {
            self.change_season();
        }

        self.generate_daily_high_low();
        self.update_temperature();
        self.update_conditions();

        debug!(
            day = self.day,
            season = %self.season,
            temperature = self.temperature,
            low = self.low_temp,
            high = self.high_temp,
            sunlight = %self.sunlight,
            weather = %self.weather,
            rainfall = self.rainfall,
            "New day"
        );

        self.moisture_reduction()
    }

    fn generate_daily_high_low(&mut self) {
        let range = self.season.temperature_range();
        let base_min = f64::from(range.min);
        let base_max = f64::from(range.max);

        let high = (base_max + self.rng.next_f64() * TEMPERATURE_VARIATION)
            .min(base_max + TEMPERATURE_VARIATION)
            .floor();
        let low = (base_min - TEMPERATURE_VARIATION * self.rng.next_f64())
            .min(high - MIN_DAILY_SPREAD)
            .max(base_min - TEMPERATURE_VARIATION)
            .floor();

        self.high_temp = high as i32;
        self.low_temp = low as i32;
    }

    fn update_temperature(&mut self) {
        let range = f64::from(self.high_temp - self.low_temp);
        // Product of two draws biases the reading toward the low end.
        let factor = self.rng.next_f64() * self.rng.next_f64();
        self.temperature = round_half_up(f64::from(self.low_temp) + range * factor);

        self.frost_warning = self.temperature <= FROST_TEMPERATURE;
        if self.frost_warning {
            warn!(
                day = self.day,
                temperature = self.temperature,
                "Frost warning"
            );
        }
    }

    fn change_season(&mut self) {
        self.season = self.season.next();
        info!(day = self.day, season = %self.season, "Season changed");
    }

    fn update_conditions(&mut self) {
        let light_roll = self.rng.next_f64();
        self.sunlight = if light_roll < 0.6 {
            Sunlight::Bright
        } else if light_roll < 0.9 {
            Sunlight::Moderate
        } else {
            Sunlight::Dim
        };

        let rain_chance = f64::from(self.season.rain_chance());
        let rain_roll = self.rng.next_f64() * 100.0;

        if rain_roll < rain_chance {
            if rain_roll < rain_chance / 3.0 {
                self.weather = WeatherConditions::HeavyRain;
                self.rainfall = (40.0 + self.rng.next_f64() * 60.0).floor() as u32;
                self.sunlight = Sunlight::Dim;
            } else {
                self.weather = WeatherConditions::LightRain;
                self.rainfall = (10.0 + self.rng.next_f64() * 30.0).floor() as u32;
                self.sunlight = Sunlight::Moderate;
            }
        } else {
            self.weather = WeatherConditions::Clear;
            self.rainfall = 0;
        }
    }

    /// Soil drying for today's conditions.
    #[must_use]
    pub fn moisture_reduction(&self) -> u32 {
        moisture_reduction(self.temperature, self.sunlight, self.rainfall)
    }

    /// Growth multiplier for today's conditions.
    #[must_use]
    pub fn growth_modifier(&self) -> f64 {
        growth_modifier(self.temperature, self.sunlight, self.season)
    }

    /// Current air temperature (°F).
    #[must_use]
    pub fn air_temperature(&self) -> i32 {
        self.temperature
    }

    /// Moisture that today's rain adds to every plot.
    #[must_use]
    pub fn rainfall_moisture(&self) -> u32 {
        self.rainfall
    }

    /// Current day number.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current season.
    #[must_use]
    pub fn season(&self) -> Season {
        self.season
    }

    /// Days per season.
    #[must_use]
    pub fn days_in_season(&self) -> u32 {
        self.days_in_season
    }

    /// Today's high temperature.
    #[must_use]
    pub fn high_temp(&self) -> i32 {
        self.high_temp
    }

    /// Today's low temperature.
    #[must_use]
    pub fn low_temp(&self) -> i32 {
        self.low_temp
    }

    /// Today's sunlight.
    #[must_use]
    pub fn sunlight(&self) -> Sunlight {
        self.sunlight
    }

    /// Today's precipitation.
    #[must_use]
    pub fn weather(&self) -> WeatherConditions {
        self.weather
    }

    /// Check for frost.
    #[must_use]
    pub fn frost_warning(&self) -> bool {
        self.frost_warning
    }

    /// Force the season, e.g. to start a scenario mid-year.
    pub fn set_season(&mut self, season: Season) {
        self.season = season;
    }

    /// Force today's readings without consuming random draws.
    ///
    /// High and low are widened to contain the forced temperature.
    pub fn set_conditions(
        &mut self,
        temperature: i32,
        sunlight: Sunlight,
        weather: WeatherConditions,
        rainfall: u32,
    ) {
        self.temperature = temperature;
        self.high_temp = self.high_temp.max(temperature);
        self.low_temp = self.low_temp.min(temperature);
        self.frost_warning = temperature <= FROST_TEMPERATURE;
        self.sunlight = sunlight;
        self.weather = weather;
        self.rainfall = if weather.is_raining() {
            rainfall.min(100)
        } else {
            0
        };
    }

    /// Capture the current state for display.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            day: self.day,
            season: self.season,
            days_in_season: self.days_in_season,
            temperature: self.temperature,
            high_temp: self.high_temp,
            low_temp: self.low_temp,
            sunlight: self.sunlight,
            weather: self.weather,
            rainfall: self.rainfall,
            frost_warning: self.frost_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use proptest::prelude::*;

    #[test]
    fn test_moisture_reduction_table() {
        assert_eq!(moisture_reduction(50, Sunlight::Dim, 0), 10);
        assert_eq!(moisture_reduction(59, Sunlight::Bright, 0), 20);
        assert_eq!(moisture_reduction(60, Sunlight::Moderate, 0), 20);
        assert_eq!(moisture_reduction(79, Sunlight::Bright, 0), 25);
        assert_eq!(moisture_reduction(80, Sunlight::Bright, 0), 35);
        assert_eq!(moisture_reduction(100, Sunlight::Dim, 0), 25);
    }

    #[test]
    fn test_rain_days_never_dry_soil() {
        assert_eq!(moisture_reduction(100, Sunlight::Bright, 1), 0);
        assert_eq!(moisture_reduction(40, Sunlight::Dim, 80), 0);
    }

    #[test]
    fn test_growth_modifier_best_case() {
        let m = growth_modifier(75, Sunlight::Bright, Season::Summer);
        assert!((m - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_growth_modifier_temperature_bands() {
        // Moderate sun (+0.2), spring (+0.2)
        let ideal = growth_modifier(65, Sunlight::Moderate, Season::Spring);
        let mild = growth_modifier(60, Sunlight::Moderate, Season::Spring);
        let cold = growth_modifier(54, Sunlight::Moderate, Season::Spring);
        let hot = growth_modifier(96, Sunlight::Moderate, Season::Spring);
        let warm_edge = growth_modifier(95, Sunlight::Moderate, Season::Spring);

        assert!((ideal - 1.9).abs() < 1e-9);
        assert!((mild - 1.2).abs() < 1e-9);
        assert!((cold - 0.9).abs() < 1e-9);
        assert!((hot - 0.9).abs() < 1e-9);
        assert!((warm_edge - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_growth_modifier_floor() {
        // 1.0 - 0.5 - 0.3 - 0.3 = -0.1, floored
        let m = growth_modifier(20, Sunlight::Dim, Season::Winter);
        assert!((m - MIN_GROWTH_MODIFIER).abs() < 1e-9);
    }

    #[test]
    fn test_new_environment_draws_first_day() {
        // high: 75 + floor(0.5*10) = 80; low: floor(45 - 5) = 40
        // temperature: round(40 + 40 * 0.25) = 50
        let env = Environment::new(ScriptedRandom::constant(0.5));
        assert_eq!(env.day(), 1);
        assert_eq!(env.season(), Season::Spring);
        assert_eq!(env.high_temp(), 80);
        assert_eq!(env.low_temp(), 40);
        assert_eq!(env.air_temperature(), 50);
        assert!(!env.frost_warning());
        assert_eq!(env.weather(), WeatherConditions::Clear);
    }

    #[test]
    fn test_season_changes_every_twenty_days() {
        let mut env = Environment::with_seed(7);
        let mut seasons = Vec::new();
        while env.day() < 80 {
            env.advance_day();
            if env.day() % 20 == 0 {
                seasons.push(env.season());
            }
        }
        assert_eq!(
            seasons,
            vec![Season::Summer, Season::Fall, Season::Winter, Season::Spring]
        );
    }

    #[test]
    fn test_season_holds_until_day_twenty() {
        let mut env = Environment::with_seed(3);
        for _ in 0..18 {
            env.advance_day();
        }
        assert_eq!(env.day(), 19);
        assert_eq!(env.season(), Season::Spring);
        env.advance_day();
        assert_eq!(env.season(), Season::Summer);
    }

    #[test]
    fn test_heavy_rain_forces_dim_light() {
        // Spring rain chance 40: roll 0.1*100 = 10 < 40/3, heavy rain.
        let mut env = Environment::new(ScriptedRandom::constant(0.1));
        let reduction = env.advance_day();
        assert_eq!(env.weather(), WeatherConditions::HeavyRain);
        assert_eq!(env.sunlight(), Sunlight::Dim);
        assert_eq!(env.rainfall_moisture(), 46);
        assert_eq!(reduction, 0);
    }

    #[test]
    fn test_light_rain_forces_moderate_light() {
        // Roll 0.35*100 = 35: under 40 but over 40/3.
        let mut env = Environment::new(ScriptedRandom::constant(0.35));
        env.advance_day();
        assert_eq!(env.weather(), WeatherConditions::LightRain);
        assert_eq!(env.sunlight(), Sunlight::Moderate);
        assert_eq!(env.rainfall_moisture(), 20);
    }

    #[test]
    fn test_clear_day_has_no_rainfall() {
        let mut env = Environment::new(ScriptedRandom::constant(0.95));
        env.advance_day();
        assert_eq!(env.weather(), WeatherConditions::Clear);
        assert_eq!(env.sunlight(), Sunlight::Dim);
        assert_eq!(env.rainfall_moisture(), 0);
    }

    #[test]
    fn test_frost_warning_in_cold_winter() {
        let mut env = Environment::new(ScriptedRandom::constant(0.0));
        env.set_season(Season::Winter);
        env.advance_day();
        // low = max(min(20, 45), 10) = 20, temperature = 20
        assert_eq!(env.air_temperature(), 20);
        assert!(env.frost_warning());
    }

    #[test]
    fn test_set_conditions() {
        let mut env = Environment::with_seed(1);
        env.set_conditions(90, Sunlight::Bright, WeatherConditions::Clear, 70);
        assert_eq!(env.air_temperature(), 90);
        assert_eq!(env.rainfall_moisture(), 0);
        assert!(env.high_temp() >= 90);
        assert_eq!(env.moisture_reduction(), 35);
    }

    #[test]
    fn test_snapshot_serializes() {
        let env = Environment::with_seed(5);
        let json = serde_json::to_string(&env.snapshot()).expect("serialize");
        assert!(json.contains("\"season\":\"spring\""));
        assert!(json.contains("\"day\":1"));
    }

    proptest! {
        #[test]
        fn prop_moisture_reduction_bounded(
            temperature in -20i32..130,
            sun in 0usize..3,
            rainfall in 0u32..=100,
        ) {
            let sunlight = [Sunlight::Bright, Sunlight::Moderate, Sunlight::Dim][sun];
            let reduction = moisture_reduction(temperature, sunlight, rainfall);
            prop_assert!(reduction <= MAX_MOISTURE_REDUCTION);
            if rainfall > 0 {
                prop_assert_eq!(reduction, 0);
            }
        }

        #[test]
        fn prop_growth_modifier_floor(
            temperature in -20i32..130,
            sun in 0usize..3,
            season in 0usize..4,
        ) {
            let sunlight = [Sunlight::Bright, Sunlight::Moderate, Sunlight::Dim][sun];
            let m = growth_modifier(temperature, sunlight, Season::all()[season]);
            prop_assert!(m >= MIN_GROWTH_MODIFIER);
        }

        #[test]
        fn prop_daily_readings_stay_consistent(seed in any::<u64>(), days in 1usize..200) {
            let mut env = Environment::with_seed(seed);
            for _ in 0..days {
                let reduction = env.advance_day();
                prop_assert!(reduction <= MAX_MOISTURE_REDUCTION);
                prop_assert!(env.low_temp() <= env.high_temp() - 10);
                prop_assert!(env.air_temperature() >= env.low_temp());
                prop_assert!(env.air_temperature() <= env.high_temp());
                prop_assert_eq!(env.frost_warning(), env.air_temperature() <= FROST_TEMPERATURE);
                prop_assert!(env.rainfall_moisture() <= 100);
                prop_assert_eq!(env.weather().is_raining(), env.rainfall_moisture() > 0);
            }
        }
    }
}

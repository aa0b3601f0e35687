//! Text rendering of simulation state.

use seedbed_sim::{DayReport, PlantStatus, SimulationSnapshot};

/// Marker for an empty plot.
const EMPTY_PLOT: &str = ".";

/// One-line summary of the environment and earnings.
pub fn render_header(snapshot: &SimulationSnapshot) -> String {
    let env = &snapshot.environment;
    let rain = if env.rainfall > 0 {
        format!(" {}%", env.rainfall)
    } else {
        String::new()
    };
    let frost = if env.frost_warning { " | FROST" } else { "" };

    format!(
        "Day {} | {} | {}°F (low {}, high {}) | {} | {}{rain} | soil {}°F | earned {} from {} harvests{frost}",
        env.day,
        env.season,
        env.temperature,
        env.low_temp,
        env.high_temp,
        env.sunlight,
        env.weather,
        snapshot.garden.average_soil_temperature,
        snapshot.earnings,
        snapshot.harvests,
    )
}

/// Short status tag shown beside a plant's icon.
pub fn status_label(status: &PlantStatus) -> String {
    match status {
        PlantStatus::Dead => "DEAD".to_string(),
        PlantStatus::Dormant => "DORMANT".to_string(),
        PlantStatus::ReadyToHarvest => "HARVEST!".to_string(),
        PlantStatus::Growing(percent) => format!("{percent}%"),
    }
}

/// The grid, one line per row: icon and status (or `.`), then soil moisture.
pub fn render_grid(snapshot: &SimulationSnapshot) -> String {
    let garden = &snapshot.garden;
    let width = garden.width as usize;
    let mut out = String::new();

    for row in garden.cells.chunks(width.max(1)) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match &cell.plant {
                Some(plant) => format!(
                    "{} {}{:>4}",
                    plant.icon,
                    status_label(&plant.status),
                    cell.soil_moisture
                ),
                None => format!("{EMPTY_PLOT}{:>4}", cell.soil_moisture),
            })
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

/// Header followed by the grid.
pub fn render_snapshot(snapshot: &SimulationSnapshot) -> String {
    format!("{}\n{}", render_header(snapshot), render_grid(snapshot))
}

/// Summary of one day's tick.
pub fn render_report(report: &DayReport) -> String {
    let mut parts = vec![format!(
        "Day {}: {}°F, rain {}%, soil dried {}%, growth x{:.1}",
        report.day,
        report.temperature,
        report.rainfall,
        report.moisture_reduction,
        report.growth_modifier
    )];
    if report.season_changed {
        parts.push(format!("{} begins", report.season));
    }
    if report.frost_warning {
        parts.push("frost".to_string());
    }
    if report.frost_kills > 0 {
        parts.push(format!("{} killed by cold", report.frost_kills));
    }
    parts.join(", ")
}

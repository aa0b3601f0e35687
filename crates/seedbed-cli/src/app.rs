//! Command-line front end.
//!
//! Reads one command per line from stdin and prints the result, standing in
//! for the browser renderer. Simulation commands (`plant`, `water`,
//! `harvest`, `clear`, `next`) go to the simulation; `show`, `json`, `help`,
//! and `quit` are handled here.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use seedbed_sim::{Command, CommandOutcome, Simulation};

use crate::config::{CliConfig, OutputFormat};
use crate::render;

const COMMANDS: &str = "\
commands:
  plant X Y SPECIES   sow a seed (tomato, carrot, corn, lettuce, pumpkin,
                      sunflower, strawberry, asparagus)
  water X Y           water a plot
  harvest X Y         pick a ripe plant
  clear X Y           pull a plant
  next                advance one day
  show                print the garden
  json                print the full state as JSON
  help                print this message
  quit                exit";

/// Headless garden simulation driven by commands on stdin.
#[derive(Debug, Parser)]
#[command(name = "seedbed", version, after_help = COMMANDS)]
pub struct Args {
    /// Config file to load instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Weather seed, overriding the config
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Save the effective config to the default location
    #[arg(long)]
    pub write_config: bool,
}

/// Whether to keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A simulation plus its display settings.
pub struct Session {
    sim: Simulation,
    config: CliConfig,
}

impl Session {
    /// Start a simulation from configuration.
    pub fn new(config: CliConfig) -> Self {
        let sim = Simulation::from_settings(&config.sim);
        Self { sim, config }
    }

    /// Process input until it ends or `quit` is read.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.print_state(out)?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            if self.handle_line(line.trim(), out)? == Flow::Quit {
                break;
            }
        }

        info!(
            day = self.sim.environment().day(),
            earnings = self.sim.earnings(),
            harvests = self.sim.harvests(),
            "Session finished"
        );
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        if self.config.echo_commands {
            writeln!(out, "> {line}")?;
        }

        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{COMMANDS}")?,
            "show" => self.print_state(out)?,
            "json" => writeln!(out, "{}", serde_json::to_string(&self.sim.snapshot())?)?,
            _ => self.run_command(line, out)?,
        }
        Ok(Flow::Continue)
    }

    fn run_command<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        let result = line
            .parse::<Command>()
            .and_then(|command| Ok((command, self.sim.execute(command)?)));

        let (command, outcome) = match result {
            Ok(done) => done,
            Err(e) => {
                debug!(line, error = %e, "Rejected command");
                writeln!(out, "error: {e}")?;
                return Ok(());
            },
        };

        match self.config.output {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
            },
            OutputFormat::Text => {
                writeln!(out, "{}", self.describe(command, &outcome))?;
                if matches!(outcome, CommandOutcome::DayAdvanced(_)) {
                    self.print_state(out)?;
                }
            },
        }
        Ok(())
    }

    fn describe(&self, command: Command, outcome: &CommandOutcome) -> String {
        match (command, outcome) {
            (Command::Plant { coord, species }, CommandOutcome::Planted(true)) => {
                format!("Planted {species} at {coord}")
            },
            (Command::Plant { coord, .. }, CommandOutcome::Planted(false)) => {
                format!("Plot {coord} is already occupied")
            },
            (Command::Water { coord }, _) => format!("Watered {coord}"),
            (Command::Harvest { coord }, CommandOutcome::Harvested(0)) => {
                format!("Nothing ready to harvest at {coord}")
            },
            (Command::Harvest { coord }, CommandOutcome::Harvested(reward)) => format!(
                "Harvested {coord} for {reward} (total {})",
                self.sim.earnings()
            ),
            (Command::Clear { coord }, CommandOutcome::Cleared(true)) => {
                format!("Cleared {coord}")
            },
            (Command::Clear { coord }, _) => format!("Plot {coord} is already empty"),
            (_, CommandOutcome::DayAdvanced(report)) => render::render_report(report),
            (command, outcome) => format!("{command:?}: {outcome:?}"),
        }
    }

    fn print_state<W: Write>(&self, out: &mut W) -> Result<()> {
        let snapshot = self.sim.snapshot();
        match self.config.output {
            OutputFormat::Text => write!(out, "{}", render::render_snapshot(&snapshot))?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&snapshot)?)?,
        }
        Ok(())
    }
}

/// Run the application.
pub fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = Some(seed);
    }
    if args.write_config {
        config
            .save()
            .with_context(|| format!("failed to write {}", CliConfig::config_path().display()))?;
    }

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_sim::SimSettings;
    use std::io::Cursor;

    fn session(output: OutputFormat) -> Session {
        Session::new(CliConfig {
            output,
            echo_commands: false,
            sim: SimSettings {
                seed: Some(17),
                ..SimSettings::default()
            },
        })
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session
            .run(Cursor::new(script.to_string()), &mut out)
            .expect("session runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["seedbed", "--config", "garden.toml", "-s", "42"])
            .expect("valid args");
        assert_eq!(args.config, Some(PathBuf::from("garden.toml")));
        assert_eq!(args.seed, Some(42));
        assert!(!args.write_config);

        let args = Args::try_parse_from(["seedbed", "--write-config"]).expect("valid args");
        assert!(args.write_config);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(Args::try_parse_from(["seedbed", "--seed"]).is_err());
        assert!(Args::try_parse_from(["seedbed", "--seed", "soon"]).is_err());
        assert!(Args::try_parse_from(["seedbed", "--seed", "-3"]).is_err());
        assert!(Args::try_parse_from(["seedbed", "--fast"]).is_err());
    }

    #[test]
    fn test_args_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_text_session() {
        let mut session = session(OutputFormat::Text);
        let out = run_script(
            &mut session,
            "plant 0 0 tomato\n\
             plant 0 0 corn\n\
             water 0 0\n\
             # comment\n\
             plant 9 9 corn\n\
             plant 0 1 kale\n\
             harvest 0 0\n\
             clear 4 4\n\
             next\n\
             quit\n\
             next\n",
        );

        assert!(out.starts_with("Day 1 | Spring"));
        assert!(out.contains("Planted Tomato at (0,0)"));
        assert!(out.contains("Plot (0,0) is already occupied"));
        assert!(out.contains("Watered (0,0)"));
        assert!(out.contains("error: Plot (9, 9) is outside the 5x5 garden"));
        assert!(out.contains("error: Unknown species: kale"));
        assert!(out.contains("Nothing ready to harvest at (0,0)"));
        assert!(out.contains("Plot (4,4) is already empty"));
        assert!(out.contains("Day 2:"));
        assert!(!out.contains("Day 3:"));
        assert_eq!(session.sim.environment().day(), 2);
    }

    #[test]
    fn test_json_session() {
        let mut session = session(OutputFormat::Json);
        let out = run_script(&mut session, "water 1 1\njson\n");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#"{"outcome":"watered","value":true}"#);
        let state: serde_json::Value = serde_json::from_str(lines[2]).expect("json state");
        assert_eq!(state["garden"]["cells"][6]["soil_moisture"], 100);
        assert_eq!(state["environment"]["season"], "spring");
    }

    #[test]
    fn test_echo_commands() {
        let mut session = session(OutputFormat::Text);
        session.config.echo_commands = true;
        let out = run_script(&mut session, "help\n");
        assert!(out.contains("> help"));
        assert!(out.contains("plant X Y SPECIES"));
    }
}

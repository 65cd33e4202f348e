//! lineup-cli: command-line shell around `lineup-core`.
//!
//! # Commands
//!
//! - `generate`: solve a batch of N lineups under exposure control
//!   (pass `--report` to also print the post-hoc exposure-diff table)
//! - `validate`: check a problem file without solving
//! - `schema`: print example JSON for the request format

mod io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lineup_core::batch::generate_portfolio;
use lineup_core::constraints::LineupConstraints;
use lineup_core::exposure::ExposureController;
use lineup_core::models::{ExposureBound, ExposureMode, GroupConstraint, OptimizerSettings, Player, Roster, RuleSet};
use lineup_core::optimizer::Optimizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self as stdio, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lineup-cli")]
#[command(version = "0.1.0")]
#[command(about = "Generate fantasy-sports lineup portfolios with exposure control", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of lineups.
    Generate {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long)]
        stdin: bool,
        /// Optional CSV of `name,min,max` exposure bounds, layered on top of
        /// any bounds already present in the input file.
        #[arg(long)]
        exposure_csv: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
        /// Print the exposure report table to stderr after generating.
        #[arg(long)]
        report: bool,
    },

    /// Validate a problem file without solving.
    Validate {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long)]
        stdin: bool,
    },

    /// Print example request JSON.
    Schema,
}

/// One document in: the pool, the rules, the per-call settings, the
/// lineup-level lock/ban/group constraints, the portfolio exposure bounds,
/// and how many lineups to generate.
#[derive(Debug, Deserialize)]
struct BatchRequest {
    pool: Vec<Player>,
    rule_set: RuleSet,
    #[serde(default)]
    settings: OptimizerSettings,
    #[serde(default)]
    constraints: ConstraintsInput,
    #[serde(default)]
    exposure_bounds: Vec<ExposureBound>,
    count: u32,
    #[serde(default)]
    mode: ExposureMode,
    #[serde(default)]
    seed: u64,
}

#[derive(Debug, Default, Deserialize)]
struct ConstraintsInput {
    #[serde(default)]
    locked_names: Vec<String>,
    #[serde(default)]
    banned_names: Vec<String>,
    #[serde(default)]
    locked_solver_ids: Vec<String>,
    #[serde(default)]
    banned_solver_ids: Vec<String>,
    #[serde(default)]
    groups: Vec<GroupConstraint>,
}

impl ConstraintsInput {
    fn build(self) -> LineupConstraints {
        let mut c = LineupConstraints::new();
        for name in self.locked_names {
            c.lock_name(name);
        }
        for name in self.banned_names {
            c.ban_name(name);
        }
        for id in self.locked_solver_ids {
            c.lock_position(id);
        }
        for id in self.banned_solver_ids {
            c.ban_position(id);
        }
        for group in self.groups {
            c.add_group(group);
        }
        c
    }
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    entries: Vec<lineup_core::batch::PortfolioEntry>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            stdin,
            exposure_csv,
            output,
            pretty,
            report,
        } => cmd_generate(input, stdin, exposure_csv, output, pretty, report),
        Commands::Validate { input, stdin } => cmd_validate(input, stdin),
        Commands::Schema => cmd_schema(),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        stdio::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("failed to read file: {path:?}"))
    } else {
        anyhow::bail!("either provide an input file or use --stdin")
    }
}

fn cmd_generate(
    input: Option<PathBuf>,
    stdin: bool,
    exposure_csv: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    report: bool,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let request: BatchRequest = serde_json::from_str(&json_str).context("failed to parse request JSON")?;

    let mut bounds = request.exposure_bounds;
    if let Some(path) = exposure_csv {
        bounds.extend(io::read_exposure_csv(&path)?);
    }

    let constraints = request.constraints.build();
    let mut exposure = ExposureController::new(bounds, request.count, request.mode, request.seed);

    log::info!("generating {} lineups", request.count);
    let entries = generate_portfolio(
        &request.pool,
        &request.rule_set,
        &request.settings,
        &constraints,
        &mut exposure,
        request.count,
    )
    .map_err(|e| anyhow::anyhow!("optimizer error: {e}"))?;

    if report {
        let rosters: Vec<Roster> = entries
            .iter()
            .filter_map(|e| match e {
                lineup_core::batch::PortfolioEntry::Solved(r) => Some(r.clone()),
                lineup_core::batch::PortfolioEntry::Infeasible => None,
            })
            .collect();
        let table = io::render_report(&rosters, &request.pool, &exposure);
        eprintln!("{table}");
    }

    let response = BatchResponse { entries };
    let output_json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    if let Some(path) = output {
        fs::write(&path, &output_json).with_context(|| format!("failed to write output to {path:?}"))?;
        eprintln!("result written to {path:?}");
    } else {
        println!("{output_json}");
    }

    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let request: BatchRequest = serde_json::from_str(&json_str).context("JSON parse error")?;

    let constraints = request.constraints.build();
    match Optimizer::new(
        &request.pool,
        &request.rule_set,
        &request.settings,
        &constraints,
        &Default::default(),
    ) {
        Ok(_) => {
            println!("{{\"valid\": true}}");
            Ok(())
        }
        Err(e) => {
            println!(
                "{{\"valid\": false, \"error\": \"{}\"}}",
                e.to_string().replace('"', "\\\"")
            );
            Ok(())
        }
    }
}

fn cmd_schema() -> Result<()> {
    println!(
        r#"{{
  "pool": [
    {{
      "name": "Jayson Tatum",
      "solver_id": "tatum-sf",
      "pos": "SF",
      "team": "BOS",
      "opponent": "MIA",
      "cost": 9800,
      "proj": 52.3,
      "po": 0.31
    }}
  ],
  "rule_set": {{ "...": "see RuleSet::dk_nba_classic()" }},
  "settings": {{ "uniques": 1, "stacks": [] }},
  "constraints": {{ "locked_names": [], "banned_names": [], "groups": [] }},
  "exposure_bounds": [ {{ "name": "Jayson Tatum", "min": 0.2, "max": 0.6 }} ],
  "count": 20,
  "mode": "deterministic",
  "seed": 0
}}"#
    );
    Ok(())
}

//! CSV exposure-bounds ingestion and the exposure-report table.
//!
//! Neither belongs in `lineup-core`: the CSV format and table rendering are
//! presentation-layer concerns specific to this command-line shell, not the
//! optimizer itself.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use lineup_core::exposure::ExposureController;
use lineup_core::models::{ExposureBound, Player, Roster};
use lineup_core::LineupError;
use std::collections::HashMap;
use std::path::Path;

/// Reads a `name,min,max` CSV into exposure bounds. `min`/`max` are read as
/// fractions of the batch (e.g. `0.25` for 25%).
pub fn read_exposure_csv(path: &Path) -> Result<Vec<ExposureBound>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open exposure CSV at {path:?}"))?;
    let mut bounds = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV row at line {}", i + 2))?;
        let name = record.get(0).ok_or_else(|| {
            LineupError::MalformedExposureRow {
                line: i + 2,
                detail: "missing name column".into(),
            }
        })?;
        let min: f64 = record
            .get(1)
            .ok_or_else(|| LineupError::MalformedExposureRow {
                line: i + 2,
                detail: "missing min column".into(),
            })?
            .parse()
            .map_err(|_| LineupError::MalformedExposureRow {
                line: i + 2,
                detail: "min is not a number".into(),
            })?;
        let max: f64 = record
            .get(2)
            .ok_or_else(|| LineupError::MalformedExposureRow {
                line: i + 2,
                detail: "missing max column".into(),
            })?
            .parse()
            .map_err(|_| LineupError::MalformedExposureRow {
                line: i + 2,
                detail: "max is not a number".into(),
            })?;

        bounds.push(ExposureBound {
            name: name.to_string(),
            min,
            max,
            proj: None,
        });
    }

    Ok(bounds)
}

/// Builds the exposure report: one row per physical player that appeared at
/// least once, sorted by descending lineup count, with a bound violation
/// highlighted in red.
pub fn render_report(rosters: &[Roster], pool: &[Player], controller: &ExposureController) -> Table {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for roster in rosters {
        for name in roster.names() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let by_name: HashMap<&str, &Player> = pool.iter().map(|p| (p.name.as_str(), p)).collect();
    let bound_by_name: HashMap<&str, (f64, f64)> = controller
        .bounds()
        .iter()
        .map(|b| (b.name.as_str(), (b.min, b.max)))
        .collect();
    let violated_names: std::collections::HashSet<String> = controller
        .check_exposure(rosters)
        .into_iter()
        .map(|v| v.name)
        .collect();

    let mut rows: Vec<(&str, u32)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![
        "Position",
        "Player",
        "Team",
        "Matchup",
        "Salary",
        "Projection",
        "# Lineups",
        "Min",
        "Max",
    ]);

    for (name, count) in rows {
        let player = by_name.get(name);
        let violated = violated_names.contains(name);
        let (min, max) = bound_by_name.get(name).copied().unwrap_or((0.0, 1.0));

        let mut row = vec![
            Cell::new(player.map(|p| p.pos.as_str()).unwrap_or("?")),
            Cell::new(name),
            Cell::new(player.map(|p| p.team.as_str()).unwrap_or("?")),
            Cell::new(
                player
                    .and_then(|p| p.opponent.as_deref())
                    .unwrap_or("?"),
            ),
            Cell::new(player.map(|p| p.cost.to_string()).unwrap_or_default()),
            Cell::new(player.map(|p| format!("{:.1}", p.proj)).unwrap_or_default()),
            Cell::new(count.to_string()),
            Cell::new(format!("{:.0}%", min * 100.0)),
            Cell::new(format!("{:.0}%", max * 100.0)),
        ];
        if violated {
            row = row.into_iter().map(|c| c.fg(Color::Red)).collect();
        }
        table.add_row(row);
    }

    table
}

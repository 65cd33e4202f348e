//! Drives a full portfolio of lineups through the optimizer and the exposure
//! controller together.
//!
//! Generating N lineups is inherently sequential: lineup `k+1`'s uniqueness
//! constraint is built from lineup `k`'s roster, and the exposure
//! controller's lock/ban decisions for iteration `k+1` depend on what has
//! already been recorded through iteration `k`. There is no batching or
//! parallelism to be had here — each call's `Optimizer` is built, solved, and
//! dropped before the next one is constructed.

use crate::constraints::LineupConstraints;
use crate::exposure::ExposureController;
use crate::models::{OptimizerSettings, Player, Roster, RuleSet};
use crate::optimizer::{LineupError, Optimizer, SolveOutcome};

/// One lineup's outcome within a batch: either the roster that was solved,
/// or a note that no feasible lineup existed for that slot.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "roster")]
pub enum PortfolioEntry {
    Solved(Roster),
    Infeasible,
}

/// Generates `count` lineups, feeding each prior roster back in as both a
/// uniqueness constraint and an exposure-controller observation.
///
/// `base_settings.existing_rosters` is extended with every solved roster as
/// the batch progresses; `base_settings.uniques` is left untouched (it is
/// the caller's choice, including `None`, which per the no-op rule still
/// degenerates to `max_repeats = roster_size`).
pub fn generate_portfolio(
    pool: &[Player],
    rule_set: &RuleSet,
    base_settings: &OptimizerSettings,
    constraints: &LineupConstraints,
    exposure: &mut ExposureController,
    count: u32,
) -> Result<Vec<PortfolioEntry>, LineupError> {
    let mut settings = base_settings.clone();
    let mut out = Vec::with_capacity(count as usize);

    for i in 0..count {
        let exposure_dict = exposure.compute_exposure_args(i, constraints);
        let opt = Optimizer::new(pool, rule_set, &settings, constraints, &exposure_dict)?;

        match opt.solve()? {
            SolveOutcome::Optimal(roster) => {
                exposure.record(&roster);
                settings.existing_rosters.push(roster.clone());
                log::info!("lineup {}/{count} solved", i + 1);
                out.push(PortfolioEntry::Solved(roster));
            }
            SolveOutcome::Infeasible => {
                log::warn!("lineup {}/{count} infeasible under current exposure bounds", i + 1);
                out.push(PortfolioEntry::Infeasible);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExposureMode, GameType, PositionLimit, Site};

    fn player(name: &str, id: &str, pos: &str, team: &str, cost: i64, proj: f64) -> Player {
        Player {
            name: name.into(),
            solver_id: id.into(),
            pos: pos.into(),
            real_pos: None,
            nba_general_position: None,
            team: team.into(),
            opponent: None,
            cost,
            proj,
            po: 0.1,
            lock: false,
            ban: false,
            position_lock: false,
            position_ban: false,
        }
    }

    #[test]
    fn generates_distinct_lineups_when_uniques_is_set() {
        let pool = vec![
            player("Alice", "alice-pg", "PG", "BOS", 40, 20.0),
            player("Bob", "bob-pg", "PG", "MIA", 38, 19.0),
            player("Cara", "cara-c", "C", "BOS", 50, 25.0),
            player("Dee", "dee-c", "C", "MIA", 48, 24.0),
        ];
        let rule_set = RuleSet {
            site: Site::DraftKings,
            game_type: GameType::Classic,
            salary_min: 0,
            salary_max: 200,
            roster_size: 2,
            position_limits: vec![
                PositionLimit { position: "PG".into(), min: 1, max: 1 },
                PositionLimit { position: "C".into(), min: 1, max: 1 },
            ],
            general_position_limits: vec![],
            offensive_positions: Default::default(),
            defensive_positions: Default::default(),
            max_players_per_team: None,
            min_players_per_team: None,
        };
        let settings = OptimizerSettings {
            uniques: Some(1),
            ..Default::default()
        };
        let mut exposure = ExposureController::new(vec![], 2, ExposureMode::Deterministic, 0);

        let entries = generate_portfolio(
            &pool,
            &rule_set,
            &settings,
            &LineupConstraints::new(),
            &mut exposure,
            2,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        let rosters: Vec<&Roster> = entries
            .iter()
            .filter_map(|e| match e {
                PortfolioEntry::Solved(r) => Some(r),
                PortfolioEntry::Infeasible => None,
            })
            .collect();
        assert_eq!(rosters.len(), 2);
        assert_ne!(rosters[0].names(), rosters[1].names());
    }
}

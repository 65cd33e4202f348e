//! The constraint-programmed lineup optimizer.
//!
//! `Optimizer` builds and solves exactly one mixed-integer linear program per
//! call: one binary variable per player-pool row, maximizing total projected
//! points subject to salary, roster-size, position, team, and uniqueness
//! constraints. It is stateless across calls — every `Optimizer` instance is
//! built fresh for a single `solve()` and owns nothing beyond that call's own
//! variables and constraints, with no shared mutable state between calls.
//!
//! The concrete backend is `good_lp` with the `highs` solver, the modern
//! open-source MIP solver this workspace's sibling `abacus`-style crates use.

mod construction;
mod ilp;
mod validation;

use crate::models::{GameType, OptimizerSettings, Player, Roster, RuleSet};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that prevent a solve from even being attempted. These are
/// configuration/shape errors, not ordinary infeasibility (see
/// `SolveOutcome::Infeasible`, which is not an error).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    /// A row ended up with `lb > ub` after merging constraints/exposure.
    #[error("invalid bounds for row {solver_id}: lb={lb} > ub={ub}")]
    InvalidBounds {
        solver_id: String,
        lb: u8,
        ub: u8,
    },
    /// A physical player is both locked and banned after merging all
    /// sources (lineup constraints, exposure dict, player flags).
    #[error("player {name} is both locked and banned")]
    PlayerBanAndLock { name: String },
    /// Two rows in the pool share a `solver_id`.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    /// A group constraint or stack names a player/team not present in the pool.
    #[error("unknown {kind}: {id}")]
    UnknownReference { kind: &'static str, id: String },
    /// A row in an exposure-bounds CSV was missing a required column.
    #[error("malformed exposure row at line {line}: {detail}")]
    MalformedExposureRow { line: usize, detail: String },
}

/// The result of one `solve()` call.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// The solver found an optimal lineup.
    Optimal(Roster),
    /// No feasible lineup exists under the given constraints. Not an error:
    /// the caller may relax constraints and retry.
    Infeasible,
}

/// Per-row decision bounds computed once from lineup constraints, the
/// exposure dict, and the player's own flags. Kept separate from `Player`
/// itself so the pool stays immutable and reusable across optimizer
/// instances.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowBounds {
    pub lb: u8,
    pub ub: u8,
}

/// Preprocessed index maps, built once per `Optimizer::new` call and reused
/// by every constraint family during `solve()`.
pub(crate) struct RowIndex {
    /// Physical-player name -> every row index sharing that name.
    pub by_name: HashMap<String, Vec<usize>>,
    /// For classic/showdown: `<base>` prefix -> every row index sharing it.
    /// For single/flex3: absent (each row is already globally unique by
    /// `solver_id`, see `by_solver_id`).
    pub by_base: HashMap<String, Vec<usize>>,
    /// For single/flex3: `solver_id` -> the single row index it names.
    pub by_solver_id: HashMap<String, usize>,
}

/// Builds and solves one ILP over a player pool under a rule set.
///
/// An `Optimizer` is constructed fresh for every call with that call's
/// settings, constraints, and exposure dict; it is never reused across
/// calls (see the module doc comment).
pub struct Optimizer<'a> {
    pool: &'a [Player],
    rule_set: &'a RuleSet,
    settings: &'a OptimizerSettings,
    group_constraints: &'a [crate::models::GroupConstraint],
    row_bounds: Vec<RowBounds>,
    locked_names: std::collections::HashSet<String>,
    index: RowIndex,
}

impl<'a> Optimizer<'a> {
    /// Validates the pool against the rule set, resolves lock/ban flags from
    /// every source (lineup constraints, exposure dict, player flags), and
    /// builds the index maps constraint construction needs.
    ///
    /// Returns `Err` on `InvalidBounds` or `PlayerBanAndLock` — both are
    /// fatal for this call.
    pub fn new(
        pool: &'a [Player],
        rule_set: &'a RuleSet,
        settings: &'a OptimizerSettings,
        constraints: &crate::constraints::LineupConstraints,
        exposure: &crate::models::ExposureDict,
    ) -> Result<Self, LineupError> {
        Self::validate_pool(pool, rule_set, settings)?;
        let index = Self::build_index(pool, rule_set.game_type);
        let (row_bounds, locked_names) = Self::resolve_row_bounds(pool, constraints, exposure)?;

        log::debug!(
            "optimizer built: {} rows, {} distinct names",
            pool.len(),
            index.by_name.len()
        );

        Ok(Optimizer {
            pool,
            rule_set,
            settings,
            group_constraints: constraints.groups(),
            row_bounds,
            locked_names,
            index,
        })
    }

    fn uses_role_variants(game_type: GameType) -> bool {
        matches!(game_type, GameType::Single | GameType::Flex3)
    }

    /// Runs the solve. Builds a fresh `good_lp` model every call.
    pub fn solve(&self) -> Result<SolveOutcome, LineupError> {
        self.solve_ilp()
    }
}

//! Index building and per-row bound resolution.
//!
//! This is the "compute a per-solve Decision table instead of mutating
//! Player" half of the optimizer: `resolve_row_bounds` merges every source of
//! lock/ban information — lineup constraints, the exposure dict, and the
//! player's own flags — into one `lb`/`ub` pair per row, once, before any
//! `good_lp` variable is built.

use super::{LineupError, Optimizer, RowBounds, RowIndex};
use crate::constraints::LineupConstraints;
use crate::models::{ExposureDict, GameType, Player};
use std::collections::HashMap;

impl<'a> Optimizer<'a> {
    pub(super) fn build_index(pool: &[Player], game_type: GameType) -> RowIndex {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_base: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_solver_id: HashMap<String, usize> = HashMap::new();

        for (i, p) in pool.iter().enumerate() {
            by_name.entry(p.name.clone()).or_default().push(i);
            by_solver_id.insert(p.solver_id.clone(), i);
            if !Self::uses_role_variants(game_type) {
                by_base
                    .entry(p.base_id().to_string())
                    .or_default()
                    .push(i);
            }
        }

        RowIndex {
            by_name,
            by_base,
            by_solver_id,
        }
    }

    /// Resolves per-row bounds plus the set of physical-player names that are
    /// locked at the *name* level (as opposed to a specific row being locked).
    ///
    /// A name-level lock must not set `lb = 1` on every row sharing that
    /// name: for a multi-position or showdown player with more than one row,
    /// that would conflict with the shared "at most one variant" group
    /// constraint built in `ilp.rs` and make every locked multi-row player
    /// infeasible. Instead a name-level lock is only surfaced here (in
    /// `locked_names`) and `ilp.rs` turns it into a single `sum(rows sharing
    /// that name) >= 1` constraint regardless of how many rows the name has —
    /// including the common single-row case, where that sum constraint is
    /// the only thing that actually enforces the lock. A name-level ban is
    /// safe to fold directly into every row's `ub = 0` (an excluded player is
    /// excluded under every role).
    pub(super) fn resolve_row_bounds(
        pool: &[Player],
        constraints: &LineupConstraints,
        exposure: &ExposureDict,
    ) -> Result<(Vec<RowBounds>, std::collections::HashSet<String>), LineupError> {
        let exposure_locked: std::collections::HashSet<&str> =
            exposure.locked.iter().map(String::as_str).collect();
        let exposure_banned: std::collections::HashSet<&str> =
            exposure.banned.iter().map(String::as_str).collect();

        // Aggregate name-level lock/ban across every row sharing that name:
        // any row carrying the flag marks the whole physical player.
        let mut name_locked: HashMap<&str, bool> = HashMap::new();
        let mut name_banned: HashMap<&str, bool> = HashMap::new();
        for p in pool {
            let locked = p.lock
                || constraints.is_locked(&p.name)
                || exposure_locked.contains(p.name.as_str());
            let banned = p.ban
                || constraints.is_banned(&p.name)
                || exposure_banned.contains(p.name.as_str());
            *name_locked.entry(p.name.as_str()).or_insert(false) |= locked;
            *name_banned.entry(p.name.as_str()).or_insert(false) |= banned;
        }

        for p in pool {
            if name_locked[p.name.as_str()] && name_banned[p.name.as_str()] {
                return Err(LineupError::PlayerBanAndLock {
                    name: p.name.clone(),
                });
            }
        }

        let mut bounds = Vec::with_capacity(pool.len());
        let mut locked_names = std::collections::HashSet::new();
        for p in pool {
            let row_locked = p.position_lock || constraints.is_position_locked(&p.solver_id);
            let row_banned = p.position_ban
                || constraints.is_position_banned(&p.solver_id)
                || name_banned[p.name.as_str()];

            if row_locked && row_banned {
                return Err(LineupError::PlayerBanAndLock {
                    name: p.name.clone(),
                });
            }

            if name_locked[p.name.as_str()] {
                locked_names.insert(p.name.clone());
            }

            let lb: u8 = if row_locked { 1 } else { 0 };
            let ub: u8 = if row_banned { 0 } else { 1 };

            if lb > ub {
                return Err(LineupError::InvalidBounds {
                    solver_id: p.solver_id.clone(),
                    lb,
                    ub,
                });
            }

            bounds.push(RowBounds { lb, ub });
        }

        Ok((bounds, locked_names))
    }
}

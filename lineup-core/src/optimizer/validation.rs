//! Shape validation for a pool/rule-set/settings combination before a solve
//! is attempted: duplicate row ids and dangling stack/group references are
//! caught here rather than surfacing as a silent infeasible result.

use super::{LineupError, Optimizer};
use crate::models::{OptimizerSettings, Player, RuleSet};
use std::collections::HashSet;

impl<'a> Optimizer<'a> {
    /// Checks that every `solver_id` in `pool` is unique and that every team
    /// named by a stack in `settings` actually appears in the pool. Called by
    /// `Optimizer::new` before any bounds are resolved.
    pub(super) fn validate_pool(
        pool: &[Player],
        _rule_set: &RuleSet,
        settings: &OptimizerSettings,
    ) -> Result<(), LineupError> {
        let mut seen_ids = HashSet::with_capacity(pool.len());
        for p in pool {
            if !seen_ids.insert(p.solver_id.as_str()) {
                return Err(LineupError::DuplicateId {
                    kind: "solver_id",
                    id: p.solver_id.clone(),
                });
            }
        }

        let teams: HashSet<&str> = pool.iter().map(|p| p.team.as_str()).collect();
        for stack in &settings.stacks {
            if !teams.contains(stack.team.as_str()) {
                return Err(LineupError::UnknownReference {
                    kind: "team",
                    id: stack.team.clone(),
                });
            }
        }

        Ok(())
    }
}

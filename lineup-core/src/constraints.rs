//! Lineup-level locks, bans, and group constraints.
//!
//! `LineupConstraints` is an opaque provider the optimizer queries by name
//! (individual locks/bans) or by `solver_id` (position locks/bans); it also
//! iterates group constraints. Keeping this separate from `Player` lets the
//! same immutable player pool be reused across many optimizer calls with
//! different constraint sets.

use crate::models::GroupConstraint;
use std::collections::HashSet;

/// Individual locks/bans by physical-player name, position locks/bans by
/// row `solver_id`, and group-cardinality constraints.
#[derive(Debug, Clone, Default)]
pub struct LineupConstraints {
    locked_names: HashSet<String>,
    banned_names: HashSet<String>,
    locked_solver_ids: HashSet<String>,
    banned_solver_ids: HashSet<String>,
    groups: Vec<GroupConstraint>,
}

impl LineupConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.locked_names.insert(name.into());
        self
    }

    pub fn ban_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.banned_names.insert(name.into());
        self
    }

    pub fn lock_position(&mut self, solver_id: impl Into<String>) -> &mut Self {
        self.locked_solver_ids.insert(solver_id.into());
        self
    }

    pub fn ban_position(&mut self, solver_id: impl Into<String>) -> &mut Self {
        self.banned_solver_ids.insert(solver_id.into());
        self
    }

    pub fn add_group(&mut self, group: GroupConstraint) -> &mut Self {
        self.groups.push(group);
        self
    }

    pub fn is_locked(&self, name: &str) -> bool {
        self.locked_names.contains(name)
    }

    pub fn is_banned(&self, name: &str) -> bool {
        self.banned_names.contains(name)
    }

    pub fn is_position_locked(&self, solver_id: &str) -> bool {
        self.locked_solver_ids.contains(solver_id)
    }

    pub fn is_position_banned(&self, solver_id: &str) -> bool {
        self.banned_solver_ids.contains(solver_id)
    }

    pub fn groups(&self) -> &[GroupConstraint] {
        &self.groups
    }
}

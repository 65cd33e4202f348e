//! Builds and solves the mixed-integer linear program for one `solve()` call.
//!
//! One binary `good_lp` variable per player-pool row; the objective is total
//! projected points. Every constraint family below is expressed directly as
//! `good_lp` `Expression`/`constraint!` builders against the `highs` backend.

use super::{LineupError, Optimizer, SolveOutcome};
use crate::models::{GameType, Roster};
use good_lp::{constraint, variables, Expression, Solution, SolverModel, Variable, VariableDefinition};
use std::collections::HashMap;

impl<'a> Optimizer<'a> {
    pub(super) fn solve_ilp(&self) -> Result<SolveOutcome, LineupError> {
        let mut vars = variables!();
        let rows: Vec<Variable> = self
            .pool
            .iter()
            .map(|_| vars.add(VariableDefinition::new().binary()))
            .collect();

        let objective: Expression = self
            .pool
            .iter()
            .zip(&rows)
            .map(|(p, v)| p.proj * *v)
            .sum();

        let mut model = vars
            .maximise(objective)
            .using(good_lp::solvers::highs::highs);

        // Row-level lock/ban bounds, resolved once in `resolve_row_bounds`.
        for (i, b) in self.row_bounds.iter().enumerate() {
            let term: Expression = 1.0 * rows[i];
            if b.lb > 0 {
                model = model.with(constraint!(term.clone() >= b.lb as f64));
            }
            if b.ub < 1 {
                model = model.with(constraint!(term <= b.ub as f64));
            }
        }

        // Salary range.
        let salary: Expression = self
            .pool
            .iter()
            .zip(&rows)
            .map(|(p, v)| p.cost as f64 * *v)
            .sum();
        model = model.with(constraint!(salary.clone() >= self.rule_set.salary_min as f64));
        model = model.with(constraint!(salary <= self.rule_set.salary_max as f64));

        // Roster size, exact.
        let size: Expression = rows.iter().map(|v| 1.0 * *v).sum();
        model = model.with(constraint!(size == self.rule_set.roster_size as f64));

        // Position limits.
        for limit in &self.rule_set.position_limits {
            let expr: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| p.pos == limit.position)
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(expr.clone() >= limit.min as f64));
            model = model.with(constraint!(expr <= limit.max as f64));
        }

        // General (NBA G/F/C family) position limits.
        for limit in &self.rule_set.general_position_limits {
            let expr: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| p.nba_general_position.as_deref() == Some(limit.position.as_str()))
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(expr.clone() >= limit.min as f64));
            model = model.with(constraint!(expr <= limit.max as f64));
        }

        // Name-level locks: at least one row of this physical player must be
        // chosen. This group bound is what actually enforces the lock for
        // every locked name, single-row or multi-row alike: a single-row
        // player's own `RowBounds::lb` is deliberately left at 0 in
        // `resolve_row_bounds` (forcing it there too would be redundant, not
        // wrong, but a locked multi-row player's individual rows must stay
        // free so this sum constraint is the only thing doing the forcing).
        for name in &self.locked_names {
            if let Some(indices) = self.index.by_name.get(name) {
                let expr: Expression = indices.iter().map(|&i| 1.0 * rows[i]).sum();
                model = model.with(constraint!(expr >= 1.0));
            }
        }

        // Never select two rows of the same physical player (classic/showdown
        // multi-position rows). No-op for single/flex3, where `by_base` is
        // empty because every row is already a distinct physical player.
        for group in self.index.by_base.values() {
            if group.len() > 1 {
                let expr: Expression = group.iter().map(|&i| 1.0 * rows[i]).sum();
                model = model.with(constraint!(expr <= 1.0));
            }
        }

        // No-duplicate-player, single/flex3: a physical player may appear as
        // several role-variant rows sharing one `name`, but at most one of
        // those variants may be chosen per lineup. Classic/showdown already
        // gets this from the `by_base` grouping above; this only fires for
        // formats that key role variants by `name` instead of a shared
        // `<base>` solver id, where `by_base` is empty by construction.
        if Self::uses_role_variants(self.rule_set.game_type) {
            for indices in self.index.by_name.values() {
                if indices.len() > 1 {
                    let expr: Expression = indices.iter().map(|&i| 1.0 * rows[i]).sum();
                    model = model.with(constraint!(expr <= 1.0));
                }
            }
        }

        // Team stacks: exactly `count` rows from `team`.
        for stack in &self.settings.stacks {
            let expr: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| p.team == stack.team)
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(expr == stack.count as f64));
        }

        // Per-team player caps, skipped entirely for flexy-five: that format
        // has no notion of a per-team ceiling or floor. A blank team string
        // (no real team) never counts as a team of its own.
        if !matches!(self.rule_set.game_type, GameType::FlexyFive) {
            let mut by_team: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, p) in self.pool.iter().enumerate() {
                if p.team.is_empty() {
                    continue;
                }
                by_team.entry(p.team.as_str()).or_default().push(i);
            }
            for indices in by_team.values() {
                if let Some(max) = self.rule_set.max_players_per_team {
                    let expr: Expression = indices.iter().map(|&i| 1.0 * rows[i]).sum();
                    model = model.with(constraint!(expr <= max as f64));
                }
                if let Some(min) = self.rule_set.min_players_per_team {
                    let expr: Expression = indices.iter().map(|&i| 1.0 * rows[i]).sum();
                    model = model.with(constraint!(expr >= min as f64));
                }
            }
        }

        // No offense against a selected defense (and vice versa): a defensive
        // row and any opposing offensive row cannot both be selected.
        if self.settings.no_offense_against_defense {
            for (di, d) in self.pool.iter().enumerate() {
                if !self.rule_set.defensive_positions.contains(&d.pos) {
                    continue;
                }
                for (oi, o) in self.pool.iter().enumerate() {
                    if self.rule_set.offensive_positions.contains(&o.pos) && d.is_opposing_team(&o.team)
                    {
                        let pair: Expression = 1.0 * rows[di] + 1.0 * rows[oi];
                        model = model.with(constraint!(pair <= 1.0));
                    }
                }
            }
        }

        // No defense against the opposing captain (showdown).
        if self.settings.no_defense_against_captain {
            for (ci, c) in self.pool.iter().enumerate() {
                if c.pos != "CPT" && c.pos != "MVP" {
                    continue;
                }
                for (di, d) in self.pool.iter().enumerate() {
                    let is_defense = d
                        .real_pos
                        .as_deref()
                        .map(|rp| self.rule_set.defensive_positions.contains(rp))
                        .unwrap_or(false);
                    if is_defense && d.is_opposing_team(&c.team) {
                        let pair: Expression = 1.0 * rows[ci] + 1.0 * rows[di];
                        model = model.with(constraint!(pair <= 1.0));
                    }
                }
            }
        }

        // Minimum distinct teams represented, via one auxiliary binary per
        // team linked to whether any of that team's rows are selected.
        // Skipped for flexy-five, same as the per-team cap above. A blank
        // team string never counts toward `min_teams`.
        if self.settings.min_teams > 0 && !matches!(self.rule_set.game_type, GameType::FlexyFive) {
            let mut by_team: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, p) in self.pool.iter().enumerate() {
                if p.team.is_empty() {
                    continue;
                }
                by_team.entry(p.team.as_str()).or_default().push(i);
            }
            let roster_size = self.rule_set.roster_size as f64;
            let mut indicators = Vec::with_capacity(by_team.len());
            for indices in by_team.values() {
                let y = vars.add(VariableDefinition::new().binary());
                let sum: Expression = indices.iter().map(|&i| 1.0 * rows[i]).sum();
                model = model.with(constraint!(sum.clone() >= 1.0 * y));
                model = model.with(constraint!(sum <= roster_size * y));
                indicators.push(y);
            }
            let teams_used: Expression = indicators.iter().map(|&y| 1.0 * y).sum();
            model = model.with(constraint!(teams_used >= self.settings.min_teams as f64));
        }

        // Combo requirement (e.g. QB cannot be rostered without a pass
        // catcher from the same team). `combo_allow_te` widens the
        // pass-catcher set to include tight ends.
        if self.settings.force_combo {
            for (qi, q) in self.pool.iter().enumerate() {
                if q.pos != "QB" {
                    continue;
                }
                let catcher_positions: &[&str] = if self.settings.combo_allow_te {
                    &["WR", "TE"]
                } else {
                    &["WR"]
                };
                let catchers: Expression = self
                    .pool
                    .iter()
                    .zip(&rows)
                    .filter(|(p, _)| p.team == q.team && catcher_positions.contains(&p.pos.as_str()))
                    .map(|(_, v)| 1.0 * *v)
                    .sum();
                let qb_term = 1.0 * rows[qi];
                model = model.with(constraint!(qb_term - catchers <= 0.0));
            }
        }

        // Uniqueness against every prior roster in this batch. When
        // `uniques` is unset, `max_repeats` degenerates to the full roster
        // size — a deliberate no-op, not a special-cased skip.
        let max_repeats = match self.settings.uniques {
            Some(u) => self.rule_set.roster_size.saturating_sub(u),
            None => self.rule_set.roster_size,
        } as f64;
        for prior in &self.settings.existing_rosters {
            let names = prior.names();
            let shared: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| names.contains(p.name.as_str()))
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(shared <= max_repeats));
        }

        // Per-ownership-tier floors: among rows below a projected-ownership
        // ceiling, require at least `player_count` of them.
        for tier in &self.settings.lineup_settings {
            let expr: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| p.po < tier.po_upper_bound)
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(expr >= tier.player_count as f64));
        }

        // Group constraints from the lineup-constraints provider.
        for group in self.group_constraints {
            let (lb, ub) = group.bounds();
            let expr: Expression = self
                .pool
                .iter()
                .zip(&rows)
                .filter(|(p, _)| group.players.contains(&p.name))
                .map(|(_, v)| 1.0 * *v)
                .sum();
            model = model.with(constraint!(expr.clone() >= lb as f64));
            model = model.with(constraint!(expr <= ub as f64));
        }

        match model.solve() {
            Ok(solution) => {
                let chosen: Vec<_> = self
                    .pool
                    .iter()
                    .zip(&rows)
                    .filter(|(_, v)| solution.value(**v) >= 0.95)
                    .map(|(p, _)| p.clone())
                    .collect();
                log::info!("solved lineup: {} players, {:.2} pts", chosen.len(), {
                    let total: f64 = chosen.iter().map(|p| p.proj).sum();
                    total
                });
                Ok(SolveOutcome::Optimal(Roster::new(chosen)))
            }
            Err(e) => {
                log::info!("solve did not find a feasible lineup: {e}");
                Ok(SolveOutcome::Infeasible)
            }
        }
    }
}

//! Portfolio-level exposure control.
//!
//! `ExposureController` tracks how many times each physical player has
//! appeared across a batch of lineups and, before each subsequent
//! `Optimizer::solve` call, produces the `{banned, locked}` pair that keeps
//! the batch converging toward every bound's `[min, max]` share of the
//! portfolio. Two modes are supported: `Deterministic`, which forces a
//! player's lock while its floor share is unmet and bans it once its
//! ceiling share is reached, breaking ties by least-exposed-first then
//! highest-projection-first; and `Random`, a single seeded coin flip per
//! bound against its ceiling that locks but never bans.

use crate::models::{ExposureBound, ExposureDict, ExposureMode, Roster};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Tracks per-player appearance counts across a batch and derives the next
/// call's `ExposureDict`.
pub struct ExposureController {
    bounds: Vec<ExposureBound>,
    total_lineups: u32,
    mode: ExposureMode,
    tallies: HashMap<String, u32>,
    rng: Option<ChaCha8Rng>,
}

impl ExposureController {
    /// `total_lineups` is the size of the batch being generated; bounds are
    /// interpreted as fractions of that total. `seed` is only consulted in
    /// `ExposureMode::Random`.
    pub fn new(bounds: Vec<ExposureBound>, total_lineups: u32, mode: ExposureMode, seed: u64) -> Self {
        let rng = match mode {
            ExposureMode::Random => Some(ChaCha8Rng::seed_from_u64(seed)),
            ExposureMode::Deterministic => None,
        };
        ExposureController {
            bounds,
            total_lineups,
            mode,
            tallies: HashMap::new(),
            rng,
        }
    }

    /// Records the names on `roster` as one more appearance each. Call this
    /// after every successful solve, before the next `compute_exposure_args`.
    pub fn record(&mut self, roster: &Roster) {
        for name in roster.names() {
            *self.tallies.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    /// The configured bounds, in input order. Used by report renderers that
    /// need every player's target `[min, max]`, not just the ones currently
    /// out of range (see `check_exposure`).
    pub fn bounds(&self) -> &[ExposureBound] {
        &self.bounds
    }

    /// Computes the `ExposureDict` to hand to the optimizer for the lineup at
    /// `iteration` (0-based) of the batch. `constraints` is the same
    /// lineup-level lock/ban provider that will be handed to `Optimizer::new`
    /// alongside the returned dict: a bound is never locked against an
    /// explicit user ban, and never banned against an explicit user lock,
    /// since either combination would only surface later as
    /// `LineupError::PlayerBanAndLock`.
    ///
    /// Deterministic mode locks any bound whose current share is still below
    /// its floor and bans any bound whose current share has already reached
    /// its ceiling. Random mode is a single seeded coin flip per bound
    /// against its ceiling, independent of the running tally, and never
    /// bans.
    pub fn compute_exposure_args(
        &mut self,
        iteration: u32,
        constraints: &crate::constraints::LineupConstraints,
    ) -> ExposureDict {
        match self.mode {
            ExposureMode::Deterministic => self.compute_deterministic(iteration, constraints),
            ExposureMode::Random => self.compute_random(),
        }
    }

    fn compute_deterministic(
        &self,
        _iteration: u32,
        constraints: &crate::constraints::LineupConstraints,
    ) -> ExposureDict {
        let n = self.total_lineups as f64;
        let mut locked = Vec::new();
        let mut banned = Vec::new();

        // Process least-exposed first, tie-breaking by descending
        // projection: pulling underexposed players toward their floor takes
        // priority over capping ceilings, and the tie-break sends the
        // limited locking budget to the higher-value player first
        // (spec.md §4.2).
        let mut ordered: Vec<&ExposureBound> = self.bounds.iter().collect();
        ordered.sort_by(|a, b| {
            let seen_a = *self.tallies.get(&a.name).unwrap_or(&0);
            let seen_b = *self.tallies.get(&b.name).unwrap_or(&0);
            seen_a
                .cmp(&seen_b)
                .then_with(|| {
                    b.proj
                        .partial_cmp(&a.proj)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.name.cmp(&b.name))
        });

        for bound in ordered {
            let seen = *self.tallies.get(&bound.name).unwrap_or(&0) as f64;
            let min_lines = bound.min * n;
            let max_lines = (bound.max * n).floor().max(1.0);

            if seen < min_lines
                && !constraints.is_banned(&bound.name)
                && !locked.contains(&bound.name)
            {
                locked.push(bound.name.clone());
            } else if seen >= max_lines && !constraints.is_locked(&bound.name) {
                banned.push(bound.name.clone());
            }
        }

        ExposureDict { banned, locked }
    }

    /// One seeded coin flip per bound: `locked` iff the draw falls at or
    /// below `bound.max`. No bans are ever issued in this mode.
    fn compute_random(&mut self) -> ExposureDict {
        let mut locked = Vec::new();
        let rng = self.rng.as_mut().expect("random mode always carries an rng");
        for bound in &self.bounds {
            let roll: f64 = rng.random();
            if roll <= bound.max {
                locked.push(bound.name.clone());
            }
        }
        ExposureDict {
            banned: Vec::new(),
            locked,
        }
    }

    /// Post-hoc diff between the actual per-player counts across `rosters`
    /// and each bound's `[min, max]` share of `rosters.len()`. Returns one
    /// entry per bound that ended up outside its target range.
    pub fn check_exposure(&self, rosters: &[Roster]) -> Vec<ExposureViolation> {
        let total = rosters.len() as f64;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for roster in rosters {
            for name in roster.names() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }

        self.bounds
            .iter()
            .filter_map(|bound| {
                let count = *counts.get(bound.name.as_str()).unwrap_or(&0);
                let actual = count as f64 / total.max(1.0);
                if actual < bound.min || actual > bound.max {
                    Some(ExposureViolation {
                        name: bound.name.clone(),
                        count,
                        actual,
                        min: bound.min,
                        max: bound.max,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// One bound whose realized exposure fell outside `[min, max]` once the
/// whole batch was generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureViolation {
    pub name: String,
    pub count: u32,
    pub actual: f64,
    pub min: f64,
    pub max: f64,
}

//! Data models for the lineup optimizer API.
//!
//! This module contains the public data structures used to describe a
//! contest's rules, the pool of selectable players, the knobs that shape an
//! individual optimizer call, and the portfolio-level exposure targets that
//! span many calls. The types are fully serde-backed so a caller can load
//! them straight from JSON (see `lineup-cli`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single selectable row in the player pool.
///
/// A physical player may be represented by more than one `Player` row: once
/// per position he is eligible for in classic/showdown contests, or once per
/// role variant in single-game/flex3 contests. `solver_id` is the thing that
/// uniquely identifies a *row*; `name` identifies the *physical player* and
/// is intentionally not unique across rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    /// Player's display name. Not unique across rows for a multi-position
    /// or multi-role player.
    pub name: String,
    /// Uniquely identifies this row. For classic contests this is
    /// `"<base>-<suffix>"` where `<base>` is shared by every row of the same
    /// physical player; for single/flex3 contests it is globally unique.
    pub solver_id: String,
    /// Position this specific row occupies (PG, WR, MVP, STAR, PRO, UTIL, ...).
    pub pos: String,
    /// For showdown rows, the underlying physical position (used by
    /// no-defense-against-captain). `None` for formats without role variants.
    #[serde(default)]
    pub real_pos: Option<String>,
    /// NBA general-position family (G/F/C), used by `general_position_limits`.
    #[serde(default)]
    pub nba_general_position: Option<String>,
    pub team: String,
    /// The opposing team in this player's matchup, if known.
    #[serde(default)]
    pub opponent: Option<String>,
    /// Integer salary cost against the cap.
    pub cost: i64,
    /// Projected points; the objective coefficient.
    pub proj: f64,
    /// Projected ownership in `[0, 1]`.
    #[serde(default)]
    pub po: f64,

    /// Hard-locked by the caller regardless of constraints/exposure.
    #[serde(default)]
    pub lock: bool,
    /// Hard-banned by the caller regardless of constraints/exposure.
    #[serde(default)]
    pub ban: bool,
    /// This exact row (not the physical player) is locked in.
    #[serde(default)]
    pub position_lock: bool,
    /// This exact row (not the physical player) is banned.
    #[serde(default)]
    pub position_ban: bool,
}

impl Player {
    /// The `<base>` prefix of a classic/showdown `solver_id`, i.e. everything
    /// before the first `-`. For single/flex3 rows this is the whole id.
    pub fn base_id(&self) -> &str {
        self.solver_id.split('-').next().unwrap_or(&self.solver_id)
    }

    /// Whether `team` is the opponent of this player in his matchup.
    pub fn is_opposing_team(&self, team: &str) -> bool {
        self.opponent.as_deref() == Some(team)
    }
}

/// An ordered set of players that together satisfy a solved lineup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(mut players: Vec<Player>) -> Self {
        players.sort_by(|a, b| a.pos.cmp(&b.pos).then(a.name.cmp(&b.name)));
        Roster { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// True if any row in this roster has the given physical-player name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn total_salary(&self) -> i64 {
        self.players.iter().map(|p| p.cost).sum()
    }

    pub fn total_projection(&self) -> f64 {
        self.players.iter().map(|p| p.proj).sum()
    }

    /// Distinct physical-player names on this roster.
    pub fn names(&self) -> HashSet<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Site a rule set is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    DraftKings,
    FanDuel,
    Yahoo,
}

/// Contest format, selecting which constraint families apply in `Optimizer::solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Classic,
    Showdown,
    Single,
    Flex3,
    FlexyFive,
}

/// `(position, min, max)` cardinality bound used by both `position_limits`
/// and `general_position_limits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionLimit {
    pub position: String,
    pub min: u32,
    pub max: u32,
}

/// An immutable description of a contest format: salary bounds, roster
/// composition, and the position/team rules the optimizer must respect.
///
/// `max_players_per_team` is owned entirely by the rule set; `Optimizer`
/// never special-cases a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub site: Site,
    pub game_type: GameType,
    pub salary_min: i64,
    pub salary_max: i64,
    pub roster_size: u32,
    pub position_limits: Vec<PositionLimit>,
    pub general_position_limits: Vec<PositionLimit>,
    #[serde(default)]
    pub offensive_positions: HashSet<String>,
    #[serde(default)]
    pub defensive_positions: HashSet<String>,
    /// Maximum number of players the lineup may take from a single team.
    /// `None` skips the cap entirely (used for `GameType::FlexyFive`, which
    /// ignores team caps by design).
    pub max_players_per_team: Option<u32>,
    /// Minimum number of players from a single team (single/flex3 formats
    /// use this to require at least one player per team represented).
    pub min_players_per_team: Option<u32>,
}

impl RuleSet {
    /// Standard DraftKings classic NBA rule set.
    pub fn dk_nba_classic() -> Self {
        RuleSet {
            site: Site::DraftKings,
            game_type: GameType::Classic,
            salary_min: 0,
            salary_max: 50_000,
            roster_size: 8,
            position_limits: vec![
                PositionLimit { position: "PG".into(), min: 1, max: 3 },
                PositionLimit { position: "SG".into(), min: 1, max: 3 },
                PositionLimit { position: "SF".into(), min: 1, max: 3 },
                PositionLimit { position: "PF".into(), min: 1, max: 3 },
                PositionLimit { position: "C".into(), min: 1, max: 2 },
            ],
            general_position_limits: vec![
                PositionLimit { position: "G".into(), min: 3, max: 5 },
                PositionLimit { position: "F".into(), min: 3, max: 5 },
            ],
            offensive_positions: HashSet::new(),
            defensive_positions: HashSet::new(),
            max_players_per_team: Some(7),
            min_players_per_team: None,
        }
    }
}

/// A single team-stacking requirement: exactly `count` players from `team`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stack {
    pub team: String,
    pub count: u32,
}

/// One entry of the per-ownership-tier cap: among rows with
/// `po < po_upper_bound`, at least `player_count` must be chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipTierCap {
    pub player_count: u32,
    pub po_upper_bound: f64,
}

/// Knobs that shape a single `Optimizer::solve` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OptimizerSettings {
    /// Rosters from prior calls in this batch, used for the uniqueness
    /// constraint.
    #[serde(default)]
    pub existing_rosters: Vec<Roster>,
    /// Minimum number of physical players that must differ from each prior
    /// roster. `None` disables the uniqueness constraint entirely (the
    /// `roster_size` cap it degenerates to is a deliberate no-op).
    #[serde(default)]
    pub uniques: Option<u32>,
    #[serde(default)]
    pub stacks: Vec<Stack>,
    #[serde(default)]
    pub force_combo: bool,
    #[serde(default)]
    pub combo_allow_te: bool,
    #[serde(default)]
    pub no_offense_against_defense: bool,
    #[serde(default)]
    pub no_defense_against_captain: bool,
    #[serde(default)]
    pub min_teams: u32,
    #[serde(default)]
    pub lineup_settings: Vec<OwnershipTierCap>,
}

/// `{name, min, max, proj?}`. Describes the target exposure envelope for one
/// physical player across a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureBound {
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// Optional tie-breaker projection used when ordering bounds in
    /// deterministic mode.
    #[serde(default)]
    pub proj: Option<f64>,
}

/// `{players, lb, ub, exact?}`. If `exact` is present it overrides `lb`/`ub`
/// (`lb = ub = exact`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConstraint {
    pub players: HashSet<String>,
    pub lb: u32,
    pub ub: u32,
    #[serde(default)]
    pub exact: Option<u32>,
}

impl GroupConstraint {
    pub fn bounds(&self) -> (u32, u32) {
        match self.exact {
            Some(n) => (n, n),
            None => (self.lb, self.ub),
        }
    }
}

/// The `{banned, locked}` pair the exposure controller hands to the next
/// optimizer call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExposureDict {
    pub banned: Vec<String>,
    pub locked: Vec<String>,
}

/// Mode the exposure controller uses when computing `ExposureDict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureMode {
    #[default]
    Deterministic,
    Random,
}

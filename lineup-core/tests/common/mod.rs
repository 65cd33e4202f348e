//! Shared test utilities for lineup-core integration tests.

use lineup_core::models::{GameType, Player, PositionLimit, RuleSet, Site};

/// Builds a player row with sensible defaults; override fields on the result
/// as needed.
#[allow(dead_code)]
pub fn player(name: &str, solver_id: &str, pos: &str, team: &str, cost: i64, proj: f64) -> Player {
    Player {
        name: name.to_string(),
        solver_id: solver_id.to_string(),
        pos: pos.to_string(),
        real_pos: None,
        nba_general_position: None,
        team: team.to_string(),
        opponent: None,
        cost,
        proj,
        po: 0.15,
        lock: false,
        ban: false,
        position_lock: false,
        position_ban: false,
    }
}

/// A small, deliberately tight NBA classic rule set: two roster slots, one
/// PG and one C, cheap enough that tests can reason about feasibility by
/// hand.
#[allow(dead_code)]
pub fn two_slot_rule_set(salary_max: i64) -> RuleSet {
    RuleSet {
        site: Site::DraftKings,
        game_type: GameType::Classic,
        salary_min: 0,
        salary_max,
        roster_size: 2,
        position_limits: vec![
            PositionLimit {
                position: "PG".into(),
                min: 1,
                max: 1,
            },
            PositionLimit {
                position: "C".into(),
                min: 1,
                max: 1,
            },
        ],
        general_position_limits: vec![],
        offensive_positions: Default::default(),
        defensive_positions: Default::default(),
        max_players_per_team: None,
        min_players_per_team: None,
    }
}

/// The full standard DraftKings NBA classic pool: five positions, two rows
/// per spot, enough variety to exercise position limits and team caps.
#[allow(dead_code)]
pub fn nba_classic_pool() -> Vec<Player> {
    let with_general = |mut p: Player, general: &str| {
        p.nba_general_position = Some(general.to_string());
        p
    };

    vec![
        with_general(player("Jayson Tatum", "tatum-sf", "SF", "BOS", 9800, 52.0), "F"),
        with_general(player("Jaylen Brown", "brown-sg", "SG", "BOS", 8600, 45.0), "G"),
        with_general(player("Kristaps Porzingis", "kp-c", "C", "BOS", 7200, 38.0), "C"),
        with_general(player("Derrick White", "white-pg", "PG", "BOS", 6400, 33.0), "G"),
        with_general(player("Al Horford", "horford-pf", "PF", "BOS", 4200, 22.0), "F"),
        with_general(player("Jimmy Butler", "butler-sf", "SF", "MIA", 8800, 46.0), "F"),
        with_general(player("Bam Adebayo", "bam-c", "C", "MIA", 8200, 44.0), "C"),
        with_general(player("Tyler Herro", "herro-sg", "SG", "MIA", 7400, 38.0), "G"),
        with_general(player("Terry Rozier", "rozier-pg", "PG", "MIA", 6200, 30.0), "G"),
        with_general(player("Caleb Martin", "martin-pf", "PF", "MIA", 3800, 18.0), "F"),
    ]
}

//! Constraint-programmed fantasy-sports lineup optimization.
//!
//! This crate is the pure-logic half of a two-crate workspace: it owns the
//! data model, the mixed-integer lineup optimizer, the cross-lineup exposure
//! controller, and the sequential batch driver that ties them together. It
//! does no file or network I/O and never exits a process — that belongs to
//! `lineup-cli`.
//!
//! ```no_run
//! use lineup_core::{
//!     constraints::LineupConstraints,
//!     exposure::ExposureController,
//!     models::{ExposureMode, OptimizerSettings, RuleSet},
//!     batch::generate_portfolio,
//! };
//!
//! # fn example(pool: Vec<lineup_core::models::Player>) -> Result<(), lineup_core::LineupError> {
//! let rule_set = RuleSet::dk_nba_classic();
//! let settings = OptimizerSettings::default();
//! let constraints = LineupConstraints::new();
//! let mut exposure = ExposureController::new(vec![], 20, ExposureMode::Deterministic, 0);
//!
//! let portfolio = generate_portfolio(&pool, &rule_set, &settings, &constraints, &mut exposure, 20)?;
//! # let _ = portfolio;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod constraints;
pub mod exposure;
pub mod models;
pub mod optimizer;

pub use optimizer::LineupError;

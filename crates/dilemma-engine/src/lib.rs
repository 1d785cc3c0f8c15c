//! Rules of the genome-encoded Prisoner's Dilemma.
//!
//! This crate holds what every simulation run shares and never mutates:
//!
//! - [`PayoffMatrix`] - sentence lengths for each pair of decisions
//! - [`SimulationConfig`] - population, genome, streak and mutation parameters
//! - [`SimulationSeed`] - seed of the single generator a run draws from
//!
//! The genetic algorithm itself lives in `dilemma-evolution`.

pub use self::{
    config::{ConfigError, SimulationConfig},
    payoff::PayoffMatrix,
    seed::{SeedParseError, SimulationSeed},
};

pub mod config;
mod payoff;
mod seed;

/// Sentence substituted for a total sentence of exactly zero before taking
/// its reciprocal.
pub const ZERO_SENTENCE_EPSILON: f64 = 0.000_001;

//! Genetic algorithm evolving Prisoner's Dilemma decision genomes.
//!
//! # How a Run Works
//!
//! 1. **Initialize** - every prisoner gets a random genome of cooperate/betray decisions
//! 2. **Select** - half of the population is eliminated by one of three strategies
//! 3. **Shuffle** - survivors are reordered by their random tie keys
//! 4. **Reproduce** - adjacent survivors produce four mutated offspring each
//! 5. **Repeat** - steps 2-4 for the configured number of generations
//! 6. **Report** - the final population is sorted by fitness and summarized
//!
//! # Fitness
//!
//! Two prisoners facing each other are sentenced position by position using the
//! [`PayoffMatrix`](dilemma_engine::PayoffMatrix). Fitness is the reciprocal of the
//! total sentence plus a bonus for every completed run of consecutive cooperations.
//!
//! # Selection Strategies
//!
//! - [`SelectionStrategy::Tournament`] - adjacent pairs duel, the fitter survives
//! - [`SelectionStrategy::CompareHalf`] - rank by fitness against the opposite-parity half
//! - [`SelectionStrategy::CompareFull`] - rank by fitness against the whole population
//!
//! # Randomness
//!
//! All operators draw from a caller-supplied generator. Seeding it with a
//! [`SimulationSeed`](dilemma_engine::SimulationSeed) makes a whole run reproducible.

pub use self::{
    individual::Individual,
    population::Population,
    simulation::{
        GenerationSummary, MemberReport, SelectionStrategy, Simulation, SimulationReport,
    },
};

pub mod individual;
pub mod population;
pub mod simulation;

#[cfg(test)]
mod test_util {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    /// Parses a genome written as `C`/`D` characters.
    pub(crate) fn genome(code: &str) -> Vec<bool> {
        code.chars()
            .map(|c| match c {
                'C' => true,
                'D' => false,
                _ => panic!("invalid gene '{c}'"),
            })
            .collect()
    }

    pub(crate) fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }
}

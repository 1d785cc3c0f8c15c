//! Generational loop driving a [`Population`] with one selection strategy.

use std::fmt;

use dilemma_engine::{ConfigError, SimulationConfig};
use dilemma_stats::descriptive::DescriptiveStats;
use rand::Rng;
use serde::Serialize;

use crate::{Individual, Population};

/// How survivors are chosen in each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Adjacent pairs duel; the winner survives.
    #[display("Tournament")]
    Tournament,
    /// Members are ranked against the opposite-parity half.
    #[display("Half")]
    CompareHalf,
    /// Members are ranked against the whole population.
    #[display("Whole Population")]
    CompareFull,
}

impl SelectionStrategy {
    pub const ALL: [Self; 3] = [Self::Tournament, Self::CompareHalf, Self::CompareFull];

    /// Runs this strategy's selection step, halving the population.
    pub fn apply(self, population: &mut Population) {
        match self {
            Self::Tournament => population.tournament(),
            Self::CompareHalf => population.compare_half(),
            Self::CompareFull => population.compare_full(),
        }
    }
}

/// Aggregates of the population at one point of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// Number of completed generations (0 for the initial population).
    pub generation: usize,
    pub average_sentence: f64,
    pub cooperation_ratio: f64,
    /// Fitness of the most recently evaluated members: the survivors of the
    /// generation's selection step, or the sorted final population. `None`
    /// for the initial population, which has not been evaluated yet.
    pub fitness: Option<DescriptiveStats>,
}

impl GenerationSummary {
    fn new(generation: usize, population: &Population, fitness: Option<DescriptiveStats>) -> Self {
        Self {
            generation,
            average_sentence: population.average_sentence(),
            cooperation_ratio: population.cooperation_ratio(),
            fitness,
        }
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, C = {}", self.average_sentence, self.cooperation_ratio)
    }
}

/// One line of the final population report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReport {
    pub genome: String,
    pub cooperation_ratio: f64,
    pub fitness: f64,
}

impl From<&Individual> for MemberReport {
    fn from(individual: &Individual) -> Self {
        Self {
            genome: individual.genome_code(),
            cooperation_ratio: individual.cooperation_ratio(),
            fitness: individual.fitness(),
        }
    }
}

/// Everything observed during one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub strategy: SelectionStrategy,
    pub config: SimulationConfig,
    /// Aggregates of the freshly initialized population.
    pub initial: GenerationSummary,
    /// Aggregates after each generation's reproduction.
    pub history: Vec<GenerationSummary>,
    /// Aggregates of the final, fitness-sorted population.
    pub final_summary: GenerationSummary,
    /// Final members, least fit first.
    pub members: Vec<MemberReport>,
}

impl SimulationReport {
    /// The fittest member of the final population.
    #[must_use]
    pub fn best(&self) -> Option<&MemberReport> {
        self.members.last()
    }

    /// The least fit member of the final population.
    #[must_use]
    pub fn worst(&self) -> Option<&MemberReport> {
        self.members.first()
    }
}

/// A configured run of the genetic algorithm.
///
/// # Example
///
/// ```
/// use dilemma_engine::{SimulationConfig, SimulationSeed};
/// use dilemma_evolution::{SelectionStrategy, Simulation};
///
/// let config = SimulationConfig {
///     population_size: 8,
///     genome_length: 10,
///     generation_count: 3,
///     ..SimulationConfig::default()
/// };
/// let simulation = Simulation::new(config, SelectionStrategy::Tournament).unwrap();
/// let seed = SimulationSeed::from_u64(42);
///
/// let (population, report) = simulation.run(&mut seed.rng());
/// assert_eq!(population.len(), 8);
/// assert_eq!(report.history.len(), 3);
///
/// // Same seed, same run.
/// let (_, again) = simulation.run(&mut seed.rng());
/// assert_eq!(report, again);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    strategy: SelectionStrategy,
}

impl Simulation {
    pub fn new(config: SimulationConfig, strategy: SelectionStrategy) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Runs `generation_count` generations from a fresh population.
    ///
    /// Each generation selects with the configured strategy, shuffles the
    /// survivors and replaces them with their offspring. The final population
    /// is sorted by full-population fitness.
    pub fn run<R>(&self, rng: &mut R) -> (Population, SimulationReport)
    where
        R: Rng + ?Sized,
    {
        let strategy = self.strategy;
        let mut population = Population::from_validated(self.config.clone());
        population.initialize(rng);
        let initial = GenerationSummary::new(0, &population, None);
        log::info!("{strategy}: initial population: {initial}");

        let mut history = Vec::with_capacity(self.config.generation_count);
        for generation in 1..=self.config.generation_count {
            strategy.apply(&mut population);
            let survivor_fitness = population.fitness_stats();
            population.shuffle();
            population.reproduce(rng);

            let summary = GenerationSummary::new(generation, &population, survivor_fitness);
            log::debug!("{strategy}: generation #{generation}: {summary}");
            history.push(summary);
        }

        population.sort_by_fitness();
        let final_summary = GenerationSummary::new(
            self.config.generation_count,
            &population,
            population.fitness_stats(),
        );
        log::info!("{strategy}: final population: {final_summary}");

        let report = SimulationReport {
            strategy,
            config: self.config.clone(),
            initial,
            history,
            final_summary,
            members: population.members().iter().map(MemberReport::from).collect(),
        };
        (population, report)
    }
}

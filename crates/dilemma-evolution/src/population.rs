//! The population of prisoners and the generational operators acting on it.
//!
//! One run walks a [`Population`] through
//! `initialize → {select → shuffle → reproduce}* → sort_by_fitness`, where the
//! selection step is one of [`Population::tournament`],
//! [`Population::compare_half`] or [`Population::compare_full`]. Every
//! selection step halves the population and [`Population::reproduce`]
//! restores it, four offspring per pair of survivors.
//!
//! Operators assert their size preconditions: calling them out of order is a
//! programming error and panics.

use std::{fmt::Write as _, mem};

use dilemma_engine::{ConfigError, SimulationConfig};
use dilemma_stats::descriptive::DescriptiveStats;
use rand::Rng;

use crate::Individual;

/// Which members an individual is evaluated against in an aggregate pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opponents {
    /// Members whose index has the other parity.
    OppositeParity,
    /// Every other member.
    All,
}

impl Opponents {
    fn includes(self, me: usize, other: usize) -> bool {
        match self {
            Self::OppositeParity => me % 2 != other % 2,
            Self::All => me != other,
        }
    }
}

/// An owned, ordered collection of prisoners sharing one configuration.
#[derive(Debug, Clone)]
pub struct Population {
    config: SimulationConfig,
    members: Vec<Individual>,
}

impl Population {
    /// Creates an empty (uninitialized) population.
    ///
    /// # Example
    ///
    /// ```
    /// use dilemma_engine::SimulationConfig;
    /// use dilemma_evolution::Population;
    ///
    /// let mut population = Population::new(SimulationConfig::default()).unwrap();
    /// assert!(population.is_empty());
    ///
    /// population.initialize(&mut rand::rng());
    /// assert_eq!(population.len(), 32);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: SimulationConfig) -> Self {
        debug_assert!(config.validate().is_ok());
        Self {
            config,
            members: vec![],
        }
    }

    /// Creates a population from existing individuals.
    ///
    /// # Panics
    ///
    /// Panics if a genome length differs from the configured one.
    pub fn with_members(
        config: SimulationConfig,
        members: Vec<Individual>,
    ) -> Result<Self, ConfigError> {
        let mut population = Self::new(config)?;
        assert!(
            members
                .iter()
                .all(|m| m.genome().len() == population.config.genome_length),
            "genome length must match the configuration"
        );
        population.members = members;
        Ok(population)
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Replaces all members with freshly randomized individuals.
    pub fn initialize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.members = (0..self.config.population_size)
            .map(|_| Individual::random(&self.config, rng))
            .collect();
    }

    /// Pairs members `(2k, 2k + 1)` and keeps the winner of each duel.
    ///
    /// Pairing is positional; shuffle first for random pairings.
    pub fn tournament(&mut self) {
        self.assert_full_size();
        let mut contestants = mem::take(&mut self.members).into_iter();
        let mut winners = Vec::with_capacity(self.config.population_size / 2);
        while let (Some(a), Some(b)) = (contestants.next(), contestants.next()) {
            winners.push(a.compete(b, &self.config));
        }
        self.members = winners;
    }

    /// Scores every member by its duels with the members of opposite index
    /// parity and discards the least fit half.
    ///
    /// A duel contributes the fitness of both prisoners to the score.
    pub fn compare_half(&mut self) {
        self.keep_fittest_half(Opponents::OppositeParity);
    }

    /// Scores every member against the whole rest of the population and
    /// discards the least fit half.
    pub fn compare_full(&mut self) {
        self.keep_fittest_half(Opponents::All);
    }

    fn keep_fittest_half(&mut self, opponents: Opponents) {
        self.assert_full_size();
        self.assign_aggregate_fitness(opponents);
        self.sort_members_by_fitness();
        let half = self.members.len() / 2;
        self.members.drain(..half);
    }

    /// Reorders members by their tie keys, decorrelating pairings from any
    /// fitness ordering.
    pub fn shuffle(&mut self) {
        self.members.sort_by_key(Individual::tie_key);
    }

    /// Replaces the surviving half with the offspring of adjacent pairs.
    ///
    /// # Panics
    ///
    /// Panics unless the population holds exactly half the configured size.
    pub fn reproduce<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        assert_eq!(
            self.members.len() * 2,
            self.config.population_size,
            "reproduction requires the population to be halved by selection first"
        );
        let mut offspring = Vec::with_capacity(self.config.population_size);
        for pair in self.members.chunks_exact(2) {
            offspring.extend(pair[0].reproduce_with(&pair[1], &self.config, rng));
        }
        self.members = offspring;
    }

    /// Recomputes every member's fitness against the whole population and
    /// sorts in ascending order of fitness.
    ///
    /// The stored fitness of every member is overwritten, so reports made
    /// afterwards show this full-population fitness rather than the value
    /// from the last selection step.
    pub fn sort_by_fitness(&mut self) {
        assert!(!self.members.is_empty(), "population is not initialized");
        self.assign_aggregate_fitness(Opponents::All);
        self.sort_members_by_fitness();
    }

    /// Fraction of all genes in the population that cooperate.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cooperation_ratio(&self) -> f64 {
        assert!(!self.members.is_empty(), "population is not initialized");
        let cooperations: usize = self.members.iter().map(Individual::cooperation_count).sum();
        cooperations as f64 / (self.config.genome_length * self.members.len()) as f64
    }

    /// Total sentence member `n` would receive against every other member.
    #[must_use]
    pub fn total_sentence_of(&self, n: usize) -> f64 {
        let me = &self.members[n];
        self.members
            .iter()
            .enumerate()
            .filter(|&(m, _)| m != n)
            .map(|(_, other)| me.sentence(other, &self.config.payoff))
            .sum()
    }

    /// Mean sentence per gene over every ordered pair of distinct members.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_sentence(&self) -> f64 {
        let n = self.members.len();
        assert!(n >= 2, "average sentence needs at least two members");
        let total: f64 = (0..n).map(|i| self.total_sentence_of(i)).sum();
        total / (n * (n - 1) * self.config.genome_length) as f64
    }

    /// Sum of the full-population aggregate fitness of every member.
    ///
    /// Unlike [`Self::sort_by_fitness`], stored fitness values are untouched.
    #[must_use]
    pub fn total_fitness(&self) -> f64 {
        (0..self.members.len())
            .map(|n| self.aggregate_fitness(n, Opponents::All))
            .sum()
    }

    /// Statistics over the members' stored fitness.
    ///
    /// Returns `None` for an empty population.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.members.iter().map(Individual::fitness))
    }

    /// One report line per member.
    #[must_use]
    pub fn report(&self) -> String {
        let mut report = String::new();
        for member in &self.members {
            writeln!(&mut report, "{member}").unwrap();
        }
        report
    }

    /// The least fit member, once sorted.
    #[must_use]
    pub fn first(&self) -> Option<&Individual> {
        self.members.first()
    }

    /// The fittest member, once sorted.
    #[must_use]
    pub fn last(&self) -> Option<&Individual> {
        self.members.last()
    }

    fn assert_full_size(&self) {
        assert_eq!(
            self.members.len(),
            self.config.population_size,
            "selection requires a full, initialized population"
        );
    }

    /// Fitness of both sides of every duel between member `n` and its
    /// opponents, summed.
    fn aggregate_fitness(&self, n: usize, opponents: Opponents) -> f64 {
        let me = &self.members[n];
        self.members
            .iter()
            .enumerate()
            .filter(|&(m, _)| opponents.includes(n, m))
            .map(|(_, other)| {
                other.evaluate_fitness(me, &self.config) + me.evaluate_fitness(other, &self.config)
            })
            .sum()
    }

    /// Stores the aggregate fitness of every member.
    ///
    /// All aggregates are computed before any is written.
    fn assign_aggregate_fitness(&mut self, opponents: Opponents) {
        let totals = (0..self.members.len())
            .map(|n| self.aggregate_fitness(n, opponents))
            .collect::<Vec<_>>();
        for (member, total) in self.members.iter_mut().zip(totals) {
            member.set_fitness(total);
        }
    }

    // Stable: members with equal fitness keep their relative order.
    fn sort_members_by_fitness(&mut self) {
        self.members.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
    }
}

//! A single prisoner: a fixed sequence of decisions and its last fitness.

use std::{fmt, iter};

use dilemma_engine::{PayoffMatrix, SimulationConfig, ZERO_SENTENCE_EPSILON};
use rand::Rng;

/// A prisoner carrying a genome of cooperate (`true`) / betray (`false`)
/// decisions.
///
/// Position `i` of the genome is the decision taken in the `i`-th
/// interrogation. Genomes never change after construction; only the stored
/// fitness is rewritten by fitness evaluations and selection passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genome: Vec<bool>,
    fitness: f64,
    tie_key: u32,
}

impl Individual {
    /// Creates an individual with uniformly random decisions.
    pub fn random<R>(config: &SimulationConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genome = (0..config.genome_length).map(|_| rng.random()).collect();
        Self::from_genome(genome, rng)
    }

    /// Creates an individual carrying exactly `genome`.
    ///
    /// Only the tie key used for shuffling is drawn from `rng`.
    pub fn from_genome<R>(genome: Vec<bool>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            genome,
            fitness: 0.0,
            tie_key: rng.random(),
        }
    }

    #[must_use]
    pub fn genome(&self) -> &[bool] {
        &self.genome
    }

    /// Returns the decision at genome position `i` (`true` = cooperate).
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn decision(&self, i: usize) -> bool {
        self.genome[i]
    }

    /// Returns the last computed fitness (0 until first evaluated).
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Returns the random key that fixes this individual's shuffle position.
    #[must_use]
    pub fn tie_key(&self) -> u32 {
        self.tie_key
    }

    #[must_use]
    pub fn cooperation_count(&self) -> usize {
        self.genome.iter().filter(|&&c| c).count()
    }

    /// Fraction of the genome that cooperates.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cooperation_ratio(&self) -> f64 {
        self.cooperation_count() as f64 / self.genome.len() as f64
    }

    /// Renders the genome as `C` (cooperate) and `D` (betray) characters.
    #[must_use]
    pub fn genome_code(&self) -> String {
        self.genome
            .iter()
            .map(|&c| if c { 'C' } else { 'D' })
            .collect()
    }

    /// Total sentence this prisoner receives when interrogated alongside
    /// `other`, position by position.
    ///
    /// # Panics
    ///
    /// Panics if the genomes have different lengths.
    #[must_use]
    pub fn sentence(&self, other: &Self, payoff: &PayoffMatrix) -> f64 {
        assert_eq!(
            self.genome.len(),
            other.genome.len(),
            "genome lengths must match"
        );
        iter::zip(&self.genome, &other.genome)
            .map(|(&me, &them)| payoff.sentence(me, them))
            .sum()
    }

    /// Bonus earned for runs of consecutive cooperations.
    ///
    /// Every time the current run reaches `config.streak_length` the bonus is
    /// awarded once and the run restarts, so a run of twice the streak length
    /// earns two bonuses.
    #[must_use]
    pub fn streak_bonus(&self, config: &SimulationConfig) -> f64 {
        let mut bonus = 0.0;
        let mut streak = 0;
        for &cooperated in &self.genome {
            if cooperated {
                streak += 1;
                if streak == config.streak_length {
                    streak = 0;
                    bonus += config.streak_bonus;
                }
            } else {
                streak = 0;
            }
        }
        bonus
    }

    /// Computes the fitness against `other` without storing it.
    ///
    /// `fitness = 1 / sentence + streak bonus`; a total sentence of exactly
    /// zero is replaced by [`ZERO_SENTENCE_EPSILON`].
    #[must_use]
    pub fn evaluate_fitness(&self, other: &Self, config: &SimulationConfig) -> f64 {
        let mut sentence = self.sentence(other, &config.payoff);
        if sentence == 0.0 {
            sentence = ZERO_SENTENCE_EPSILON;
        }
        1.0 / sentence + self.streak_bonus(config)
    }

    /// Computes the fitness against `other` and stores it as this
    /// individual's fitness.
    pub fn fitness_against(&mut self, other: &Self, config: &SimulationConfig) -> f64 {
        self.fitness = self.evaluate_fitness(other, config);
        self.fitness
    }

    /// Produces four offspring by crossover at the genome midpoint.
    ///
    /// Two crossover patterns are built, each twice:
    ///
    /// - `A` = first half of `self`, second half of `partner`
    /// - `B` = first half of `partner`, second half of `self`
    ///
    /// and returned in the order `[A, A, B, B]`. Each offspring's genes are
    /// then flipped independently with `config.mutation_probability`, so twins
    /// usually end up slightly different.
    ///
    /// # Panics
    ///
    /// Panics if the genomes have different lengths.
    pub fn reproduce_with<R>(
        &self,
        partner: &Self,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> [Self; 4]
    where
        R: Rng + ?Sized,
    {
        assert_eq!(
            self.genome.len(),
            partner.genome.len(),
            "genome lengths must match"
        );
        let midpoint = self.genome.len() / 2;
        let cross_a = crossover(&self.genome, &partner.genome, midpoint);
        let cross_b = crossover(&partner.genome, &self.genome, midpoint);

        [&cross_a, &cross_a, &cross_b, &cross_b].map(|pattern| {
            let mut genome = pattern.clone();
            mutate(&mut genome, config.mutation_probability, rng);
            Self::from_genome(genome, rng)
        })
    }

    /// Evaluates both prisoners against each other and returns the winner.
    ///
    /// Both stored fitness values are updated. `self` wins only with a
    /// strictly greater fitness, so ties go to `other`.
    #[must_use]
    pub fn compete(mut self, mut other: Self, config: &SimulationConfig) -> Self {
        let mine = self.fitness_against(&other, config);
        let theirs = other.fitness_against(&self, config);
        if mine > theirs { self } else { other }
    }

    /// Human-readable summary: genome code, cooperation ratio and fitness.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: C={}, F={}",
            self.genome_code(),
            self.cooperation_ratio(),
            self.fitness
        )
    }
}

fn crossover(head: &[bool], tail: &[bool], midpoint: usize) -> Vec<bool> {
    head[..midpoint]
        .iter()
        .chain(&tail[midpoint..])
        .copied()
        .collect()
}

fn mutate<R>(genome: &mut [bool], probability: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genome {
        if rng.random_bool(probability) {
            *gene = !*gene;
        }
    }
}

//! Simulation parameters.
//!
//! [`SimulationConfig`] is an immutable value supplied once before a run and
//! read by every individual and population operation. It can be built in code,
//! taken from [`Default`] (the reference experiment), or loaded from JSON where
//! omitted fields fall back to their default values.

use std::{fs::File, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::PayoffMatrix;

/// Errors detected while loading or validating a [`SimulationConfig`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be a positive multiple of 4, got {size}")]
    PopulationSize { size: usize },
    #[display("genome length must be an even number of at least 2, got {length}")]
    GenomeLength { length: usize },
    #[display("streak length must be at least 1")]
    StreakLength,
    #[display("streak bonus must be a finite non-negative number, got {bonus}")]
    StreakBonus { bonus: f64 },
    #[display("mutation probability must be within [0, 1], got {probability}")]
    MutationProbability { probability: f64 },
    #[display("sentence '{name}' must be a finite non-negative number, got {value}")]
    Sentence { name: &'static str, value: f64 },
    #[display("failed to read configuration: {_0}")]
    Io(io::Error),
    #[display("failed to parse configuration: {_0}")]
    Json(serde_json::Error),
}

/// Parameters of one simulation run.
///
/// # Example
///
/// ```
/// use dilemma_engine::SimulationConfig;
///
/// let config = SimulationConfig {
///     population_size: 8,
///     genome_length: 6,
///     ..SimulationConfig::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let odd = SimulationConfig { population_size: 6, ..config };
/// assert!(odd.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sentence lengths for each pair of decisions.
    pub payoff: PayoffMatrix,
    /// Number of prisoners in the population.
    pub population_size: usize,
    /// Number of decisions in each genome.
    pub genome_length: usize,
    /// Consecutive cooperations needed for one streak bonus.
    pub streak_length: usize,
    /// Fitness added for each completed cooperation streak.
    pub streak_bonus: f64,
    /// Probability of flipping each inherited gene.
    pub mutation_probability: f64,
    /// Number of select/shuffle/reproduce cycles per run.
    pub generation_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            payoff: PayoffMatrix::default(),
            population_size: 32,
            genome_length: 30,
            streak_length: 5,
            streak_bonus: 0.0,
            mutation_probability: 0.01,
            generation_count: 5,
        }
    }
}

impl SimulationConfig {
    /// Checks the invariants every population operation relies on.
    ///
    /// The population must stay even after tournament or half-discarding
    /// selection, so its size has to be a multiple of 4. The crossover point
    /// is the genome midpoint, so the genome length has to be even.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 || self.population_size % 4 != 0 {
            return Err(ConfigError::PopulationSize {
                size: self.population_size,
            });
        }
        if self.genome_length < 2 || self.genome_length % 2 != 0 {
            return Err(ConfigError::GenomeLength {
                length: self.genome_length,
            });
        }
        if self.streak_length == 0 {
            return Err(ConfigError::StreakLength);
        }
        if !self.streak_bonus.is_finite() || self.streak_bonus < 0.0 {
            return Err(ConfigError::StreakBonus {
                bonus: self.streak_bonus,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbability {
                probability: self.mutation_probability,
            });
        }
        let PayoffMatrix {
            both_silent,
            betrayed,
            mutual_betrayal,
            informant,
        } = self.payoff;
        for (name, value) in [
            ("both_silent", both_silent),
            ("betrayed", betrayed),
            ("mutual_betrayal", mutual_betrayal),
            ("informant", informant),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Sentence { name, value });
            }
        }
        Ok(())
    }

    /// Reads a JSON configuration and validates it.
    pub fn from_json_reader<R>(reader: R) -> Result<Self, ConfigError>
    where
        R: io::Read,
    {
        let config: Self = serde_json::from_reader(reader).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Self::from_json_reader`], but opens the file at `path`.
    pub fn from_json_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).map_err(ConfigError::Io)?;
        Self::from_json_reader(io::BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_population_not_even_after_halving() {
        for size in [0, 2, 6, 30] {
            let config = SimulationConfig {
                population_size: size,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::PopulationSize { size: s }) if s == size
            ));
        }
    }

    #[test]
    fn test_rejects_bad_genome_length() {
        for length in [0, 1, 7] {
            let config = SimulationConfig {
                genome_length: length,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::GenomeLength { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_zero_streak_length() {
        let config = SimulationConfig {
            streak_length: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::StreakLength)));
    }

    #[test]
    fn test_rejects_mutation_probability_out_of_range() {
        for probability in [-0.1, 1.5, f64::NAN] {
            let config = SimulationConfig {
                mutation_probability: probability,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MutationProbability { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_negative_sentence() {
        let config = SimulationConfig {
            payoff: PayoffMatrix {
                betrayed: -1.0,
                ..PayoffMatrix::default()
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Sentence {
                name: "betrayed",
                ..
            })
        ));
    }

    #[test]
    fn test_json_fills_missing_fields_with_defaults() {
        let json = r#"{"population_size": 8, "payoff": {"both_silent": 1.0}}"#;
        let config = SimulationConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.payoff.both_silent, 1.0);
        assert_eq!(config.payoff.betrayed, 30.0);
        assert_eq!(config.genome_length, 30);
    }

    #[test]
    fn test_json_is_validated() {
        let json = r#"{"genome_length": 3}"#;
        assert!(matches!(
            SimulationConfig::from_json_reader(json.as_bytes()),
            Err(ConfigError::GenomeLength { length: 3 })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json_reader("{".as_bytes()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimulationConfig::from_json_file("/nonexistent/dilemma-config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}

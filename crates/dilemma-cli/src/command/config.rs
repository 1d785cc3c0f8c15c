use std::path::PathBuf;

use anyhow::Context as _;
use dilemma_engine::SimulationConfig;

/// Configuration file and per-field overrides shared by the subcommands.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// JSON configuration file (omitted fields take their default values)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations per run
    #[arg(long)]
    generations: Option<usize>,
    /// Number of prisoners (a multiple of 4)
    #[arg(long)]
    population: Option<usize>,
    /// Number of decisions per genome (even)
    #[arg(long)]
    genome_length: Option<usize>,
    /// Consecutive cooperations needed for a streak bonus
    #[arg(long)]
    streak_length: Option<usize>,
    /// Fitness bonus per cooperation streak
    #[arg(long)]
    streak_bonus: Option<f64>,
    /// Per-gene mutation probability
    #[arg(long)]
    mutation: Option<f64>,
}

impl ConfigArg {
    /// Loads the configuration file (or the defaults) and applies overrides.
    pub(crate) fn load(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(generations) = self.generations {
            config.generation_count = generations;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(genome_length) = self.genome_length {
            config.genome_length = genome_length;
        }
        if let Some(streak_length) = self.streak_length {
            config.streak_length = streak_length;
        }
        if let Some(streak_bonus) = self.streak_bonus {
            config.streak_bonus = streak_bonus;
        }
        if let Some(mutation) = self.mutation {
            config.mutation_probability = mutation;
        }
        config.validate().context("Invalid simulation configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigArg::default().load().unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_overrides() {
        let arg = ConfigArg {
            generations: Some(12),
            population: Some(16),
            mutation: Some(0.0),
            ..ConfigArg::default()
        };
        let config = arg.load().unwrap();
        assert_eq!(config.generation_count, 12);
        assert_eq!(config.population_size, 16);
        assert_eq!(config.mutation_probability, 0.0);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let arg = ConfigArg {
            population: Some(10),
            ..ConfigArg::default()
        };
        assert!(arg.load().is_err());
    }
}

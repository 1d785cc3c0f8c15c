use std::path::PathBuf;

use dilemma_engine::{SeedParseError, SimulationSeed};
use dilemma_evolution::{SelectionStrategy, Simulation, SimulationReport};
use rand::Rng as _;
use serde::Serialize;

use crate::{command::config::ConfigArg, util::JsonSink};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StrategyArg {
    /// Run all three strategies one after another
    #[default]
    All,
    Tournament,
    CompareHalf,
    CompareFull,
}

impl StrategyArg {
    fn strategies(self) -> &'static [SelectionStrategy] {
        match self {
            Self::All => &SelectionStrategy::ALL,
            Self::Tournament => &[SelectionStrategy::Tournament],
            Self::CompareHalf => &[SelectionStrategy::CompareHalf],
            Self::CompareFull => &[SelectionStrategy::CompareFull],
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Selection strategy to run
    #[arg(long, value_enum, default_value = "all")]
    strategy: StrategyArg,
    #[clap(flatten)]
    config: ConfigArg,
    /// Random seed: a decimal number or 32 hex characters (random when omitted)
    #[arg(long, value_parser = parse_seed)]
    seed: Option<SimulationSeed>,
    /// Write the run reports as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationOutput<'a> {
    seed: SimulationSeed,
    runs: &'a [SimulationReport],
}

fn parse_seed(s: &str) -> Result<SimulationSeed, SeedParseError> {
    match s.parse::<u64>() {
        Ok(value) if s.len() < 32 => Ok(SimulationSeed::from_u64(value)),
        _ => s.parse(),
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        strategy,
        config,
        seed,
        output,
    } = arg;
    let config = config.load()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Seed: {seed}");

    // One generator for all runs, so the seed reproduces the whole session.
    let mut rng = seed.rng();
    let mut reports = vec![];
    for (i, &strategy) in strategy.strategies().iter().enumerate() {
        let simulation = Simulation::new(config.clone(), strategy)?;
        let (population, report) = simulation.run(&mut rng);

        if i > 0 {
            println!();
        }
        println!("****************{strategy}****************");
        println!("{}", report.initial);
        println!("{}\n{}", report.final_summary, population.report());
        reports.push(report);
    }

    if let Some(path) = output {
        let sink = JsonSink::create(Some(path.as_path()))?;
        let target = sink.describe();
        sink.write(&SimulationOutput {
            seed,
            runs: &reports,
        })?;
        log::info!("Reports saved to {target}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_decimal() {
        assert_eq!(parse_seed("42").unwrap(), SimulationSeed::from_u64(42));
    }

    #[test]
    fn test_parse_seed_hex() {
        let hex = "0123456789abcdef0123456789abcdef";
        assert_eq!(parse_seed(hex).unwrap().to_string(), hex);
    }

    #[test]
    fn test_parse_seed_invalid() {
        assert!(parse_seed("not a seed").is_err());
    }

    #[test]
    fn test_all_runs_every_strategy() {
        assert_eq!(StrategyArg::All.strategies(), &SelectionStrategy::ALL);
        assert_eq!(
            StrategyArg::CompareFull.strategies(),
            &[SelectionStrategy::CompareFull]
        );
    }
}

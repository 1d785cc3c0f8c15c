use clap::{Parser, Subcommand};

use self::{show_config::ShowConfigArg, simulate::SimulateArg};

mod config;
mod show_config;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve populations with each selection strategy and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the effective simulation configuration as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::Simulate(SimulateArg::default()))
    {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let args = CommandArgs::try_parse_from(["dilemma"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_simulate_arguments() {
        let args = CommandArgs::try_parse_from([
            "dilemma",
            "simulate",
            "--strategy",
            "compare-half",
            "--generations",
            "10",
            "--seed",
            "42",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let result = CommandArgs::try_parse_from(["dilemma", "simulate", "--strategy", "roulette"]);
        assert!(result.is_err());
    }
}

use std::path::PathBuf;

use crate::{command::config::ConfigArg, util::JsonSink};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    let ShowConfigArg { config, output } = arg;
    let config = config.load()?;
    JsonSink::create(output.as_deref())?.write(&config)
}

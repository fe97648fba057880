use clap::{Parser, Subcommand};

use self::{match_dist::MatchDistArg, null_dist::NullDistArg};

mod match_dist;
mod null_dist;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Estimate a permutation null distribution and p-values for a dataset
    NullDist(#[clap(flatten)] NullDistArg),
    /// Rank distribution families by how well they describe a sample
    MatchDist(#[clap(flatten)] MatchDistArg),
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    match args.mode {
        Mode::NullDist(arg) => null_dist::run(&arg)?,
        Mode::MatchDist(arg) => match_dist::run(&arg)?,
    }
    Ok(())
}

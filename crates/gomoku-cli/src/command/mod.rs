use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, play::PlayArg, ratings::RatingsArg};

mod auto_play;
mod play;
mod ratings;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play against the adaptive computer in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Simulate games against a fixed-difficulty opponent
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Show or reset a ratings file
    Ratings(#[clap(flatten)] RatingsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Ratings(arg) => ratings::run(&arg)?,
    }
    Ok(())
}

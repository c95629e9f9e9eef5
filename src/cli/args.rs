//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{play::PlayArgs, watch::WatchArgs};

#[derive(StructOpt)]
#[structopt(
    name = "boardbot",
    about = "A self-playing board-game bot built on alpha-beta search ♟"
)]
pub enum Boardbot {
    #[structopt(
        name = "watch",
        about = "Watch the bot play the built-in skirmish game against itself, searching for the best move with alpha-beta pruning at the given `--depth` (default: 3). Finished games restart automatically; `--games` (default: 1) sets how many to watch before exiting."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "play",
        about = "Play the built-in skirmish game against the bot, which searches at the given `--depth` (default: 3). Your side is chosen at random unless you specify it with `--side`. Moves are entered as square pairs such as c2c3."
    )]
    Play(PlayArgs),
}

impl crate::cli::commands::Command for Boardbot {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Watch(cmd),
            Play(cmd),
        }
    }
}

//! Watch command - watch the bot play against itself.

use std::thread;
use std::time::Duration;

use boardbot::session::SessionEvent;
use structopt::StructOpt;

use super::util::{create_config, new_skirmish_session, print_board_and_stats, POLL_INTERVAL};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(
        long = "delay",
        default_value = "800",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(
        long = "restart-delay",
        default_value = "10000",
        help = "How long a finished game stays up before the next one, in milliseconds"
    )]
    pub restart_delay_ms: u64,
    #[structopt(short, long, help = "Seed for the move-shuffle rng")]
    pub seed: Option<u64>,
    #[structopt(
        short,
        long,
        default_value = "1",
        help = "How many games to watch before exiting"
    )]
    pub games: u32,
}

impl Command for WatchArgs {
    fn execute(self) {
        let mut config = create_config(self.depth, self.delay_ms, self.seed);
        config.restart_delay = Duration::from_millis(self.restart_delay_ms);

        let mut session = new_skirmish_session(config);
        session.start();
        print_board_and_stats(&session, None);

        let mut finished_games = 0;
        while finished_games < self.games {
            match session.poll() {
                Ok(Some(SessionEvent::MovePlayed { game_move, ending })) => {
                    print_board_and_stats(&session, Some(&game_move));
                    if let Some(ending) = ending {
                        println!("{}", ending);
                        finished_games += 1;
                    }
                }
                Ok(Some(SessionEvent::GameEnded(ending))) => {
                    println!("{}", ending);
                    finished_games += 1;
                }
                Ok(Some(SessionEvent::Restarted)) => {
                    print_board_and_stats(&session, None);
                }
                Ok(None) => {}
                Err(error) => {
                    eprintln!("session error: {}", error);
                    std::process::exit(1);
                }
            }
            thread::sleep(POLL_INTERVAL);
        }

        session.shutdown();
    }
}

//! Play command - play a game against the bot.

use std::io;
use std::thread;

use boardbot::alpha_beta_searcher::RulesEngine;
use boardbot::games::skirmish::{Coord, SkirmishMove};
use boardbot::session::SessionEvent;
use boardbot::side::Side;
use structopt::StructOpt;

use super::util::{
    create_config, new_skirmish_session, print_board_and_stats, SkirmishSession, POLL_INTERVAL,
};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(
        short = "s",
        long = "side",
        default_value = "random",
        help = "Side you play: light, dark, or random"
    )]
    pub side: Side,
    #[structopt(
        long = "delay",
        default_value = "800",
        help = "Delay before the bot replies, in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(long, help = "Seed for the move-shuffle rng")]
    pub seed: Option<u64>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let human_side = self.side;
        let config = create_config(self.depth, self.delay_ms, self.seed);
        let mut session = new_skirmish_session(config).with_bot_side(human_side.opposite());
        session.set_mode(false);
        session.start();

        println!(
            "You play {} against the bot. Moves look like c2c3; q quits.",
            human_side
        );
        print_board_and_stats(&session, None);

        let outcome = loop {
            match session.poll() {
                Ok(Some(SessionEvent::MovePlayed { game_move, ending })) => {
                    print_board_and_stats(&session, Some(&game_move));
                    if let Some(ending) = ending {
                        break Some(ending);
                    }
                }
                Ok(Some(SessionEvent::GameEnded(ending))) => break Some(ending),
                Ok(Some(SessionEvent::Restarted)) => {}
                Ok(None) => {}
                Err(error) => {
                    eprintln!("session error: {}", error);
                    std::process::exit(1);
                }
            }

            if session.is_game_over() || session.rules().turn() != human_side {
                thread::sleep(POLL_INTERVAL);
                continue;
            }

            println!("Enter your move:");
            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => break None,
                Ok(_n) => {}
                Err(error) => {
                    println!("error: {}", error);
                    continue;
                }
            }
            let input = input.trim();
            if input == "q" || input == "quit" {
                break None;
            }
            let (from, to) = match parse_squares(input) {
                Some(squares) => squares,
                None => {
                    println!("invalid input `{}`; moves look like c2c3", input);
                    continue;
                }
            };

            // A failed attempt can leave a square selected; tapping it again
            // clears the selection before the next try.
            if let Some(selected) = session.state().selected_square {
                tap(&mut session, selected);
            }

            tap(&mut session, from);
            match tap(&mut session, to) {
                Some(SessionEvent::MovePlayed { game_move, ending }) => {
                    print_board_and_stats(&session, Some(&game_move));
                    if let Some(ending) = ending {
                        break Some(ending);
                    }
                }
                _ => println!("invalid move"),
            }
        };

        if let Some(ending) = outcome {
            println!("{}", ending);
        }
        session.shutdown();
    }
}

fn tap(session: &mut SkirmishSession, square: Coord) -> Option<SessionEvent<SkirmishMove>> {
    match session.handle_square_input(square) {
        Ok(event) => event,
        Err(error) => {
            eprintln!("session error: {}", error);
            std::process::exit(1);
        }
    }
}

fn parse_squares(input: &str) -> Option<(Coord, Coord)> {
    if input.len() != 4 || !input.is_ascii() {
        return None;
    }
    let from = input[..2].parse().ok()?;
    let to = input[2..].parse().ok()?;
    Some((from, to))
}

mod cli;

use structopt::StructOpt;

use crate::cli::commands::Command;
use crate::cli::Boardbot;

fn main() {
    env_logger::init();
    Boardbot::from_args().execute();
}

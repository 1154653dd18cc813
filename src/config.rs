use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StartGame {
    Minesweeper,
    Snake,
    Tetris,
}

#[derive(Parser, Debug)]
#[command(name = "calmcade", version, about = "Minesweeper, Snake and Tetris in the terminal")]
pub struct Args {
    /// Open directly on a game instead of the home screen.
    #[arg(long, value_enum)]
    game: Option<StartGame>,

    /// Seed for every game's RNG. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Frame period in milliseconds (input poll and redraw).
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// End Minesweeper as won once every safe cell is open.
    #[arg(long)]
    minesweeper_win: bool,

    /// Write logs here. The terminal belongs to the UI, so without a file
    /// nothing is logged.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// off | error | warn | info | debug | trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub start: Option<StartGame>,
    pub seed: Option<u64>,
    pub frame_rate: Duration,
    pub minesweeper_win: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from(Args::parse())
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            start: args.game,
            seed: args.seed,
            // A zero period would spin the input thread.
            frame_rate: Duration::from_millis(args.frame_ms.max(1)),
            minesweeper_win: args.minesweeper_win,
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: None,
            seed: None,
            frame_rate: Duration::from_millis(16),
            minesweeper_win: false,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

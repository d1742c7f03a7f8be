//! Command-line interface for the session replayer.

use clap::Parser;
use std::path::PathBuf;

/// Replay a recorded marker-tracking session against the game controller
#[derive(Parser, Debug)]
#[command(name = "ar_tictactoe_replay")]
#[command(about = "Replay AR tic-tac-toe tracking sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session file with one JSON event per line ("-" for stdin)
    #[arg(short, long)]
    pub events: PathBuf,

    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print display commands as JSON lines instead of drawing the board
    #[arg(long)]
    pub json: bool,
}

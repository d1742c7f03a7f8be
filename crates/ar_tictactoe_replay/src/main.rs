//! AR tic-tac-toe session replayer
//!
//! Feeds a recorded stream of marker-tracking events through the game
//! controller and shows what the board overlay would have displayed.

#![warn(missing_docs)]

mod cli;
mod console;
mod replay;

use anyhow::{Context, Result};
use ar_tictactoe::{CommandLog, Controller, Settings, TimedEvent};
use clap::Parser;
use cli::Cli;
use console::ConsoleDisplay;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for boards or JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;
    let events = load_events(&cli.events)?;

    let summary = if cli.json {
        run_json(settings, &events)?
    } else {
        run_console(settings, &events)?
    };

    info!(
        events = summary.events,
        moves = summary.moves,
        rejections = summary.rejections,
        "Replay finished"
    );
    match summary.outcome {
        Some(outcome) => println!("Result: {}", outcome),
        None => println!("Result: game still in progress"),
    }
    Ok(())
}

#[instrument]
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::from_file(path)?),
        None => Ok(Settings::default()),
    }
}

#[instrument]
fn load_events(path: &Path) -> Result<Vec<TimedEvent>> {
    if path == Path::new("-") {
        return replay::parse_events(io::stdin().lock());
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open session file {}", path.display()))?;
    replay::parse_events(BufReader::new(file))
}

fn run_console(settings: Settings, events: &[TimedEvent]) -> Result<replay::ReplaySummary> {
    let mut controller = Controller::new(ConsoleDisplay::new(), settings);
    let stdout = io::stdout();
    replay::replay(&mut controller, events, |controller, timed, result| {
        let mut out = stdout.lock();
        let outcome = match result {
            Ok(handled) => format!("{:?}", handled),
            Err(rejection) => format!("rejected: {}", rejection),
        };
        writeln!(out, "@{} {}", timed.at_ms, outcome)?;
        writeln!(out, "{}\n", controller.display().render())?;
        Ok(())
    })
}

fn run_json(settings: Settings, events: &[TimedEvent]) -> Result<replay::ReplaySummary> {
    let mut controller = Controller::new(CommandLog::new(), settings);
    let stdout = io::stdout();
    // Opening status is issued before any event.
    let opening = controller.display_mut().drain();
    writeln!(stdout.lock(), "{}", json!({ "at_ms": 0, "commands": opening }))?;

    replay::replay(&mut controller, events, |controller, timed, result| {
        let commands = controller.display_mut().drain();
        let rejection = result.as_ref().err().map(|r| r.to_string());
        let line = json!({
            "at_ms": timed.at_ms,
            "rejected": rejection,
            "commands": commands,
        });
        writeln!(stdout.lock(), "{}", line)?;
        Ok(())
    })
}

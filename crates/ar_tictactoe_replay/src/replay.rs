//! Reading session files and feeding them to a controller.

use crate::console::Clocked;
use ar_tictactoe::{BoardDisplay, Controller, Handled, Outcome, Rejection, TimedEvent};
use std::io::BufRead;
use tracing::{info, instrument, warn};

/// Parses a session: one [`TimedEvent`] JSON object per line.
///
/// Blank lines and lines starting with `#` are skipped. Lines that do not
/// parse are logged and skipped.
#[instrument(skip(reader))]
pub fn parse_events(reader: impl BufRead) -> anyhow::Result<Vec<TimedEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<TimedEvent>(trimmed) {
            Ok(event) => events.push(event),
            Err(e) => warn!(line = idx + 1, error = %e, "Skipping malformed event"),
        }
    }
    info!(count = events.len(), "Session parsed");
    Ok(events)
}

/// Totals for one replayed session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events dispatched.
    pub events: usize,
    /// Marks placed.
    pub moves: usize,
    /// Events turned away.
    pub rejections: usize,
    /// Outcome of the game in play when the session ended.
    pub outcome: Option<Outcome>,
}

/// Dispatches `events` in order, calling `observe` after each one.
#[instrument(skip_all, fields(events = events.len()))]
pub fn replay<D, F>(
    controller: &mut Controller<D>,
    events: &[TimedEvent],
    mut observe: F,
) -> anyhow::Result<ReplaySummary>
where
    D: BoardDisplay + Clocked,
    F: FnMut(&mut Controller<D>, &TimedEvent, &Result<Handled, Rejection>) -> anyhow::Result<()>,
{
    let mut summary = ReplaySummary::default();
    for timed in events {
        controller.display_mut().advance(timed.at_ms);
        let result = controller.handle(timed.event.clone(), timed.at_ms);

        summary.events += 1;
        match &result {
            Ok(Handled::Moved { .. }) => summary.moves += 1,
            Ok(_) => {}
            Err(_) => summary.rejections += 1,
        }
        observe(controller, timed, &result)?;
    }
    summary.outcome = controller.engine().status().outcome();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleDisplay;
    use ar_tictactoe::{Player, Settings};

    const SESSION: &str = r#"
# identity camera, board fills a 300x300 viewport
{"at_ms": 0, "type": "camera_updated", "camera": {"view_projection": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1], "viewport": [300, 300]}}
{"at_ms": 0, "type": "board_layout", "rect": {"left": 0, "top": 0, "width": 300, "height": 300}}
{"at_ms": 100, "type": "marker_found", "seat": "one", "pose": {"transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]}}
{"at_ms": 400, "type": "marker_found", "seat": "one", "pose": {"transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]}}
not json
{"at_ms": 1200, "type": "marker_lost", "seat": "one"}
"#;

    #[test]
    fn test_parse_skips_comments_and_garbage() {
        let events = parse_events(SESSION.as_bytes()).expect("readable");
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_replay_counts() {
        let events = parse_events(SESSION.as_bytes()).expect("readable");
        let mut controller = Controller::new(ConsoleDisplay::new(), Settings::default());
        let mut seen = 0;

        let summary = replay(&mut controller, &events, |_, _, _| {
            seen += 1;
            Ok(())
        })
        .expect("replay");

        assert_eq!(seen, 5);
        assert_eq!(
            summary,
            ReplaySummary {
                events: 5,
                moves: 1,
                rejections: 1,
                outcome: None,
            }
        );
        assert_eq!(controller.engine().current_player(), Player::O);
        assert_eq!(controller.display().status(), "Player O's turn");
    }

    #[test]
    fn test_sample_session_ends_in_win() {
        let session = include_str!("../sessions/right_column_win.jsonl");
        let events = parse_events(session.as_bytes()).expect("readable");
        let mut controller = Controller::new(ConsoleDisplay::new(), Settings::default());

        let summary = replay(&mut controller, &events, |_, _, _| Ok(())).expect("replay");

        assert_eq!(summary.events, 12);
        assert_eq!(summary.moves, 7);
        assert_eq!(summary.rejections, 2);
        assert_eq!(summary.outcome, Some(Outcome::Winner(Player::X)));
        assert!(controller.display().render().contains("win line: [2, 5, 8]"));
    }
}

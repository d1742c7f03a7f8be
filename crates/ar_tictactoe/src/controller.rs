//! Turns tracking events into moves and display commands.

use crate::display::BoardDisplay;
use crate::engine::GameEngine;
use crate::error::Rejection;
use crate::event::{MarkerPose, Timestamp, TrackingEvent};
use crate::mapper::CellMapper;
use crate::settings::Settings;
use crate::{GameStatus, Position, Seat};
use tracing::{debug, info, instrument};

/// What an accepted event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A mark was placed; `status` is the game status afterwards.
    Moved {
        /// Cell that was marked.
        position: Position,
        /// Status after the move.
        status: GameStatus,
    },
    /// A seat's last observation was cleared.
    MarkerLost(Seat),
    /// Camera state was recorded.
    CameraUpdated,
    /// Board layout was recorded.
    LayoutUpdated,
    /// A new game started.
    Reset,
}

/// Mediates between the tracking collaborator, the engine and a display.
///
/// Rejected inputs never touch the board. At most they put a transient
/// message on the display, and they come back as `Err(Rejection)` for
/// the caller to log or ignore.
#[derive(Debug)]
pub struct Controller<D> {
    engine: GameEngine,
    mapper: CellMapper,
    observations: [Option<Position>; 2],
    settings: Settings,
    display: D,
}

impl<D: BoardDisplay> Controller<D> {
    /// Creates a controller and shows the opening status.
    #[instrument(skip(display))]
    pub fn new(display: D, settings: Settings) -> Self {
        let mut controller = Self {
            engine: GameEngine::new(settings.debounce()),
            mapper: CellMapper::default(),
            observations: [None; 2],
            settings,
            display,
        };
        let opening = controller.turn_status();
        controller.display.set_status_text(&opening);
        controller
    }

    /// Game engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Display sink.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display sink.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Consumes the controller, returning its display.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Cell a seat's marker was last seen over.
    ///
    /// Only the seat whose turn it is gets observed. Cleared when that
    /// marker is lost, leaves the board, or the game resets.
    pub fn observation(&self, seat: Seat) -> Option<Position> {
        self.observations[seat.index()]
    }

    /// Handles one event to completion.
    #[instrument(skip_all, fields(%now))]
    pub fn handle(&mut self, event: TrackingEvent, now: Timestamp) -> Result<Handled, Rejection> {
        let result = match event {
            TrackingEvent::MarkerFound { seat, pose } => self.marker_found(seat, &pose, now),
            TrackingEvent::MarkerLost { seat } => Ok(self.marker_lost(seat)),
            TrackingEvent::CameraUpdated { camera } => {
                self.mapper.set_camera(camera);
                Ok(Handled::CameraUpdated)
            }
            TrackingEvent::BoardLayout { rect } => {
                debug!(?rect, "Board laid out");
                self.mapper.set_board_rect(rect);
                Ok(Handled::LayoutUpdated)
            }
            TrackingEvent::Reset => {
                self.reset();
                Ok(Handled::Reset)
            }
        };

        if let Err(rejection) = &result {
            debug!(%rejection, "Event rejected");
        }
        result
    }

    fn marker_found(
        &mut self,
        seat: Seat,
        pose: &MarkerPose,
        now: Timestamp,
    ) -> Result<Handled, Rejection> {
        if self.engine.is_over() {
            return Err(Rejection::GameOver);
        }
        self.engine.accept_input(now)?;

        let expected = self.engine.current_player();
        if seat.symbol() != expected {
            let fallback = self.turn_status();
            self.display.set_temporary_status_text(
                self.settings.not_your_turn_text(),
                self.settings.message_duration(),
                &fallback,
            );
            return Err(Rejection::WrongTurn { seat, expected });
        }

        let cell = self.mapper.cell_for(pose.position());
        self.observations[seat.index()] = cell;
        let cell = cell.ok_or(Rejection::OutOfBounds)?;

        self.display.highlight_cell(Some(cell));
        self.attempt_move(cell)
    }

    /// Plays the current player at `pos` and reports the result to the display.
    #[instrument(skip(self), fields(player = %self.engine.current_player()))]
    pub fn attempt_move(&mut self, pos: Position) -> Result<Handled, Rejection> {
        let symbol = self.engine.current_player();
        let status = match self.engine.attempt_move(pos) {
            Ok(status) => status,
            Err(rejection) => {
                if matches!(rejection, Rejection::SquareOccupied(_)) {
                    let fallback = self.turn_status();
                    self.display.set_temporary_status_text(
                        self.settings.position_taken_text(),
                        self.settings.message_duration(),
                        &fallback,
                    );
                }
                return Err(rejection);
            }
        };

        info!(%symbol, position = %pos, "Move placed");
        self.display.mark_cell(pos, symbol);

        match status {
            GameStatus::Won { winner, line } => {
                let text = self.settings.win_status(winner);
                self.display.set_status_text(&text);
                self.display.highlight_win_line(line);
            }
            GameStatus::Draw => {
                self.display.set_status_text(self.settings.draw_text());
            }
            GameStatus::InProgress => {
                let text = self.turn_status();
                self.display.set_status_text(&text);
            }
        }

        Ok(Handled::Moved {
            position: pos,
            status,
        })
    }

    fn marker_lost(&mut self, seat: Seat) -> Handled {
        debug!(%seat, "Marker lost");
        self.observations[seat.index()] = None;
        Handled::MarkerLost(seat)
    }

    /// Starts a new game and restores the opening display.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.engine.reset();
        self.observations = [None; 2];
        self.display.clear_board();
        let opening = self.turn_status();
        self.display.set_status_text(&opening);
    }

    fn turn_status(&self) -> String {
        self.settings.turn_status(self.engine.current_player())
    }
}
